//! Interactive list picker
//!
//! One generic state machine shared by the file staging and session views.
//! A [`PickerMode`] supplies what differs between them: the title and key
//! hints, the key-to-action table, and the side effects run when an item is
//! toggled or removed.
//!
//! The loop is strictly sequential: wait for a key, apply it (awaiting any
//! side effect to completion), redraw.

mod state;

pub use state::*;

use std::io;

use async_trait::async_trait;
use crossterm::event::{Event, KeyEvent};
use futures::{Stream, StreamExt};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{ListState, Paragraph},
};
use tracing::{debug, warn};

use super::event::{PickerCommand, is_press};
use super::theme::Theme;
use super::widgets::PickerList;
use crate::error::{Result, TuiError};

/// Behaviour that distinguishes one picker from another
#[async_trait]
pub trait PickerMode: Send + Sync {
    /// Heading shown above the list
    fn title(&self) -> &str;

    /// Key hints as `(key, description)` pairs
    fn key_hints(&self) -> &[(&'static str, &'static str)];

    /// Whether rows show a marked/unmarked glyph
    fn shows_marks(&self) -> bool {
        false
    }

    /// Mode-specific key binding
    fn action_for(&self, key: &KeyEvent) -> Option<Action>;

    /// Side effect for flipping `item`; `marked` is its current state
    async fn toggle(&self, _item: &str, _marked: bool) -> Result<()> {
        Ok(())
    }

    /// Side effect for removing `item` from the list
    async fn remove(&self, _item: &str) -> Result<()> {
        Ok(())
    }
}

/// A list picker driven by a [`PickerMode`]
pub struct Picker<M> {
    mode: M,
    state: PickerState,
    list_state: ListState,
    theme: Theme,
    /// Last side-effect failure, shown above the footer
    status: Option<String>,
}

impl<M: PickerMode> Picker<M> {
    pub fn new(mode: M, state: PickerState) -> Self {
        Self {
            mode,
            state,
            list_state: ListState::default(),
            theme: Theme::default(),
            status: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn into_state(self) -> PickerState {
        self.state
    }

    /// Translate a key into a picker command
    pub fn command_for(&self, key: &KeyEvent) -> Option<PickerCommand> {
        PickerCommand::navigation(key)
            .or_else(|| self.mode.action_for(key).map(PickerCommand::Perform))
    }

    /// Handle one key press; returns `true` once the loop should end
    pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !is_press(&key) {
            return false;
        }

        match self.command_for(&key) {
            Some(command) => self.apply(command).await,
            None => false,
        }
    }

    /// Apply a command; returns `true` once the loop should end
    pub async fn apply(&mut self, command: PickerCommand) -> bool {
        match command {
            PickerCommand::NavigateUp => {
                self.state.move_up();
                false
            }
            PickerCommand::NavigateDown => {
                self.state.move_down();
                false
            }
            PickerCommand::Quit => {
                self.state.resolve(Action::None);
                true
            }
            PickerCommand::Perform(action) => self.perform(action).await,
        }
    }

    async fn perform(&mut self, action: Action) -> bool {
        if action.needs_item() && self.state.is_empty() {
            return false;
        }

        if action.terminates() {
            debug!("Picker finished with {:?}", action);
            self.state.resolve(action);
            return true;
        }

        match action {
            Action::Toggle => self.toggle_current().await,
            Action::Remove => self.remove_current().await,
            _ => {}
        }
        false
    }

    async fn toggle_current(&mut self) {
        let Some(item) = self.state.current().map(str::to_string) else {
            return;
        };
        let marked = self.state.is_marked(&item);

        match self.mode.toggle(&item, marked).await {
            Ok(()) => {
                if marked {
                    self.state.unmark(&item);
                } else {
                    self.state.mark(&item);
                }
                self.status = None;
            }
            Err(e) => {
                warn!("Toggle failed for {}: {}", item, e);
                self.status = Some(e.to_string());
            }
        }
    }

    async fn remove_current(&mut self) {
        let Some(item) = self.state.current().map(str::to_string) else {
            return;
        };

        // Unstage first; a failure here does not block the removal attempt
        if self.state.is_marked(&item) {
            match self.mode.toggle(&item, true).await {
                Ok(()) => self.state.unmark(&item),
                Err(e) => warn!("Unmark before removal failed for {}: {}", item, e),
            }
        }

        match self.mode.remove(&item).await {
            Ok(()) => {
                self.state.remove_current();
                self.status = None;
            }
            Err(e) => {
                warn!("Remove failed for {}: {}", item, e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// Render the full picker view
    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(1),    // Items
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        let title = Paragraph::new(Line::from(Span::styled(
            self.mode.title().to_string(),
            self.theme.title(),
        )));
        frame.render_widget(title, chunks[0]);

        self.list_state.select(if self.state.is_empty() {
            None
        } else {
            Some(self.state.cursor())
        });
        let list = PickerList::new(&self.state, &self.theme).show_marks(self.mode.shows_marks());
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        if let Some(ref status) = self.status {
            let status = Paragraph::new(Span::styled(status.clone(), self.theme.error()));
            frame.render_widget(status, chunks[2]);
        }

        let mut hints = Vec::new();
        for (i, (key, description)) in self.mode.key_hints().iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("  ", self.theme.hint()));
            }
            hints.push(Span::styled(*key, self.theme.key()));
            hints.push(Span::styled(format!(" {}", description), self.theme.hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), chunks[3]);
    }

    /// Run the interactive loop until a terminating key
    ///
    /// A closed event stream counts as quitting.
    pub async fn run<B, S>(mut self, terminal: &mut Terminal<B>, events: &mut S) -> Result<PickerState>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match events.next().await {
                Some(Ok(Event::Key(key))) => {
                    if self.handle_key(key).await {
                        break;
                    }
                }
                // Resize and other events just trigger a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(TuiError::EventError(e.to_string()).into()),
                None => {
                    self.state.resolve(Action::None);
                    break;
                }
            }
        }

        Ok(self.state)
    }
}
