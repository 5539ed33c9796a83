//! Single-line text prompt
//!
//! Used for the commit message: Enter submits, Esc or Ctrl-C cancels, and
//! input stops growing at the configured character limit.

use std::io;

use crossterm::event::{Event, KeyEvent};
use futures::{Stream, StreamExt};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::event::{InputCommand, is_press};
use super::theme::Theme;
use crate::error::{Result, TuiError};

/// Outcome of feeding a key to the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Keep reading keys
    Pending,
    /// Enter was pressed with this value
    Submitted(String),
    /// Esc or Ctrl-C
    Cancelled,
}

/// Text prompt state
#[derive(Debug, Clone)]
pub struct TextInput {
    label: String,
    placeholder: String,
    value: String,
    char_limit: usize,
    theme: Theme,
}

impl TextInput {
    pub fn new(label: impl Into<String>, char_limit: usize) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            value: String::new(),
            char_limit,
            theme: Theme::default(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        if !is_press(key) {
            return InputOutcome::Pending;
        }

        match InputCommand::from_key(key) {
            Some(InputCommand::Submit) => InputOutcome::Submitted(self.value.clone()),
            Some(InputCommand::Cancel) => InputOutcome::Cancelled,
            Some(InputCommand::Backspace) => {
                self.value.pop();
                InputOutcome::Pending
            }
            Some(InputCommand::Insert(c)) => {
                if self.value.chars().count() < self.char_limit {
                    self.value.push(c);
                }
                InputOutcome::Pending
            }
            None => InputOutcome::Pending,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Label
                Constraint::Length(2), // Field
                Constraint::Length(1), // Hint
                Constraint::Min(0),
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(Span::styled(self.label.clone(), self.theme.title())),
            chunks[0],
        );

        let field = if self.value.is_empty() {
            Line::from(vec![
                Span::styled("> ", self.theme.cursor_marker()),
                Span::styled(self.placeholder.clone(), self.theme.hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("> ", self.theme.cursor_marker()),
                Span::styled(self.value.clone(), Style::default().fg(self.theme.text_primary)),
            ])
        };
        frame.render_widget(Paragraph::new(field), chunks[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("enter", self.theme.key()),
                Span::styled(" submit  ", self.theme.hint()),
                Span::styled("esc", self.theme.key()),
                Span::styled(" quit", self.theme.hint()),
            ])),
            chunks[2],
        );

        let x = chunks[1].x + 2 + self.value.chars().count() as u16;
        frame.set_cursor_position(Position::new(x.min(chunks[1].right().saturating_sub(1)), chunks[1].y));
    }

    /// Read keys until the value is submitted or the prompt is cancelled
    ///
    /// Returns `None` on cancel or when the event stream closes.
    pub async fn run<B, S>(mut self, terminal: &mut Terminal<B>, events: &mut S) -> Result<Option<String>>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            match events.next().await {
                Some(Ok(Event::Key(key))) => match self.handle_key(&key) {
                    InputOutcome::Pending => {}
                    InputOutcome::Submitted(value) => return Ok(Some(value)),
                    InputOutcome::Cancelled => return Ok(None),
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(TuiError::EventError(e.to_string()).into()),
                None => return Ok(None),
            }
        }
    }
}
