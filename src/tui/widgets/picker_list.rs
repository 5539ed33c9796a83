//! Picker list widget
//!
//! One row per item: a cursor marker on the current row and, when marks are
//! shown, a filled or hollow glyph for marked and unmarked items.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget},
};

use crate::tui::picker::PickerState;
use crate::tui::theme::Theme;

/// Marker drawn in front of the current row
pub const CURSOR_MARKER: &str = " ❯";
/// Glyph for marked items
pub const MARKED_GLYPH: &str = "●";
/// Glyph for unmarked items
pub const UNMARKED_GLYPH: &str = "○";

/// List widget over a [`PickerState`]
pub struct PickerList<'a> {
    state: &'a PickerState,
    theme: &'a Theme,
    show_marks: bool,
}

impl<'a> PickerList<'a> {
    pub fn new(state: &'a PickerState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            show_marks: false,
        }
    }

    /// Show the marked/unmarked glyph column
    pub fn show_marks(mut self, show: bool) -> Self {
        self.show_marks = show;
        self
    }

    fn to_list_items(&self) -> Vec<ListItem<'a>> {
        self.state
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let is_current = i == self.state.cursor();

                let marker = if is_current {
                    Span::styled(CURSOR_MARKER, self.theme.cursor_marker())
                } else {
                    Span::raw("  ")
                };

                let mut spans = vec![marker, Span::raw(" ")];

                if self.show_marks {
                    let glyph = if self.state.is_marked(item) {
                        Span::styled(MARKED_GLYPH, Style::default().fg(self.theme.marked))
                    } else {
                        Span::styled(UNMARKED_GLYPH, Style::default().fg(self.theme.unmarked))
                    };
                    spans.push(glyph);
                    spans.push(Span::raw(" "));
                }

                spans.push(Span::styled(
                    item.clone(),
                    Style::default().fg(self.theme.text_primary),
                ));

                ListItem::new(Line::from(spans))
            })
            .collect()
    }
}

impl<'a> StatefulWidget for PickerList<'a> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let items = self.to_list_items();
        let list = List::new(items).highlight_style(self.theme.current_row());
        StatefulWidget::render(list, area, buf, state);
    }
}
