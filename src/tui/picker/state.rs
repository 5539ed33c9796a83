//! Picker state
//!
//! Pure in-memory state of a list picker. All cursor arithmetic lives here
//! so that `0 <= cursor < len` (or `cursor == 0` for an empty list) holds
//! after every mutation.

use std::collections::HashSet;

/// Resolved user intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Quit without acting
    #[default]
    None,
    /// Activate the selected item
    Activate,
    /// Delete the selected item
    Delete,
    /// Flip the marked state of the current item
    Toggle,
    /// Remove the current item from the list
    Remove,
    /// Accept the marked items
    Confirm,
}

impl Action {
    /// Whether this action ends the interactive loop
    pub fn terminates(self) -> bool {
        !matches!(self, Action::Toggle | Action::Remove)
    }

    /// Whether this action applies to the item under the cursor
    pub fn needs_item(self) -> bool {
        matches!(
            self,
            Action::Activate | Action::Delete | Action::Toggle | Action::Remove
        )
    }
}

/// Items, cursor, marks and the resolved action of a picker
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    items: Vec<String>,
    cursor: usize,
    marked: HashSet<String>,
    action: Action,
    selected: Option<usize>,
}

impl PickerState {
    /// Create a state over `items` with the cursor on the first one
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Pre-mark items; entries not in the list are ignored
    pub fn with_marked(mut self, marked: impl IntoIterator<Item = String>) -> Self {
        self.marked = marked
            .into_iter()
            .filter(|item| self.items.contains(item))
            .collect();
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor
    pub fn current(&self) -> Option<&str> {
        self.items.get(self.cursor).map(String::as_str)
    }

    pub fn is_marked(&self, item: &str) -> bool {
        self.marked.contains(item)
    }

    /// Marked items in list order
    pub fn marked_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| self.marked.contains(*item))
            .map(String::as_str)
            .collect()
    }

    pub fn marked_count(&self) -> usize {
        self.marked.len()
    }

    /// Resolved action (`None` until the loop ends with an action)
    pub fn action(&self) -> Action {
        self.action
    }

    /// Index recorded when the loop ended on an item action
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    pub fn mark(&mut self, item: &str) {
        if self.items.iter().any(|i| i == item) {
            self.marked.insert(item.to_string());
        }
    }

    pub fn unmark(&mut self, item: &str) {
        self.marked.remove(item);
    }

    /// Remove the item under the cursor and clamp the cursor
    pub fn remove_current(&mut self) -> Option<String> {
        if self.cursor >= self.items.len() {
            return None;
        }

        let item = self.items.remove(self.cursor);
        self.marked.remove(&item);
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
        Some(item)
    }

    /// Record the action that ends the loop
    pub fn resolve(&mut self, action: Action) {
        self.action = action;
        self.selected = if action.needs_item() && !self.items.is_empty() {
            Some(self.cursor)
        } else {
            None
        };
    }
}
