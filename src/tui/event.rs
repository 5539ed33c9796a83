//! Key handling for the interactive components
//!
//! Translates crossterm key events into the commands the picker and the
//! text prompt understand. Mode-specific bindings live with each mode.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::picker::Action;

/// Commands understood by the list picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerCommand {
    /// Move the cursor up
    NavigateUp,
    /// Move the cursor down
    NavigateDown,
    /// Leave without acting
    Quit,
    /// Mode-specific action
    Perform(Action),
}

impl PickerCommand {
    /// Keys shared by every picker mode
    pub fn navigation(key: &KeyEvent) -> Option<Self> {
        match (key.code, key.modifiers) {
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => {
                Some(PickerCommand::NavigateUp)
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => {
                Some(PickerCommand::NavigateDown)
            }
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(PickerCommand::Quit),
            _ if is_interrupt(key) => Some(PickerCommand::Quit),
            _ => None,
        }
    }
}

/// Commands understood by the single-line text prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Submit,
    Cancel,
    Backspace,
    Insert(char),
}

impl InputCommand {
    /// Convert a key event to a prompt command
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if is_interrupt(key) {
            return Some(InputCommand::Cancel);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => Some(InputCommand::Submit),
            (KeyCode::Esc, _) => Some(InputCommand::Cancel),
            (KeyCode::Backspace, _) => Some(InputCommand::Backspace),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(InputCommand::Insert(c))
            }
            _ => None,
        }
    }
}

/// Whether the key was pressed (terminals reporting releases send both)
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Ctrl-C
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
