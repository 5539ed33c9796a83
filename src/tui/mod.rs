//! Terminal UI module using ratatui
//!
//! Two small interactive components:
//! - `Picker` - List picker shared by file staging and session management
//! - `TextInput` - Single-line prompt for the commit message

mod event;
mod input;
pub mod picker;
mod terminal;
mod theme;
mod widgets;

pub use event::*;
pub use input::*;
pub use picker::{Action, Picker, PickerMode, PickerState};
pub use terminal::*;
pub use theme::*;
