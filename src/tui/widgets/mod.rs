//! TUI widgets
//!
//! - `PickerList` - Cursor/mark list used by every picker

mod picker_list;

pub use picker_list::*;
