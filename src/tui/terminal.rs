//! Terminal setup and teardown
//!
//! Interactive components run inside raw mode on the alternate screen. The
//! terminal is restored before any result or error is returned, so messages
//! printed afterwards land on the normal screen.

use std::io::{self, Stdout, Write};

use crossterm::{
    event::EventStream,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use super::input::TextInput;
use super::picker::{Picker, PickerMode, PickerState};
use crate::error::{Result, TuiError};

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen
pub fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(TuiError::InitFailed(e.to_string()).into());
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = match Terminal::new(backend) {
        Ok(terminal) => terminal,
        Err(e) => {
            abandon_setup(&mut io::stdout());
            return Err(TuiError::InitFailed(e.to_string()).into());
        }
    };

    debug!("Terminal initialised");
    Ok(terminal)
}

/// Best-effort undo of a setup that failed after entering the alternate screen
fn abandon_setup<W: Write>(out: &mut W) {
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Restore the terminal to its normal state
pub fn restore_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    terminal
        .show_cursor()
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

    debug!("Terminal restored");
    Ok(())
}

/// Run a picker on the real terminal
pub async fn run_picker<M: PickerMode>(picker: Picker<M>) -> Result<PickerState> {
    let mut terminal = setup_terminal()?;
    let mut events = EventStream::new();

    let result = picker.run(&mut terminal, &mut events).await;
    restore_terminal(&mut terminal)?;

    result
}

/// Run a text prompt on the real terminal
pub async fn run_prompt(input: TextInput) -> Result<Option<String>> {
    let mut terminal = setup_terminal()?;
    let mut events = EventStream::new();

    let result = input.run(&mut terminal, &mut events).await;
    restore_terminal(&mut terminal)?;

    result
}
