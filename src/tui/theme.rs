//! TUI Theme configuration
//!
//! Centralized theme for the picker and prompt.
//! Supports multiple color depths for terminal compatibility.

use ratatui::style::{Color, Modifier, Style};

/// Terminal color capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Basic 16 ANSI colors (maximum compatibility)
    Basic,
    /// 256 color palette
    #[default]
    Indexed,
    /// True color (24-bit RGB)
    TrueColor,
}

impl ColorMode {
    /// Detect the best color mode for the current terminal
    pub fn detect() -> Self {
        if let Ok(colorterm) = std::env::var("COLORTERM") {
            if colorterm == "truecolor" || colorterm == "24bit" {
                return Self::TrueColor;
            }
        }

        if let Ok(term) = std::env::var("TERM") {
            if term.contains("kitty") || term.contains("alacritty") {
                return Self::TrueColor;
            }
            if term.contains("256color") {
                return Self::Indexed;
            }
        }

        Self::Basic
    }
}

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Current row
    pub cursor: Color,
    pub cursor_bg: Color,

    // Staged/unstaged glyphs
    pub marked: Color,
    pub unmarked: Color,

    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub title: Color,

    // Footer key hints
    pub key_hint: Color,

    // Side-effect failures
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_color_mode(ColorMode::detect())
    }
}

impl Theme {
    /// Create a theme for the specified color mode
    pub fn for_color_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Basic => Self::basic(),
            ColorMode::Indexed => Self::indexed(),
            ColorMode::TrueColor => Self::truecolor(),
        }
    }

    /// Basic 16-color theme (maximum compatibility)
    pub fn basic() -> Self {
        Self {
            cursor: Color::Magenta,
            cursor_bg: Color::Reset,
            marked: Color::Green,
            unmarked: Color::DarkGray,
            text_primary: Color::Reset,
            text_secondary: Color::DarkGray,
            title: Color::Cyan,
            key_hint: Color::Blue,
            error: Color::Red,
        }
    }

    /// 256-color theme
    pub fn indexed() -> Self {
        Self {
            cursor: Color::Indexed(212),    // Pink
            cursor_bg: Color::Indexed(236),
            marked: Color::Indexed(156),    // Pastel mint green
            unmarked: Color::Indexed(243),
            text_primary: Color::Reset,
            text_secondary: Color::Indexed(245),
            title: Color::Indexed(117),     // Pastel sky blue
            key_hint: Color::Indexed(147),  // Pastel lavender
            error: Color::Indexed(210),     // Pastel coral
        }
    }

    /// True color theme
    pub fn truecolor() -> Self {
        Self {
            cursor: Color::Rgb(245, 194, 231),     // Pastel pink
            cursor_bg: Color::Rgb(49, 50, 68),
            marked: Color::Rgb(166, 227, 161),     // Pastel mint
            unmarked: Color::Rgb(108, 112, 134),
            text_primary: Color::Rgb(205, 214, 244),
            text_secondary: Color::Rgb(147, 153, 178),
            title: Color::Rgb(137, 180, 250),      // Pastel sky blue
            key_hint: Color::Rgb(180, 190, 254),   // Pastel periwinkle
            error: Color::Rgb(243, 139, 168),      // Pastel rose
        }
    }

    /// Style for the row under the cursor
    pub fn current_row(&self) -> Style {
        Style::default()
            .bg(self.cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the cursor marker
    pub fn cursor_marker(&self) -> Style {
        Style::default().fg(self.cursor)
    }

    /// Style for the title line
    pub fn title(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    /// Style for a key name in the footer
    pub fn key(&self) -> Style {
        Style::default().fg(self.key_hint).add_modifier(Modifier::BOLD)
    }

    /// Style for footer descriptions
    pub fn hint(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Style for error messages
    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }
}
