//! Pure data types for application state.

use ratatui::style::Color;

use super::buffer::CommandLine;
use super::session::CommandSession;

/// Theme for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn fg(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    pub fn dim(self) -> Color {
        match self {
            Theme::Dark => Color::DarkGray,
            Theme::Light => Color::Gray,
        }
    }

    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::Blue,
        }
    }

    /// Fill colour of the CPU/RAM gauges.
    pub fn gauge(self) -> Color {
        match self {
            Theme::Dark => Color::LightBlue,
            Theme::Light => Color::Blue,
        }
    }
}

/// Pure application state, mutated only through transforms.
#[derive(Debug, Default)]
pub struct AppState {
    pub input: CommandLine,
    pub session: CommandSession,
    // Vertical offset into the wrapped output grid, in lines
    pub scroll_offset: u16,
    pub cpu_usage: u8,
    pub ram_usage: u8,
    // One-line message shown in the status bar until the next key press
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub theme: Theme,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
