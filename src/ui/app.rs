//! Application setup, teardown, and main entry point.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::Terminal;
use std::io::stdout;
use std::time::Duration;

use crate::actions::pty::LaunchOptions;
use crate::actions::runner::CommandRunner;
use crate::actions::telemetry::{Telemetry, SAMPLE_INTERVAL};
use crate::data::state::AppState;
use crate::error::Result;

/// Runtime settings for the TUI.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Frame period; also the longest the loop waits for input.
    pub tick: Duration,
    pub telemetry_interval: Duration,
    pub launch: LaunchOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            telemetry_interval: SAMPLE_INTERVAL,
            launch: LaunchOptions::default(),
        }
    }
}

/// Run the TUI application.
pub fn run(state: &mut AppState, settings: &Settings) -> Result<()> {
    let mut runner = CommandRunner::new(settings.launch.clone());
    let mut telemetry = Telemetry::procfs(settings.telemetry_interval);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(ratatui::backend::CrosstermBackend::new(stdout()))?;

    // Main loop
    let result = super::main_loop(&mut terminal, state, &mut runner, &mut telemetry, settings);

    // Restore terminal
    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
