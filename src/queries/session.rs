//! Queries over the command session.

use crate::data::session::{CommandSession, JobStatus};
use crate::data::state::AppState;
use crate::queries::output::WRAP_ROWS;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Short human-readable description of the session status.
pub fn status_label(session: &CommandSession) -> String {
    match &session.status {
        JobStatus::Idle => "Ready".to_string(),
        JobStatus::Running => match session.pid {
            Some(pid) => format!("Running `{}` (pid {})", session.command, pid),
            None => format!("Starting `{}`", session.command),
        },
        JobStatus::Finished { exit_code } => {
            let code = exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string());
            match session.finished_at {
                Some(at) => format!("Finished with exit {} at {}", code, at.format("%H:%M:%S")),
                None => format!("Finished with exit {}", code),
            }
        }
        JobStatus::Cancelled => "Cancelled".to_string(),
        JobStatus::Failed(reason) => format!("Failed: {}", reason),
    }
}

/// Spinner glyph for the current frame while a command runs.
pub fn spinner(state: &AppState) -> Option<char> {
    state
        .session
        .status
        .is_running()
        .then(|| SPINNER[state.spinner_frame % SPINNER.len()])
}

/// Largest useful scroll offset over the wrapped output.
pub fn max_scroll() -> u16 {
    (WRAP_ROWS - 1) as u16
}
