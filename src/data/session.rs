//! The single command session shown by the UI.

use chrono::{DateTime, Local};

use super::buffer::BoundedBuffer;

/// Lifecycle of the current command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JobStatus {
    /// Nothing has been submitted yet.
    #[default]
    Idle,
    Running,
    Finished { exit_code: Option<u32> },
    Cancelled,
    /// The command could not be launched, or capture failed.
    Failed(String),
}

impl JobStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::Running)
    }
}

/// Input and captured output of the most recent command.
///
/// Exactly one session exists for the lifetime of the app; each submission
/// overwrites it. Only the display loop mutates it, by applying events
/// received from the worker.
#[derive(Debug, Clone, Default)]
pub struct CommandSession {
    pub command: String,
    pub output: BoundedBuffer,
    pub status: JobStatus,
    pub pid: Option<u32>,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
}

impl CommandSession {
    pub fn new() -> Self {
        Self::default()
    }
}
