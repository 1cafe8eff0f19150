//! Messages and side-effect descriptions passed between layers.

/// Effects that the UI layer should execute.
/// Transforms return these instead of performing side effects directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Launch a command in a fresh pty session.
    Submit(String),
    /// Cancel the running command, if any.
    Cancel,
    /// Quit the application.
    Quit,
}

/// How a capture loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The pty reached end of stream or the child exited.
    /// The exit code is `None` when the child could not be reaped.
    Exited { exit_code: Option<u32> },
    /// Cancellation was requested and the child was killed.
    Cancelled,
    /// The readiness check failed.
    Interrupted(String),
}

/// Progress reported by a command worker to the display loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started { pid: Option<u32> },
    Output(Vec<u8>),
    LaunchFailed(String),
    Finished(ReadOutcome),
}
