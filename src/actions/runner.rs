//! Supervision of the single command execution unit.
//!
//! Each submission gets its own worker thread that owns the pty for the
//! whole command lifecycle. The worker reports progress over a channel; the
//! display loop drains it with [`CommandRunner::poll`] and is the only writer
//! of the [`CommandSession`]. At most one worker is alive at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::actions::pty::{self, LaunchOptions};
use crate::actions::reader::{self, ReaderConfig};
use crate::data::buffer::COMMAND_MAX_LEN;
use crate::data::event::SessionEvent;
use crate::data::session::CommandSession;
use crate::error::{Error, Result};
use crate::transforms::session as session_transforms;

/// How long dropping the runner waits for a cancelled worker to finish.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

struct Job {
    events: Receiver<SessionEvent>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

/// Launches commands and feeds their output into a session.
pub struct CommandRunner {
    options: LaunchOptions,
    reader: ReaderConfig,
    job: Option<Job>,
}

impl CommandRunner {
    pub fn new(options: LaunchOptions) -> Self {
        Self::with_reader(options, ReaderConfig::default())
    }

    pub fn with_reader(options: LaunchOptions, reader: ReaderConfig) -> Self {
        Self {
            options,
            reader,
            job: None,
        }
    }

    /// True while a worker is alive, including the window between the child
    /// exiting and its final events being drained.
    pub fn is_busy(&self) -> bool {
        self.job.is_some()
    }

    /// Start `command`, overwriting `session`.
    ///
    /// Rejects the submission with [`Error::Busy`] while another command is
    /// still in flight. Launch failures inside the worker are not errors
    /// here; they arrive as a diagnostic in the session output.
    pub fn submit(&mut self, session: &mut CommandSession, command: &str) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        let command = command.trim();
        if command.is_empty() {
            return Err(Error::EmptyCommand);
        }
        if command.len() > COMMAND_MAX_LEN {
            return Err(Error::CommandTooLong(command.len()));
        }

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker = {
            let command = command.to_string();
            let options = self.options.clone();
            let config = self.reader.clone();
            let cancel = cancel.clone();
            thread::Builder::new()
                .name("cmdterm-worker".to_string())
                .spawn(move || execute(command, options, config, cancel, tx))?
        };

        session_transforms::begin(session, command);
        self.job = Some(Job {
            events: rx,
            cancel,
            worker: Some(worker),
        });
        Ok(())
    }

    /// Apply every pending worker event to `session` without blocking.
    /// Returns true if anything changed.
    pub fn poll(&mut self, session: &mut CommandSession) -> bool {
        let Some(job) = self.job.as_mut() else {
            return false;
        };
        let mut changed = false;
        loop {
            match job.events.try_recv() {
                Ok(event) => {
                    session_transforms::apply_event(session, event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.retire(session);
                    changed = true;
                    break;
                }
            }
        }
        changed
    }

    /// Block until the current job finishes or `timeout` elapses, applying
    /// events as they arrive. Returns true if the job finished.
    pub fn wait(&mut self, session: &mut CommandSession, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            let Some(job) = self.job.as_mut() else {
                return true;
            };
            let left = deadline.saturating_duration_since(Instant::now());
            match job.events.recv_timeout(left) {
                Ok(event) => session_transforms::apply_event(session, event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => self.retire(session),
            }
        }
    }

    /// Ask the running command to stop. Takes effect within one poll timeout.
    pub fn cancel(&self) -> bool {
        match &self.job {
            Some(job) => {
                job.cancel.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    fn retire(&mut self, session: &mut CommandSession) {
        if let Some(mut job) = self.job.take() {
            if let Some(worker) = job.worker.take() {
                if worker.join().is_err() {
                    log::warn!("command worker panicked");
                }
            }
        }
        session_transforms::abandon(session);
    }
}

impl Drop for CommandRunner {
    fn drop(&mut self) {
        if !self.cancel() {
            return;
        }
        log::info!("cancelling running command on shutdown");
        let mut discarded = CommandSession::new();
        if !self.wait(&mut discarded, SHUTDOWN_GRACE) {
            log::warn!("command worker still running after {:?}", SHUTDOWN_GRACE);
        }
    }
}

/// Body of the worker thread: launch, capture, report.
fn execute(
    command: String,
    options: LaunchOptions,
    config: ReaderConfig,
    cancel: Arc<AtomicBool>,
    tx: Sender<SessionEvent>,
) {
    let channel = match pty::open_channel(&command, &options) {
        Ok(channel) => channel,
        Err(e) => {
            log::warn!("could not launch {:?}: {}", command, e);
            let _ = tx.send(SessionEvent::LaunchFailed(e.to_string()));
            return;
        }
    };

    let _ = tx.send(SessionEvent::Started {
        pid: channel.process_id(),
    });
    let outcome = reader::run(channel, &config, &cancel, |chunk| {
        let _ = tx.send(SessionEvent::Output(chunk));
    });
    log::info!("{:?} ended: {:?}", command, outcome);
    let _ = tx.send(SessionEvent::Finished(outcome));
}
