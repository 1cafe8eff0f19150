//! Capture loop over a pseudo-terminal master.
//!
//! The loop waits for readability with a timeout, forwards whatever it reads
//! as bounded output increments, and checks for child exit whenever a wait
//! times out. It consumes its source, so the pty master is closed exactly
//! once, when the loop returns.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::data::buffer::OUTPUT_MAX_LEN;
use crate::data::event::ReadOutcome;

/// Readiness wait used between checks for child exit.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Largest single read from the pty.
pub const READ_CHUNK: usize = 1024;

/// How many times to try reaping the child after end of stream.
const REAP_ATTEMPTS: u32 = 5;
const REAP_INTERVAL: Duration = Duration::from_millis(20);

/// Byte stream attached to a child process.
pub trait CaptureSource {
    /// Wait up to `timeout` for data. `Ok(false)` means the wait timed out.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read available bytes. `Ok(0)` means end of stream.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Non-blocking exit check. `Ok(Some(code))` once the child has exited.
    fn try_exit(&mut self) -> io::Result<Option<u32>>;

    /// Kill the child.
    fn terminate(&mut self) -> io::Result<()>;
}

/// Tunables for the capture loop.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    pub poll_timeout: Duration,
    pub chunk_size: usize,
    /// Total bytes forwarded before further output is dropped.
    pub capacity: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            poll_timeout: POLL_TIMEOUT,
            chunk_size: READ_CHUNK,
            capacity: OUTPUT_MAX_LEN,
        }
    }
}

/// Run the capture loop to completion.
///
/// `emit` receives each output increment, already truncated to the capacity
/// left. The source is dropped before this returns.
pub fn run<S, F>(
    mut source: S,
    config: &ReaderConfig,
    cancel: &AtomicBool,
    mut emit: F,
) -> ReadOutcome
where
    S: CaptureSource,
    F: FnMut(Vec<u8>),
{
    let mut buf = vec![0u8; config.chunk_size.max(1)];
    let mut remaining = config.capacity;
    let mut dropped = 0usize;

    let mut forward = |chunk: &[u8], remaining: &mut usize| {
        let kept = chunk.len().min(*remaining);
        if kept > 0 {
            emit(chunk[..kept].to_vec());
            *remaining -= kept;
        }
        dropped += chunk.len() - kept;
    };

    let outcome = loop {
        if cancel.load(Ordering::Relaxed) {
            if let Err(e) = source.terminate() {
                log::warn!("failed to kill child: {}", e);
            }
            reap(&mut source);
            break ReadOutcome::Cancelled;
        }

        match source.wait_readable(config.poll_timeout) {
            Ok(true) => match source.read_chunk(&mut buf) {
                Ok(0) => break ReadOutcome::Exited { exit_code: reap(&mut source) },
                Ok(n) => forward(&buf[..n], &mut remaining),
                Err(e) => {
                    // EIO is how Linux reports a hung-up slave
                    log::debug!("pty read ended: {}", e);
                    break ReadOutcome::Exited { exit_code: reap(&mut source) };
                }
            },
            Ok(false) => match source.try_exit() {
                Ok(Some(code)) => {
                    drain(&mut source, &mut buf, |chunk| forward(chunk, &mut remaining));
                    break ReadOutcome::Exited { exit_code: Some(code) };
                }
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("failed to query child status: {}", e);
                    break ReadOutcome::Exited { exit_code: None };
                }
            },
            Err(e) => {
                log::warn!("pty readiness check failed: {}", e);
                break ReadOutcome::Interrupted(e.to_string());
            }
        }
    };

    if dropped > 0 {
        log::debug!("output capacity reached, dropped {} bytes", dropped);
    }
    drop(source);
    outcome
}

/// Read whatever is still buffered after the child exited.
fn drain<S, F>(source: &mut S, buf: &mut [u8], mut forward: F)
where
    S: CaptureSource,
    F: FnMut(&[u8]),
{
    while let Ok(true) = source.wait_readable(Duration::ZERO) {
        match source.read_chunk(buf) {
            Ok(n) if n > 0 => forward(&buf[..n]),
            _ => break,
        }
    }
}

/// Collect the exit code, giving a child that just closed its end a moment
/// to finish.
fn reap<S: CaptureSource>(source: &mut S) -> Option<u32> {
    for attempt in 0..REAP_ATTEMPTS {
        match source.try_exit() {
            Ok(Some(code)) => return Some(code),
            Ok(None) if attempt + 1 < REAP_ATTEMPTS => thread::sleep(REAP_INTERVAL),
            Ok(None) => break,
            Err(e) => {
                log::debug!("could not reap child: {}", e);
                break;
            }
        }
    }
    None
}
