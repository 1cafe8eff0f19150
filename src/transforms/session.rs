//! Transforms applying worker events to the command session.

use chrono::Local;

use crate::data::event::{ReadOutcome, SessionEvent};
use crate::data::session::{CommandSession, JobStatus};

/// Overwrite the session for a newly submitted command.
pub fn begin(session: &mut CommandSession, command: &str) {
    session.command = command.to_string();
    session.output.clear();
    session.status = JobStatus::Running;
    session.pid = None;
    session.started_at = Some(Local::now());
    session.finished_at = None;
}

/// Apply one event from the worker.
pub fn apply_event(session: &mut CommandSession, event: SessionEvent) {
    match event {
        SessionEvent::Started { pid } => session.pid = pid,
        SessionEvent::Output(chunk) => {
            session.output.append(&chunk);
        }
        SessionEvent::LaunchFailed(diagnostic) => {
            session.output.set(diagnostic.as_bytes());
            finish(session, JobStatus::Failed(diagnostic));
        }
        SessionEvent::Finished(outcome) => {
            let status = match outcome {
                ReadOutcome::Exited { exit_code } => JobStatus::Finished { exit_code },
                ReadOutcome::Cancelled => JobStatus::Cancelled,
                ReadOutcome::Interrupted(reason) => JobStatus::Failed(reason),
            };
            finish(session, status);
        }
    }
}

/// Mark a session whose worker vanished without reporting an outcome.
pub fn abandon(session: &mut CommandSession) {
    if session.status.is_running() {
        finish(
            session,
            JobStatus::Failed("worker ended without reporting".to_string()),
        );
    }
}

fn finish(session: &mut CommandSession, status: JobStatus) {
    if session.output.dropped() > 0 {
        log::debug!(
            "{:?} kept {} output bytes, dropped {}",
            session.command,
            session.output.len(),
            session.output.dropped()
        );
    }
    session.status = status;
    session.finished_at = Some(Local::now());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buffer::OUTPUT_MAX_LEN;

    #[test]
    fn test_begin_overwrites_previous_session() {
        let mut session = CommandSession::new();
        session.output.append(b"old output");
        session.status = JobStatus::Finished { exit_code: Some(0) };
        session.pid = Some(7);

        begin(&mut session, "echo new");
        assert_eq!(session.command, "echo new");
        assert!(session.output.is_empty());
        assert_eq!(session.status, JobStatus::Running);
        assert_eq!(session.pid, None);
        assert!(session.started_at.is_some());
        assert!(session.finished_at.is_none());
    }

    #[test]
    fn test_output_events_accumulate_bounded() {
        let mut session = CommandSession::new();
        begin(&mut session, "yes");
        apply_event(&mut session, SessionEvent::Output(vec![b'y'; 800]));
        apply_event(&mut session, SessionEvent::Output(vec![b'y'; 800]));
        assert_eq!(session.output.len(), OUTPUT_MAX_LEN);
    }

    #[test]
    fn test_started_sets_pid() {
        let mut session = CommandSession::new();
        begin(&mut session, "true");
        apply_event(&mut session, SessionEvent::Started { pid: Some(1234) });
        assert_eq!(session.pid, Some(1234));
    }

    #[test]
    fn test_launch_failure_writes_diagnostic() {
        let mut session = CommandSession::new();
        begin(&mut session, "true");
        apply_event(
            &mut session,
            SessionEvent::LaunchFailed("Failed to open pty: out of ptys".to_string()),
        );
        assert_eq!(session.output.as_bytes(), b"Failed to open pty: out of ptys");
        assert!(matches!(session.status, JobStatus::Failed(_)));
        assert!(session.finished_at.is_some());
    }

    #[test]
    fn test_finished_maps_outcome() {
        let mut session = CommandSession::new();
        begin(&mut session, "false");
        apply_event(
            &mut session,
            SessionEvent::Finished(ReadOutcome::Exited { exit_code: Some(1) }),
        );
        assert_eq!(session.status, JobStatus::Finished { exit_code: Some(1) });

        begin(&mut session, "sleep 9");
        apply_event(&mut session, SessionEvent::Finished(ReadOutcome::Cancelled));
        assert_eq!(session.status, JobStatus::Cancelled);
    }

    #[test]
    fn test_abandon_only_affects_running() {
        let mut session = CommandSession::new();
        abandon(&mut session);
        assert_eq!(session.status, JobStatus::Idle);

        begin(&mut session, "true");
        abandon(&mut session);
        assert!(matches!(session.status, JobStatus::Failed(_)));
    }
}
