//! Transforms for the input line, output scrolling, and app-level toggles.

use crate::data::event::Effect;
use crate::data::state::AppState;
use crate::queries::session::max_scroll;

/// Lines moved per arrow-key press.
pub const KEY_SCROLL_STEP: u16 = 2;

/// Lines moved per mouse-wheel notch.
pub const WHEEL_SCROLL_STEP: u16 = 1;

/// Type a character into the input line. Characters that would overflow the
/// line are ignored.
pub fn insert_char(state: &mut AppState, c: char) {
    state.input.push(c);
}

/// Insert pasted text, all or nothing.
pub fn insert_str(state: &mut AppState, s: &str) {
    let cleaned: String = s.chars().filter(|c| !c.is_control()).collect();
    if !state.input.push_str(&cleaned) {
        state.notice = Some("Pasted text does not fit on the command line".to_string());
    }
}

pub fn backspace(state: &mut AppState) {
    state.input.pop();
}

/// Submit the input line. Does nothing while the line is empty.
pub fn submit(state: &mut AppState) -> Option<Effect> {
    if state.input.is_empty() {
        return None;
    }
    let command = state.input.take();
    state.scroll_offset = 0;
    Some(Effect::Submit(command))
}

/// Request cancellation of the running command.
pub fn cancel(state: &AppState) -> Option<Effect> {
    state.session.status.is_running().then_some(Effect::Cancel)
}

pub fn scroll_up(state: &mut AppState, lines: u16) {
    state.scroll_offset = state.scroll_offset.saturating_sub(lines);
}

pub fn scroll_down(state: &mut AppState, lines: u16) {
    state.scroll_offset = state.scroll_offset.saturating_add(lines).min(max_scroll());
}

/// Toggle theme between dark and light.
pub fn toggle_theme(state: &mut AppState) {
    state.theme = state.theme.toggle();
}

pub fn request_quit(state: &mut AppState) -> Effect {
    state.should_quit = true;
    Effect::Quit
}

/// Advance the running-command spinner by one frame.
pub fn tick_spinner(state: &mut AppState) {
    if state.session.status.is_running() {
        state.spinner_frame = state.spinner_frame.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buffer::COMMAND_MAX_LEN;
    use crate::data::session::JobStatus;

    #[test]
    fn test_submit_takes_input() {
        let mut state = AppState::new();
        for c in "echo hi".chars() {
            insert_char(&mut state, c);
        }
        state.scroll_offset = 4;
        assert_eq!(submit(&mut state), Some(Effect::Submit("echo hi".to_string())));
        assert!(state.input.is_empty());
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn test_submit_empty_is_noop() {
        let mut state = AppState::new();
        assert_eq!(submit(&mut state), None);
    }

    #[test]
    fn test_backspace() {
        let mut state = AppState::new();
        insert_char(&mut state, 'l');
        insert_char(&mut state, 's');
        backspace(&mut state);
        assert_eq!(state.input.as_str(), "l");
        backspace(&mut state);
        backspace(&mut state);
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_insert_respects_bound() {
        let mut state = AppState::new();
        for _ in 0..COMMAND_MAX_LEN + 10 {
            insert_char(&mut state, 'x');
        }
        assert_eq!(state.input.len(), COMMAND_MAX_LEN);
    }

    #[test]
    fn test_paste_too_long_sets_notice() {
        let mut state = AppState::new();
        insert_str(&mut state, &"y".repeat(COMMAND_MAX_LEN + 1));
        assert!(state.input.is_empty());
        assert!(state.notice.is_some());
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut state = AppState::new();
        insert_str(&mut state, "ls\n");
        assert_eq!(state.input.as_str(), "ls");
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = AppState::new();
        scroll_up(&mut state, KEY_SCROLL_STEP);
        assert_eq!(state.scroll_offset, 0);
        scroll_down(&mut state, KEY_SCROLL_STEP);
        assert_eq!(state.scroll_offset, 2);
        scroll_down(&mut state, 100);
        assert_eq!(state.scroll_offset, max_scroll());
    }

    #[test]
    fn test_cancel_only_when_running() {
        let mut state = AppState::new();
        assert_eq!(cancel(&state), None);
        state.session.status = JobStatus::Running;
        assert_eq!(cancel(&state), Some(Effect::Cancel));
    }

    #[test]
    fn test_request_quit() {
        let mut state = AppState::new();
        assert_eq!(request_quit(&mut state), Effect::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_spinner_ticks_only_while_running() {
        let mut state = AppState::new();
        tick_spinner(&mut state);
        assert_eq!(state.spinner_frame, 0);
        state.session.status = JobStatus::Running;
        tick_spinner(&mut state);
        assert_eq!(state.spinner_frame, 1);
    }
}
