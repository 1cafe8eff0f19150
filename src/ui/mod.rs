//! UI layer: event loop, key/mouse dispatch, and rendering coordination.

pub mod app;
pub mod panes;

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::actions::runner::CommandRunner;
use crate::actions::telemetry::Telemetry;
use crate::data::event::Effect;
use crate::data::state::AppState;
use crate::error::Result;
use crate::queries::session::status_label;
use crate::transforms::input::{self, KEY_SCROLL_STEP, WHEEL_SCROLL_STEP};
use app::Settings;

/// Stores layout information for mouse handling.
struct LayoutAreas {
    output_pane: Rect,
}

fn main_loop(
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    runner: &mut CommandRunner,
    telemetry: &mut Telemetry,
    settings: &Settings,
) -> Result<()> {
    let mut layout_areas: Option<LayoutAreas> = None;

    while !state.should_quit {
        // Pull worker output into the session
        runner.poll(&mut state.session);

        if let Some((cpu, ram)) = telemetry.refresh(Instant::now()) {
            state.cpu_usage = cpu;
            state.ram_usage = ram;
        }
        input::tick_spinner(state);

        terminal.draw(|frame| {
            layout_areas = Some(draw(frame, state));
        })?;

        if event::poll(settings.tick)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        state.notice = None;
                        if let Some(effect) = handle_key(state, key.code, key.modifiers) {
                            apply_effect(state, runner, effect);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(ref areas) = layout_areas {
                        handle_mouse(state, mouse, areas);
                    }
                }
                Event::Paste(text) => input::insert_str(state, &text),
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_mouse(state: &mut AppState, mouse: crossterm::event::MouseEvent, areas: &LayoutAreas) {
    if !areas.output_pane.contains((mouse.column, mouse.row).into()) {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => input::scroll_up(state, WHEEL_SCROLL_STEP),
        MouseEventKind::ScrollDown => input::scroll_down(state, WHEEL_SCROLL_STEP),
        _ => {}
    }
}

fn handle_key(state: &mut AppState, key: KeyCode, modifiers: KeyModifiers) -> Option<Effect> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => input::cancel(state),
            KeyCode::Char('q') => Some(input::request_quit(state)),
            _ => None,
        };
    }

    match key {
        KeyCode::Esc => return Some(input::request_quit(state)),
        KeyCode::Enter => return input::submit(state),
        KeyCode::Backspace => input::backspace(state),
        KeyCode::Up => input::scroll_up(state, KEY_SCROLL_STEP),
        KeyCode::Down => input::scroll_down(state, KEY_SCROLL_STEP),
        KeyCode::F(2) => input::toggle_theme(state),
        KeyCode::Char(c) => input::insert_char(state, c),
        _ => {}
    }
    None
}

fn apply_effect(state: &mut AppState, runner: &mut CommandRunner, effect: Effect) {
    match effect {
        Effect::Submit(command) => {
            if let Err(e) = runner.submit(&mut state.session, &command) {
                // Give the text back so it can be resubmitted
                state.input.push_str(&command);
                state.notice = Some(e.to_string());
            }
        }
        Effect::Cancel => {
            runner.cancel();
        }
        Effect::Quit => state.should_quit = true,
    }
}

fn draw(frame: &mut Frame, state: &AppState) -> LayoutAreas {
    let size = frame.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Title
            Constraint::Length(6),  // Gauges + input
            Constraint::Min(5),     // Output
            Constraint::Length(1),  // Status bar
        ])
        .split(size);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    panes::header::draw(frame, state, main_chunks[0]);
    panes::gauges::draw(frame, state, top_chunks[0]);
    panes::input::draw(frame, state, top_chunks[1]);
    panes::output::draw(frame, state, main_chunks[2]);
    draw_status_bar(frame, state, main_chunks[3]);

    LayoutAreas {
        output_pane: main_chunks[2],
    }
}

fn draw_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = state.theme;

    let status = match &state.notice {
        Some(notice) => format!(" {} ", notice),
        None => format!(
            " {} │ [Enter] Run │ [Ctrl+C] Cancel │ [↑/↓] Scroll │ [F2] Theme │ [Esc] Quit ",
            status_label(&state.session)
        ),
    };

    let paragraph = Paragraph::new(Line::from(status))
        .style(Style::default().bg(theme.dim()).fg(theme.fg()));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::session::JobStatus;

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(state, KeyCode::Char(c), KeyModifiers::NONE), None);
        }
    }

    #[test]
    fn test_enter_submits_typed_command() {
        let mut state = AppState::new();
        type_text(&mut state, "uname -a");
        let effect = handle_key(&mut state, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(effect, Some(Effect::Submit("uname -a".to_string())));
        assert!(state.input.is_empty());
    }

    #[test]
    fn test_ctrl_c_cancels_only_running() {
        let mut state = AppState::new();
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL),
            None
        );
        assert!(state.input.is_empty());

        state.session.status = JobStatus::Running;
        assert_eq!(
            handle_key(&mut state, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Effect::Cancel)
        );
    }

    #[test]
    fn test_escape_quits() {
        let mut state = AppState::new();
        assert_eq!(
            handle_key(&mut state, KeyCode::Esc, KeyModifiers::NONE),
            Some(Effect::Quit)
        );
        assert!(state.should_quit);
    }

    #[test]
    fn test_arrows_scroll_output() {
        let mut state = AppState::new();
        handle_key(&mut state, KeyCode::Down, KeyModifiers::NONE);
        handle_key(&mut state, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(state.scroll_offset, 4);
        handle_key(&mut state, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(state.scroll_offset, 2);
    }

    #[test]
    fn test_busy_submission_restores_input() {
        let mut state = AppState::new();
        let mut runner = CommandRunner::new(Default::default());
        runner.submit(&mut state.session, "sleep 0.2").unwrap();
        apply_effect(&mut state, &mut runner, Effect::Submit("echo later".to_string()));
        assert_eq!(state.input.as_str(), "echo later");
        assert_eq!(state.notice.as_deref(), Some("A command is already running"));
        assert_eq!(state.session.command, "sleep 0.2");
        assert!(runner.wait(&mut state.session, std::time::Duration::from_secs(10)));
    }
}
