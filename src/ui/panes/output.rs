//! Output box: the wrapped capture of the current command.

use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::state::AppState;
use crate::queries::output::{wrap_output, WRAP_COLS};

/// Draw the wrapped output, offset by the current scroll position.
pub fn draw(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = state.theme;
    let wrapped = wrap_output(state.session.output.as_bytes());

    let lines: Vec<Line> = wrapped
        .lines()
        .iter()
        .map(|line| Line::from(visible_text(line)))
        .collect();

    let mut title = if state.session.command.is_empty() {
        " Output ".to_string()
    } else {
        format!(" Output: {} ", state.session.command)
    };
    if state.session.output.dropped() > 0 {
        title.push_str("(truncated) ");
    }

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg()))
        .scroll((state.scroll_offset, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.dim()))
                .title(title),
        );

    frame.render_widget(paragraph, area);
}

/// Interpret one wrapped line as a terminal would and keep only what it
/// would show. Escape sequences, carriage returns and bells never reach the
/// host terminal.
fn visible_text(line: &[u8]) -> String {
    let mut parser = vt100::Parser::new(1, WRAP_COLS as u16, 0);
    parser.process(line);
    parser.screen().contents()
}
