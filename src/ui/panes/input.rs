//! Command input box.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::buffer::COMMAND_MAX_LEN;
use crate::data::state::AppState;
use crate::queries::session::spinner;

/// Draw the input line and place the cursor after it.
pub fn draw(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = state.theme;

    let title = match spinner(state) {
        Some(glyph) => format!(" Command {} ", glyph),
        None => " Command ".to_string(),
    };

    let content = vec![
        Line::from(format!("> {}", state.input.as_str())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}/{} bytes", state.input.len(), COMMAND_MAX_LEN),
            Style::default().fg(theme.dim()),
        )),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent()))
            .title(title),
    );
    frame.render_widget(paragraph, area);

    let cursor_x = area.x + 3 + state.input.as_str().chars().count() as u16;
    let cursor_y = area.y + 1;
    if cursor_x < area.x + area.width.saturating_sub(1) {
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
