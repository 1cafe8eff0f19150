//! Title header.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::data::state::AppState;

/// Draw the title and version lines.
pub fn draw(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = state.theme;
    let lines = vec![
        Line::from(Span::styled(
            " cmdterm · command terminal",
            Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(" version {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.dim()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
