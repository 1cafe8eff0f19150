//! CPU and RAM gauges.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::data::state::AppState;

/// Draw both gauges inside one bordered box.
pub fn draw(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = state.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim()))
        .title(" System ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(inner);

    for (row, (name, usage)) in rows
        .iter()
        .zip([("CPU", state.cpu_usage), ("RAM", state.ram_usage)])
    {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme.gauge()))
            .percent(u16::from(usage.min(100)))
            .label(format!("{} {}%", name, usage));
        frame.render_widget(gauge, *row);
    }
}
