use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::theme;
use crate::metrics::history::CPU_RANGE_SIZE;

pub fn render(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 12, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        header_line("Keys"),
        key_line("q / Esc", "Quit"),
        key_line("Ctrl+C", "Quit"),
        key_line("?", "Toggle this help"),
        Line::raw(""),
        header_line("Chart"),
        Line::from(Span::styled(
            format!("    Keeps {CPU_RANGE_SIZE} samples, then starts over from an empty chart."),
            theme::label_style(),
        )),
        Line::from(Span::styled(
            "    100% is one fully busy CPU.",
            theme::label_style(),
        )),
    ];

    let block = Block::default()
        .title(Line::styled(" Help ", theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .style(ratatui::style::Style::default().bg(theme::BASE));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn header_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(format!("  {text}"), theme::title_style()))
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<12}"), theme::key_hint_style()),
        Span::styled(desc, theme::label_style()),
    ])
}

fn centered_rect(width_pct: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_pct) / 2),
            Constraint::Percentage(width_pct),
            Constraint::Percentage((100 - width_pct) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
