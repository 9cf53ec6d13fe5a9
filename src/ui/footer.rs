use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme;
use crate::stats::SourceStatus;
use crate::util::format_count;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    samples: u64,
    slot: (usize, usize),
    status: &SourceStatus,
) {
    let hints = vec![
        Span::styled(" q", theme::key_hint_style()),
        Span::styled(" quit  ", theme::label_style()),
        Span::styled("?", theme::key_hint_style()),
        Span::styled(" help", theme::label_style()),
    ];

    let status_text = status.label();
    let status_width = (status_text.len() + 36).min(area.width as usize / 2) as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(status_width)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(hints)).style(theme::footer_style()),
        chunks[0],
    );

    let status_line = Line::from(vec![
        Span::styled(format_count(samples), theme::value_style()),
        Span::styled(" samples  ", theme::label_style()),
        Span::styled("slot ", theme::label_style()),
        Span::styled(format!("{}/{}  ", slot.0, slot.1), theme::value_style()),
        Span::styled(format!("{status_text} "), theme::status_style(status)),
    ]);
    frame.render_widget(
        Paragraph::new(status_line)
            .alignment(Alignment::Right)
            .style(theme::footer_style()),
        chunks[1],
    );
}
