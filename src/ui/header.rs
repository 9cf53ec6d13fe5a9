use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme;

pub fn render(frame: &mut Frame, area: Rect, hostname: &str, target: &str, source: &str) {
    let line = Line::from(vec![
        Span::styled(" contmon ", theme::title_style()),
        Span::styled(format!("  {hostname}"), theme::value_style()),
        Span::styled("  container ", theme::label_style()),
        Span::styled(target.to_string(), theme::value_style()),
        Span::styled(format!("  via {source}"), theme::label_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(theme::header_style()), area);
}
