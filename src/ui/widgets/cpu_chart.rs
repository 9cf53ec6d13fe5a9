use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Padding, Paragraph};
use ratatui::Frame;

use crate::metrics::cpu::CHART_RIGHT_PAD;
use crate::metrics::CpuUsageWidget;
use crate::ui::theme;

pub fn render(frame: &mut Frame, area: Rect, cpu: &CpuUsageWidget) {
    let state = &cpu.state;
    let block = Block::default()
        .title(Line::styled(format!(" {} ", state.title), theme::title_style()))
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .padding(Padding::new(0, CHART_RIGHT_PAD, 1, 0));

    if cpu.samples == 0 {
        let placeholder = Paragraph::new("Waiting for stats...")
            .style(theme::label_style())
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let points: Vec<(f64, f64)> = state
        .data
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let y_max = 100.0 * cpu.num_cpus.max(1) as f64;

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme::series_style())
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::axis_style())
                .bounds([0.0, x_max])
                .labels(axis_labels(&state.labels)),
        )
        .y_axis(
            Axis::default()
                .style(theme::axis_style())
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::from("0%"),
                    Span::from(format!("{:.0}%", y_max / 2.0)),
                    Span::from(format!("{:.0}%", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}

/// First, middle and last sample labels; the axis has no room for more.
fn axis_labels(labels: &[String]) -> Vec<Span<'static>> {
    match labels {
        [] => Vec::new(),
        [only] => vec![Span::from(only.clone())],
        [first, .., last] => {
            let mid = &labels[labels.len() / 2];
            vec![
                Span::from(first.clone()),
                Span::from(mid.clone()),
                Span::from(last.clone()),
            ]
        }
    }
}
