pub mod footer;
pub mod header;
pub mod help;
pub mod layout;
pub mod theme;
pub mod widgets;

use ratatui::Frame;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(
        frame,
        app_layout.header,
        &app.hostname,
        &app.target,
        &app.source_label,
    );

    widgets::cpu_chart::render(frame, app_layout.body, &app.cpu);

    footer::render(
        frame,
        app_layout.footer,
        app.cpu.samples,
        (app.cpu.sampler().head(), app.cpu.sampler().capacity()),
        &app.source_status,
    );

    if app.show_help {
        help::render(frame, area);
    }
}
