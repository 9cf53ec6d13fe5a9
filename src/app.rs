use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::event::{AppEvent, EventSource};
use crate::metrics::CpuUsageWidget;
use crate::stats::{SourceStatus, StatsSource};

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub hostname: String,
    pub target: String,
    pub source_label: String,
    pub source_status: SourceStatus,
    pub cpu: CpuUsageWidget,
    pub chart_width: u16,
    events: EventSource,
}

impl App {
    pub fn new(source: &StatsSource, events: EventSource) -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        Self {
            running: true,
            show_help: false,
            hostname,
            target: source.target().to_string(),
            source_label: source.describe(),
            source_status: SourceStatus::Connecting,
            cpu: CpuUsageWidget::new(),
            chart_width: 0,
            events,
        }
    }

    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> color_eyre::Result<()> {
        let poll_timeout = Duration::from_millis(250);

        while self.running {
            terminal.draw(|frame| {
                self.chart_width = crate::ui::layout::compute_layout(frame.area()).body.width;
                crate::ui::render(frame, self);
            })?;

            // Keep the plotted window matched to the chart between samples
            if self.cpu.chart_width() != self.chart_width {
                self.cpu.refresh_window(self.chart_width);
            }

            let event = self.events.next(poll_timeout)?;
            self.handle_event(event);
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Stats(snapshot) => self.cpu.handle_stats(&snapshot, self.chart_width),
            AppEvent::Source(status) => {
                tracing::info!(status = %status.label(), "stats source");
                self.source_status = status;
            }
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false
            }
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }
}
