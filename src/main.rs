mod app;
mod config;
mod event;
mod metrics;
mod stats;
mod ui;
mod util;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use app::App;
use config::Config;
use event::EventSource;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    if let Some(path) = config.log_file.as_deref() {
        init_logging(path)?;
    }

    let source = config.stats_source()?;
    tracing::info!(source = %source.describe(), container = source.target(), "contmon starting");
    let events = EventSource::new(source.spawn());
    let mut app = App::new(&source, events);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

// The terminal belongs to the chart, so logs only ever go to a file.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
