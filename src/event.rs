use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use crate::stats::{SourceStatus, StatsMessage, StatsSnapshot};

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Stats(StatsSnapshot),
    Source(SourceStatus),
}

/// Merges the stats channel and terminal input into one serialized stream.
pub struct EventSource {
    stats: mpsc::Receiver<StatsMessage>,
    closed: bool,
}

impl EventSource {
    pub fn new(stats: mpsc::Receiver<StatsMessage>) -> Self {
        Self {
            stats,
            closed: false,
        }
    }

    /// Pending stats win over terminal input; only when none are queued does
    /// this block on the terminal for up to `timeout`.
    pub fn next(&mut self, timeout: Duration) -> color_eyre::Result<AppEvent> {
        if !self.closed {
            match self.stats.try_recv() {
                Ok(StatsMessage::Snapshot(snapshot)) => return Ok(AppEvent::Stats(snapshot)),
                Ok(StatsMessage::Status(status)) => return Ok(AppEvent::Source(status)),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    return Ok(AppEvent::Source(SourceStatus::Closed));
                }
            }
        }
        poll_event(timeout)
    }
}

pub fn poll_event(timeout: Duration) -> color_eyre::Result<AppEvent> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(AppEvent::Key(key)),
            Event::Resize(_, _) => Ok(AppEvent::Resize),
            _ => Ok(AppEvent::Tick),
        }
    } else {
        Ok(AppEvent::Tick)
    }
}
