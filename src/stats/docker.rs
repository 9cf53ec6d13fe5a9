use super::backoff::Backoff;
use super::{SourceStatus, StatsMessage, StatsSnapshot};
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const RETRY_INITIAL: Duration = Duration::from_millis(500);
const RETRY_MAX: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct DaemonError {
    message: String,
}

enum StreamEnd {
    Closed(String),
    ReceiverGone,
}

pub fn stats_url(host: &str, container: &str) -> String {
    format!(
        "{}/containers/{}/stats?stream=true",
        host.trim_end_matches('/'),
        container
    )
}

pub fn spawn(host: String, container: String, tx: mpsc::Sender<StatsMessage>) {
    thread::spawn(move || run(&host, &container, &tx));
}

fn run(host: &str, container: &str, tx: &mpsc::Sender<StatsMessage>) {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(2))
        .timeout_read(Duration::from_secs(30))
        .build();
    let url = stats_url(host, container);
    let mut backoff = Backoff::new(RETRY_INITIAL, RETRY_MAX);

    loop {
        if tx
            .send(StatsMessage::Status(SourceStatus::Connecting))
            .is_err()
        {
            return;
        }

        let reason = match agent.get(&url).call() {
            Ok(resp) => {
                backoff.mark_success(Instant::now());
                tracing::info!(%url, "stats stream connected");
                if tx
                    .send(StatsMessage::Status(SourceStatus::Connected))
                    .is_err()
                {
                    return;
                }
                match forward_lines(BufReader::new(resp.into_reader()), tx) {
                    StreamEnd::ReceiverGone => return,
                    StreamEnd::Closed(reason) => reason,
                }
            }
            Err(ureq::Error::Status(code, resp)) => {
                describe_status(code, resp.into_string().unwrap_or_default())
            }
            Err(err) => err.to_string(),
        };

        backoff.mark_failure(Instant::now());
        tracing::warn!(%reason, "stats stream interrupted");
        if tx
            .send(StatsMessage::Status(SourceStatus::Disconnected(reason)))
            .is_err()
        {
            return;
        }
        thread::sleep(backoff.wait_time(Instant::now()));
    }
}

/// Decode newline-delimited stats objects and hand them to the UI thread.
fn forward_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<StatsMessage>) -> StreamEnd {
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(err) => return StreamEnd::Closed(err.to_string()),
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<StatsSnapshot>(&line) {
            Ok(snapshot) => {
                if tx.send(StatsMessage::Snapshot(snapshot)).is_err() {
                    return StreamEnd::ReceiverGone;
                }
            }
            Err(err) => tracing::debug!(%err, "skipping undecodable stats line"),
        }
    }
    StreamEnd::Closed("stream closed by daemon".to_string())
}

fn describe_status(code: u16, body: String) -> String {
    match serde_json::from_str::<DaemonError>(&body) {
        Ok(e) => format!("HTTP {code}: {}", e.message),
        Err(_) => format!("HTTP {code}"),
    }
}
