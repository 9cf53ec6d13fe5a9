pub mod backoff;
pub mod demo;
pub mod docker;

use serde::Deserialize;
use std::sync::mpsc;
use std::time::Duration;

/// The slice of Docker's `StatsJSON` payload the CPU chart needs.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub cpu_stats: CpuStats,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CpuStats {
    #[serde(default)]
    pub cpu_usage: CpuUsage,
    #[serde(default)]
    pub system_cpu_usage: Option<u64>,
    #[serde(default)]
    pub online_cpus: Option<u32>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CpuUsage {
    #[serde(default)]
    pub total_usage: u64,
    #[serde(default)]
    pub percpu_usage: Option<Vec<u64>>,
}

impl StatsSnapshot {
    pub fn cpu_total(&self) -> u64 {
        self.cpu_stats.cpu_usage.total_usage
    }

    pub fn system_total(&self) -> u64 {
        self.cpu_stats.system_cpu_usage.unwrap_or(0)
    }

    /// Logical CPU count: the per-CPU list length, or `online_cpus` on
    /// cgroup v2 hosts where the daemon leaves that list out.
    pub fn num_cpus(&self) -> usize {
        match self.cpu_stats.cpu_usage.percpu_usage.as_deref() {
            Some(list) if !list.is_empty() => list.len(),
            _ => self.cpu_stats.online_cpus.unwrap_or(0) as usize,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SourceStatus {
    Connecting,
    Connected,
    Disconnected(String),
    Closed,
}

impl SourceStatus {
    pub fn label(&self) -> String {
        match self {
            SourceStatus::Connecting => "connecting".to_string(),
            SourceStatus::Connected => "streaming".to_string(),
            SourceStatus::Disconnected(reason) => format!("retrying: {reason}"),
            SourceStatus::Closed => "source stopped".to_string(),
        }
    }
}

pub enum StatsMessage {
    Snapshot(StatsSnapshot),
    Status(SourceStatus),
}

#[derive(Clone, Debug)]
pub enum StatsSource {
    Docker { host: String, container: String },
    Demo { interval: Duration, num_cpus: usize },
}

impl StatsSource {
    /// Start the producer thread. It runs until the receiver is dropped.
    pub fn spawn(&self) -> mpsc::Receiver<StatsMessage> {
        let (tx, rx) = mpsc::channel();
        match self.clone() {
            StatsSource::Docker { host, container } => {
                docker::spawn(host, container, tx);
            }
            StatsSource::Demo { interval, num_cpus } => {
                demo::spawn(interval, num_cpus, tx);
            }
        }
        rx
    }

    pub fn target(&self) -> &str {
        match self {
            StatsSource::Docker { container, .. } => container,
            StatsSource::Demo { .. } => "demo",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            StatsSource::Docker { host, .. } => format!("docker {host}"),
            StatsSource::Demo { interval, num_cpus } => {
                format!("synthetic {num_cpus} cpu @ {}ms", interval.as_millis())
            }
        }
    }
}
