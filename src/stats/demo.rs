use super::{CpuStats, CpuUsage, SourceStatus, StatsMessage, StatsSnapshot};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Synthetic cumulative counters with a slowly drifting load, shaped like
/// what the Docker daemon reports.
pub struct DemoCounters {
    num_cpus: usize,
    interval: Duration,
    tick: u64,
    cpu_total: u64,
    system_total: u64,
}

impl DemoCounters {
    pub fn new(interval: Duration, num_cpus: usize) -> Self {
        Self {
            num_cpus: num_cpus.max(1),
            interval,
            tick: 0,
            cpu_total: 0,
            system_total: 0,
        }
    }

    /// Fraction of the whole host the fake container is using this tick.
    fn load(&self) -> f64 {
        let t = self.tick as f64;
        let wave = 0.35 + 0.25 * (t / 15.0).sin() + 0.1 * (t / 3.7).sin();
        wave.clamp(0.02, 1.0) / self.num_cpus as f64
    }

    pub fn next_snapshot(&mut self) -> StatsSnapshot {
        self.tick += 1;
        // The system counter advances by wall time across every CPU.
        let system_delta = (self.interval.as_nanos() as u64).max(1) * self.num_cpus as u64;
        let cpu_delta = ((system_delta as f64 * self.load()) as u64).max(1);
        self.system_total += system_delta;
        self.cpu_total += cpu_delta;

        let per_cpu = self.cpu_total / self.num_cpus as u64;
        StatsSnapshot {
            cpu_stats: CpuStats {
                cpu_usage: CpuUsage {
                    total_usage: self.cpu_total,
                    percpu_usage: Some(vec![per_cpu; self.num_cpus]),
                },
                system_cpu_usage: Some(self.system_total),
                online_cpus: Some(self.num_cpus as u32),
            },
        }
    }
}

pub fn spawn(interval: Duration, num_cpus: usize, tx: mpsc::Sender<StatsMessage>) {
    thread::spawn(move || {
        tracing::info!(?interval, num_cpus, "starting demo stats source");
        let mut counters = DemoCounters::new(interval, num_cpus);
        if tx.send(StatsMessage::Status(SourceStatus::Connected)).is_err() {
            return;
        }
        loop {
            thread::sleep(interval);
            if tx
                .send(StatsMessage::Snapshot(counters.next_snapshot()))
                .is_err()
            {
                tracing::debug!("demo stats receiver dropped");
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_strictly_increase() {
        let mut counters = DemoCounters::new(Duration::from_secs(1), 4);
        let mut prev = counters.next_snapshot();
        for _ in 0..200 {
            let next = counters.next_snapshot();
            assert!(next.cpu_total() > prev.cpu_total());
            assert!(next.system_total() > prev.system_total());
            assert_eq!(next.num_cpus(), 4);
            prev = next;
        }
    }

    #[test]
    fn usage_stays_within_one_cpu_share() {
        let mut counters = DemoCounters::new(Duration::from_millis(500), 2);
        let mut prev = counters.next_snapshot();
        for _ in 0..100 {
            let next = counters.next_snapshot();
            let cpu = (next.cpu_total() - prev.cpu_total()) as f64;
            let system = (next.system_total() - prev.system_total()) as f64;
            let ratio = cpu / system;
            assert!(ratio > 0.0 && ratio <= 1.0, "ratio {ratio}");
            prev = next;
        }
    }
}
