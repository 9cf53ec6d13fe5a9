use super::history::History;
use crate::stats::StatsSnapshot;
use crate::util::format_usage_title;

/// Cells kept clear on each side of the plot inside the chart widget.
pub const CHART_RIGHT_PAD: u16 = 9;

/// Plot points a chart of `chart_width` cells can show. Braille markers put
/// two points in each cell.
pub fn compute_num_points(chart_width: u16) -> usize {
    chart_width.saturating_sub(CHART_RIGHT_PAD * 2) as usize * 2
}

/// Turns cumulative CPU counters into usage percentages and keeps them in a
/// reset-on-wrap history buffer.
pub struct RollingCpuSampler {
    previous_cpu_total: u64,
    previous_system_total: u64,
    history: History,
}

impl RollingCpuSampler {
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    pub fn with_history(history: History) -> Self {
        Self {
            previous_cpu_total: 0,
            previous_system_total: 0,
            history,
        }
    }

    /// Usage since the previous snapshot as a fraction of one CPU, scaled by
    /// `num_cpus`. Returns the new counters to persist.
    ///
    /// A zero system delta yields NaN or infinity; callers that care must
    /// check `is_finite`.
    pub fn compute_usage_percent(
        &self,
        current_cpu_total: u64,
        current_system_total: u64,
        num_cpus: usize,
    ) -> (f64, u64, u64) {
        let cpu_delta = current_cpu_total as f64 - self.previous_cpu_total as f64;
        let system_delta = current_system_total as f64 - self.previous_system_total as f64;
        (
            cpu_delta / system_delta * num_cpus as f64,
            current_cpu_total,
            current_system_total,
        )
    }

    /// `compute_usage_percent` plus persisting the counters.
    pub fn observe(
        &mut self,
        current_cpu_total: u64,
        current_system_total: u64,
        num_cpus: usize,
    ) -> f64 {
        let (pct, cpu_total, system_total) =
            self.compute_usage_percent(current_cpu_total, current_system_total, num_cpus);
        self.previous_cpu_total = cpu_total;
        self.previous_system_total = system_total;
        pct
    }

    pub fn record_sample(&mut self, percent: f64) {
        self.history.push(percent);
    }

    pub fn visible_window(&self, chart_width: u16) -> (Vec<f64>, Vec<String>) {
        let num_points = compute_num_points(chart_width);
        (
            self.history.window(num_points).to_vec(),
            self.history.labels(num_points),
        )
    }

    pub fn head(&self) -> usize {
        self.history.head()
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    #[cfg(test)]
    pub fn history(&self) -> &[f64] {
        self.history.as_slice()
    }

    #[cfg(test)]
    pub fn previous_counters(&self) -> (u64, u64) {
        (self.previous_cpu_total, self.previous_system_total)
    }
}

impl Default for RollingCpuSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// What the chart renderer reads on its next frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CpuChartState {
    pub title: String,
    pub data: Vec<f64>,
    pub labels: Vec<String>,
}

impl Default for CpuChartState {
    fn default() -> Self {
        Self {
            title: "CPU Usage".to_string(),
            data: Vec::new(),
            labels: Vec::new(),
        }
    }
}

pub struct CpuUsageWidget {
    sampler: RollingCpuSampler,
    pub state: CpuChartState,
    pub num_cpus: usize,
    pub samples: u64,
    chart_width: u16,
}

impl CpuUsageWidget {
    pub fn new() -> Self {
        Self::with_sampler(RollingCpuSampler::new())
    }

    pub fn with_sampler(sampler: RollingCpuSampler) -> Self {
        Self {
            sampler,
            state: CpuChartState::default(),
            num_cpus: 0,
            samples: 0,
            chart_width: 0,
        }
    }

    pub fn handle_stats(&mut self, stats: &StatsSnapshot, chart_width: u16) {
        let num_cpus = stats.num_cpus();
        let pct = self
            .sampler
            .observe(stats.cpu_total(), stats.system_total(), num_cpus);
        self.sampler.record_sample(pct * 100.0);
        self.num_cpus = num_cpus;
        self.samples += 1;
        self.state.title = format_usage_title(pct * 100.0);
        self.refresh_window(chart_width);
    }

    /// Re-slice the history for a new chart width without taking a sample.
    pub fn refresh_window(&mut self, chart_width: u16) {
        let (data, labels) = self.sampler.visible_window(chart_width);
        self.state.data = data;
        self.state.labels = labels;
        self.chart_width = chart_width;
    }

    pub fn chart_width(&self) -> u16 {
        self.chart_width
    }

    pub fn sampler(&self) -> &RollingCpuSampler {
        &self.sampler
    }
}

impl Default for CpuUsageWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::history::CPU_RANGE_SIZE;
    use crate::stats::{CpuStats, CpuUsage};

    fn snapshot(cpu: u64, system: u64, cpus: usize) -> StatsSnapshot {
        StatsSnapshot {
            cpu_stats: CpuStats {
                cpu_usage: CpuUsage {
                    total_usage: cpu,
                    percpu_usage: Some(vec![0; cpus]),
                },
                system_cpu_usage: Some(system),
                online_cpus: None,
            },
        }
    }

    #[test]
    fn first_observation_uses_absolute_counters() {
        let sampler = RollingCpuSampler::new();
        let (pct, cpu, system) = sampler.compute_usage_percent(250, 1000, 4);
        assert_eq!(pct, 1.0);
        assert_eq!((cpu, system), (250, 1000));
    }

    #[test]
    fn observe_persists_counters() {
        let mut sampler = RollingCpuSampler::new();
        sampler.observe(100, 1000, 2);
        assert_eq!(sampler.previous_counters(), (100, 1000));
        let pct = sampler.observe(150, 1100, 2);
        assert!((pct - 1.0).abs() < 1e-12);
        assert_eq!(sampler.previous_counters(), (150, 1100));
    }

    #[test]
    fn usage_is_bounded_by_cpu_count() {
        let mut sampler = RollingCpuSampler::new();
        let (mut cpu, mut system) = (0u64, 0u64);
        for step in 1..500u64 {
            let system_delta = 1_000 + step * 7;
            let cpu_delta = (step * 13) % system_delta + 1;
            cpu += cpu_delta;
            system += system_delta;
            let pct = sampler.observe(cpu, system, 8);
            assert!((0.0..=8.0).contains(&pct), "pct {pct} at step {step}");
        }
    }

    #[test]
    fn zero_system_delta_is_not_finite() {
        let mut sampler = RollingCpuSampler::new();
        sampler.observe(10, 100, 1);
        assert!(sampler.observe(20, 100, 1).is_infinite());
        assert!(sampler.observe(20, 100, 1).is_nan());
    }

    #[test]
    fn wrap_restarts_history_at_slot_zero() {
        let mut sampler = RollingCpuSampler::new();
        for _ in 0..=CPU_RANGE_SIZE {
            sampler.record_sample(50.0);
        }
        assert_eq!(sampler.head(), 0);
        assert_eq!(sampler.history()[0], 50.0);
        assert_eq!(sampler.history()[1], 0.0);
        assert_eq!(sampler.capacity(), CPU_RANGE_SIZE);
    }

    #[test]
    fn num_points_uses_braille_resolution() {
        assert_eq!(compute_num_points(80), 124);
        assert_eq!(compute_num_points(18), 0);
        assert_eq!(compute_num_points(5), 0);
    }

    #[test]
    fn window_and_labels_match_num_points() {
        let mut sampler = RollingCpuSampler::new();
        for i in 0..400 {
            sampler.record_sample(i as f64);
        }
        let (data, labels) = sampler.visible_window(80);
        assert_eq!(data.len(), 124);
        assert_eq!(labels.len(), 124);
        assert_eq!(data.first().copied(), Some(275.0));
        assert_eq!(data.last().copied(), Some(398.0));
        assert_eq!(labels[0], "275");
        assert_eq!(labels[123], "398");
    }

    #[test]
    fn wide_chart_shows_whole_buffer() {
        let sampler = RollingCpuSampler::new();
        let (data, labels) = sampler.visible_window(1000);
        assert_eq!(data.len(), CPU_RANGE_SIZE);
        assert_eq!(labels.len(), CPU_RANGE_SIZE);
    }

    #[test]
    fn widget_updates_chart_state() {
        let mut widget = CpuUsageWidget::new();
        widget.handle_stats(&snapshot(500, 1000, 2), 40);
        assert_eq!(widget.state.title, "CPU Usage: 100.00%");
        assert_eq!(widget.state.data.len(), 44);
        assert_eq!(widget.state.data[0], 100.0);
        assert_eq!(widget.state.labels.len(), 44);
        assert_eq!(widget.num_cpus, 2);

        widget.handle_stats(&snapshot(550, 1200, 2), 40);
        assert_eq!(widget.state.title, "CPU Usage: 50.00%");
        assert_eq!(widget.state.data[1], 50.0);
        assert_eq!(widget.samples, 2);
    }

    #[test]
    fn widget_reslices_on_resize() {
        let mut widget = CpuUsageWidget::new();
        widget.handle_stats(&snapshot(1, 10, 1), 40);
        widget.refresh_window(60);
        assert_eq!(widget.chart_width(), 60);
        assert_eq!(widget.state.data.len(), 84);
        assert_eq!(widget.samples, 1);
    }

    #[test]
    fn zero_system_delta_reaches_the_title() {
        let mut widget = CpuUsageWidget::new();
        widget.handle_stats(&snapshot(0, 0, 1), 40);
        assert_eq!(widget.state.title, "CPU Usage:   NaN%");
    }
}
