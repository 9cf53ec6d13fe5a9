use std::time::{Duration, Instant};

/// Reconnect schedule for the stats stream: doubles on every failure up to
/// `max`, back to `initial` once a connection succeeds.
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
    next_retry_at: Instant,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        let initial = initial.max(Duration::from_millis(1));
        Self {
            initial,
            max: max.max(initial),
            current: initial,
            next_retry_at: Instant::now(),
        }
    }

    pub fn mark_failure(&mut self, now: Instant) {
        self.next_retry_at = now + self.current;
        self.current = (self.current * 2).min(self.max);
    }

    pub fn mark_success(&mut self, now: Instant) {
        self.current = self.initial;
        self.next_retry_at = now;
    }

    /// How long to sleep before the next attempt.
    pub fn wait_time(&self, now: Instant) -> Duration {
        self.next_retry_at.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_up_to_cap() {
        let mut backoff = Backoff::new(Duration::from_millis(500), Duration::from_secs(2));
        let now = Instant::now();
        let waits: Vec<u128> = (0..5)
            .map(|_| {
                backoff.mark_failure(now);
                backoff.wait_time(now).as_millis()
            })
            .collect();
        assert_eq!(waits, vec![500, 1000, 2000, 2000, 2000]);
    }

    #[test]
    fn success_resets_delay() {
        let mut backoff = Backoff::new(Duration::from_millis(100), Duration::from_secs(1));
        let now = Instant::now();
        backoff.mark_failure(now);
        backoff.mark_failure(now);
        backoff.mark_success(now);
        assert_eq!(backoff.wait_time(now), Duration::ZERO);
        backoff.mark_failure(now);
        assert_eq!(backoff.wait_time(now), Duration::from_millis(100));
    }
}
