use std::time::Duration;

/// Retry policy applied uniformly to every node execution
///
/// The schedule-to-close timeout bounds the whole retry sequence, waits
/// included, not a single attempt.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub backoff_coefficient: f64,
    pub max_interval: Duration,
    pub max_attempts: u32,
    pub schedule_to_close: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(2),
            backoff_coefficient: 2.0,
            max_interval: Duration::from_secs(10),
            max_attempts: 3,
            schedule_to_close: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Wait before the attempt after `interval`, capped at `max_interval`.
    pub fn next_interval(&self, interval: Duration) -> Duration {
        interval.mul_f64(self.backoff_coefficient).min(self.max_interval)
    }
}
