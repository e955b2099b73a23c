//! Per-flow delay accumulator and the shared map it lives in.

use std::collections::HashMap;
use std::sync::Arc;

use fluvia_packet::ProbeKey;
use tokio::sync::Mutex;

/// Delay statistics for one flow since the last drain. All delays are in
/// microseconds and may be negative under clock skew between probe sender
/// and this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub count: i64,
    pub delay_min: i64,
    pub delay_max: i64,
    pub delay_sum: i64,
    pub delay_mean: i64,
}

impl Stats {
    /// Starts a new accumulator from a single observation.
    pub fn new(delay_us: i64) -> Self {
        Self {
            count: 1,
            delay_min: delay_us,
            delay_max: delay_us,
            delay_sum: delay_us,
            delay_mean: delay_us,
        }
    }

    /// Folds another observation in: increments count, updates min/max,
    /// adds to the running sum, and recomputes the mean by integer divide.
    pub fn upsert(&mut self, delay_us: i64) {
        self.count += 1;
        self.delay_min = self.delay_min.min(delay_us);
        self.delay_max = self.delay_max.max(delay_us);
        self.delay_sum += delay_us;
        self.delay_mean = self.delay_sum / self.count;
    }
}

/// The meter's aggregation map, shared between `read_loop` (upserts) and
/// `send_loop` (drains) under a single mutex — both sides mutate, so
/// there's no reader-priority case to get wrong.
pub type SharedStats = Arc<Mutex<HashMap<ProbeKey, Stats>>>;

pub fn new_shared_stats() -> SharedStats {
    Arc::new(Mutex::new(HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn aggregates_three_observations() {
        let mut stats = Stats::new(100);
        stats.upsert(300);
        stats.upsert(200);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.delay_min, 100);
        assert_eq!(stats.delay_max, 300);
        assert_eq!(stats.delay_sum, 600);
        assert_eq!(stats.delay_mean, 200);
    }

    #[test]
    fn handles_negative_delays_under_clock_skew() {
        let mut stats = Stats::new(-50);
        stats.upsert(50);
        assert_eq!(stats.delay_min, -50);
        assert_eq!(stats.delay_max, 50);
        assert_eq!(stats.delay_mean, 0);
    }
}
