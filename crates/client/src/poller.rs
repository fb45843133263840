use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Drives the periodic `/logs` refresh. The load-time fetch is part of
/// `App::boot`, so the first tick fires one full period after start.
#[derive(Debug, Clone, Copy)]
pub struct LogPoller {
    period: Duration,
}

impl LogPoller {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn ticker(&self) -> Interval {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        // Missed ticks are delayed, never burst.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}
