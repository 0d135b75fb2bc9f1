use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;

/// tracks how far daily accrual has been booked
///
/// catch-up is whole days only: after a run the anchor advances by the days
/// consumed, not to the clock, so a partial day keeps accumulating towards
/// the next run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccrualScheduler {
    last_accrual: DateTime<Utc>,
}

impl AccrualScheduler {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            last_accrual: start,
        }
    }

    pub fn last_accrual(&self) -> DateTime<Utc> {
        self.last_accrual
    }

    /// whole days elapsed since the last accrual run
    pub fn elapsed_days(&self, time_provider: &SafeTimeProvider) -> u32 {
        let elapsed = time_provider.now() - self.last_accrual;
        elapsed.num_days().max(0) as u32
    }

    /// consume the elapsed whole days, returning the count to accrue for
    pub fn mark_accrued(&mut self, time_provider: &SafeTimeProvider) -> u32 {
        let days = self.elapsed_days(time_provider);
        self.last_accrual = self.last_accrual + Duration::days(i64::from(days));
        days
    }
}
