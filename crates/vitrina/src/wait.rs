//! Wait policy: timeout classes per operation kind and the deadline helper
//! the driver polls against.
//!
//! Every suspension point in the suite is bounded. Operation classes carry
//! distinct budgets: short probes that branch on absence, standard element
//! and modal waits, full page navigations, and one-shot dialog observation.

use std::time::{Duration, Instant};

/// Budget for bounded probes that return a boolean instead of failing.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Budget for standard element, modal, and table waits.
pub const STANDARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Budget for full page navigations.
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Budget for one-shot dialog observation.
pub const DIALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Default budget for a whole scenario, orchestrator-level.
pub const SCENARIO_TIMEOUT: Duration = Duration::from_secs(120);

/// Interval between condition polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Spacing between the consecutive polls of a stability check.
pub const SETTLE_INTERVAL: Duration = Duration::from_millis(250);

/// A running bounded wait.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    /// Start a deadline with the given budget.
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    /// Whether the budget is spent.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    /// The total budget in milliseconds, for error reporting.
    #[must_use]
    pub fn budget_ms(&self) -> u64 {
        u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX)
    }

    /// Sleep for one poll interval, clamped to the remaining budget.
    pub async fn tick(&self, interval: Duration) {
        let remaining = self.budget.saturating_sub(self.started.elapsed());
        tokio::time::sleep(interval.min(remaining)).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deadline_is_not_expired() {
        let deadline = Deadline::after(Duration::from_secs(5));
        assert!(!deadline.expired());
    }

    #[test]
    fn zero_budget_expires_immediately() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
    }

    #[test]
    fn budget_ms_reports_the_budget() {
        let deadline = Deadline::after(Duration::from_millis(1500));
        assert_eq!(deadline.budget_ms(), 1500);
    }

    #[test]
    fn operation_classes_are_ordered() {
        // Probes are the shortest class; navigations the longest wait the
        // page layer performs.
        assert!(PROBE_TIMEOUT < STANDARD_TIMEOUT);
        assert!(STANDARD_TIMEOUT < NAVIGATION_TIMEOUT);
        assert!(NAVIGATION_TIMEOUT < SCENARIO_TIMEOUT);
    }

    #[tokio::test]
    async fn tick_never_sleeps_past_the_budget() {
        let deadline = Deadline::after(Duration::from_millis(30));
        let start = Instant::now();
        deadline.tick(Duration::from_secs(10)).await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
