//! Debounce/confirmation controller.
//!
//! The phase is never persisted: it is derived from the stored
//! [`NotificationState`] at the start of each cycle, and `PendingRecovery`
//! only exists in memory while a cycle waits for its single re-check.

use std::time::Duration;

use powerwatch_core::NotificationState;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stable,
    Outage,
    PendingRecovery,
}

impl Phase {
    /// `Outage` iff the live message currently reports an outage.
    #[must_use]
    pub fn from_state(state: &NotificationState) -> Self {
        if state.reports_outage() {
            Phase::Outage
        } else {
            Phase::Stable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to send.
    Idle,
    /// Publish the outage (send or edit; the notifier may still suppress).
    Publish,
    /// Wait a randomized delay, then re-sample once.
    ScheduleRecheck,
    /// The re-check agreed: publish the recovery.
    ConfirmRecovery,
}

/// Pure transition table.
///
/// `fingerprint_changed` compares the current sample against the stored
/// `last_update_hash` and only matters while in `Outage`.
#[must_use]
pub fn transition(phase: Phase, is_outage: bool, fingerprint_changed: bool) -> (Phase, Decision) {
    match (phase, is_outage) {
        (Phase::Stable, true) => (Phase::Outage, Decision::Publish),
        (Phase::Stable, false) => (Phase::Stable, Decision::Idle),
        (Phase::Outage, true) if fingerprint_changed => (Phase::Outage, Decision::Publish),
        (Phase::Outage, true) => (Phase::Outage, Decision::Idle),
        (Phase::Outage, false) => (Phase::PendingRecovery, Decision::ScheduleRecheck),
        (Phase::PendingRecovery, false) => (Phase::Stable, Decision::ConfirmRecovery),
        (Phase::PendingRecovery, true) => (Phase::Outage, Decision::Publish),
    }
}

/// Bounds of the uniformly distributed recovery re-check delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecheckDelay {
    min: Duration,
    max: Duration,
}

impl RecheckDelay {
    /// Builds the range; bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    #[must_use]
    pub fn from_secs(min_secs: u64, max_secs: u64) -> Self {
        Self::new(Duration::from_secs(min_secs), Duration::from_secs(max_secs))
    }

    #[must_use]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw one delay, millisecond resolution, inclusive on both ends.
    #[must_use]
    pub fn sample(&self) -> Duration {
        #[allow(clippy::cast_possible_truncation)]
        let (lo, hi) = (self.min.as_millis() as u64, self.max.as_millis() as u64);
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

impl Default for RecheckDelay {
    /// Five to ten minutes.
    fn default() -> Self {
        Self::from_secs(5 * 60, 10 * 60)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn stable_to_outage_publishes() {
        assert_eq!(
            transition(Phase::Stable, true, true),
            (Phase::Outage, Decision::Publish)
        );
        // Even an unchanged fingerprint publishes from Stable.
        assert_eq!(
            transition(Phase::Stable, true, false),
            (Phase::Outage, Decision::Publish)
        );
    }

    #[test]
    fn stable_stays_idle_without_outage() {
        for changed in [true, false] {
            assert_eq!(
                transition(Phase::Stable, false, changed),
                (Phase::Stable, Decision::Idle)
            );
        }
    }

    #[test]
    fn outage_with_same_fingerprint_is_suppressed() {
        assert_eq!(
            transition(Phase::Outage, true, false),
            (Phase::Outage, Decision::Idle)
        );
    }

    #[test]
    fn outage_with_new_fingerprint_publishes() {
        assert_eq!(
            transition(Phase::Outage, true, true),
            (Phase::Outage, Decision::Publish)
        );
    }

    #[test]
    fn outage_to_no_outage_schedules_single_recheck() {
        for changed in [true, false] {
            assert_eq!(
                transition(Phase::Outage, false, changed),
                (Phase::PendingRecovery, Decision::ScheduleRecheck)
            );
        }
    }

    #[test]
    fn pending_recovery_confirms_or_aborts() {
        assert_eq!(
            transition(Phase::PendingRecovery, false, true),
            (Phase::Stable, Decision::ConfirmRecovery)
        );
        assert_eq!(
            transition(Phase::PendingRecovery, true, false),
            (Phase::Outage, Decision::Publish)
        );
    }

    #[test]
    fn phase_is_derived_from_state() {
        assert_eq!(Phase::from_state(&NotificationState::default()), Phase::Stable);

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let outage = NotificationState::published("1".into(), true, day, "h".into());
        assert_eq!(Phase::from_state(&outage), Phase::Outage);

        let recovered = NotificationState::published("1".into(), false, day, "h".into());
        assert_eq!(Phase::from_state(&recovered), Phase::Stable);

        // An outage flag without a message id cannot be "live".
        let orphan = NotificationState {
            is_outage: true,
            ..NotificationState::default()
        };
        assert_eq!(Phase::from_state(&orphan), Phase::Stable);
    }

    #[test]
    fn default_delay_is_five_to_ten_minutes() {
        let delay = RecheckDelay::default();
        assert_eq!(delay.min(), Duration::from_secs(300));
        assert_eq!(delay.max(), Duration::from_secs(600));
        for _ in 0..100 {
            let d = delay.sample();
            assert!(d >= delay.min() && d <= delay.max(), "out of range: {d:?}");
        }
    }

    #[test]
    fn swapped_bounds_are_normalised() {
        let delay = RecheckDelay::from_secs(10, 2);
        assert_eq!(delay.min(), Duration::from_secs(2));
        assert_eq!(delay.max(), Duration::from_secs(10));
    }

    #[test]
    fn zero_width_range_samples_exactly() {
        let delay = RecheckDelay::from_secs(0, 0);
        assert_eq!(delay.sample(), Duration::ZERO);
    }
}
