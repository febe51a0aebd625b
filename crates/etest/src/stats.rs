//! Run statistics and process exit status

use std::process::ExitCode;

/// Pass/fail counters for a session
///
/// Counters only ever grow between resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub success_count: u64,
    pub failure_count: u64,
}

impl Statistics {
    pub fn new(success_count: u64, failure_count: u64) -> Self {
        Self {
            success_count,
            failure_count,
        }
    }

    /// Number of tests run
    pub fn total(&self) -> u64 {
        self.success_count + self.failure_count
    }

    /// Counts accumulated since `snapshot` was taken
    ///
    /// A counter that dropped below the snapshot (the session was reset in
    /// between) yields 0.
    pub fn since(&self, snapshot: &Statistics) -> Statistics {
        Statistics {
            success_count: self.success_count.saturating_sub(snapshot.success_count),
            failure_count: self.failure_count.saturating_sub(snapshot.failure_count),
        }
    }

    pub(crate) fn record(&mut self, passed: bool) {
        if passed {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }
}

/// Process exit status derived from a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl ExitStatus {
    /// `Success` iff no failures were recorded
    pub fn from_stats(stats: &Statistics) -> Self {
        if stats.failure_count == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }

    /// Numeric process exit code (0 or 1)
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitStatus::Success
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_record() {
        let mut stats = Statistics::default();
        stats.record(true);
        stats.record(false);
        stats.record(true);
        assert_eq!(stats, Statistics::new(2, 1));
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn test_since_snapshot() {
        let snapshot = Statistics::new(3, 1);
        let now = Statistics::new(5, 4);
        assert_eq!(now.since(&snapshot), Statistics::new(2, 3));
        assert_eq!(now.since(&now), Statistics::default());
    }

    #[test]
    fn test_since_snapshot_after_reset() {
        let snapshot = Statistics::new(5, 2);
        let after_reset = Statistics::new(0, 1);
        assert_eq!(after_reset.since(&snapshot), Statistics::new(0, 0));
        assert_eq!(Statistics::new(7, 0).since(&snapshot), Statistics::new(2, 0));
    }

    #[test]
    fn test_exit_status_codes() {
        assert_eq!(ExitStatus::Success.code(), 0);
        assert_eq!(ExitStatus::Failure.code(), 1);
        assert_eq!(
            ExitStatus::from_stats(&Statistics::new(10, 0)),
            ExitStatus::Success
        );
        assert_eq!(
            ExitStatus::from_stats(&Statistics::new(0, 1)),
            ExitStatus::Failure
        );
    }

    proptest! {
        #[test]
        fn prop_exit_status_iff_no_failures(s in 0u64..10_000, f in 0u64..10_000) {
            let status = ExitStatus::from_stats(&Statistics::new(s, f));
            prop_assert_eq!(status.is_success(), f == 0);
        }

        #[test]
        fn prop_record_sequence(outcomes in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut stats = Statistics::new(4, 2);
            let before = stats;
            for passed in &outcomes {
                stats.record(*passed);
            }
            let passed = outcomes.iter().filter(|p| **p).count() as u64;
            let failed = outcomes.len() as u64 - passed;
            prop_assert_eq!(stats.since(&before), Statistics::new(passed, failed));
            prop_assert_eq!(stats.total(), before.total() + outcomes.len() as u64);
        }
    }
}
