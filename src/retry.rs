//! Bounded retry with linear backoff, expressed as an explicit state machine.
//!
//! A generation call walks `Idle -> Attempting(n) -> {Succeeded |
//! Attempting(n+1) | Exhausted}`. The schedule itself never sleeps; it hands
//! the caller the delay to apply before each attempt, which keeps the
//! contract testable without a clock.

use crate::Error;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(2000);

/// How many attempts to make and how long to wait between them.
///
/// The delay before attempt `k` (k >= 2) is `base_delay * (k - 1)`: linear,
/// not exponential.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to apply before attempt `attempt` (1-based). The first attempt
    /// starts immediately.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 {
            None
        } else {
            Some(self.base_delay * (attempt - 1))
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Idle,
    Attempting(u32),
    Succeeded,
    Exhausted,
}

/// One attempt handed out by [`RetrySchedule::next_attempt`].
#[derive(Debug)]
pub struct Attempt {
    pub number: u32,
    pub delay: Option<Duration>,
}

/// Drives a single retry sequence and records the last error seen.
pub struct RetrySchedule {
    policy: RetryPolicy,
    state: RetryState,
    dispatched: bool,
    last_error: Option<Error>,
}

impl RetrySchedule {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RetryState::Idle,
            dispatched: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    /// Hand out the next attempt, or `None` once the sequence is terminal.
    pub fn next_attempt(&mut self) -> Option<Attempt> {
        match self.state {
            RetryState::Idle => {
                self.state = RetryState::Attempting(1);
                self.dispatched = true;
                Some(Attempt {
                    number: 1,
                    delay: None,
                })
            }
            RetryState::Attempting(n) if !self.dispatched => {
                self.dispatched = true;
                Some(Attempt {
                    number: n,
                    delay: self.policy.delay_before(n),
                })
            }
            _ => None,
        }
    }

    /// Record a failed attempt. Moves to `Exhausted` when the attempt budget
    /// is spent, otherwise queues the next attempt.
    pub fn record_failure(&mut self, error: Error) {
        if let RetryState::Attempting(n) = self.state {
            self.last_error = Some(error);
            if n >= self.policy.max_attempts() {
                self.state = RetryState::Exhausted;
            } else {
                self.state = RetryState::Attempting(n + 1);
                self.dispatched = false;
            }
        }
    }

    /// Record a successful attempt; the sequence is terminal afterwards.
    pub fn record_success(&mut self) {
        if matches!(self.state, RetryState::Attempting(_)) {
            self.state = RetryState::Succeeded;
        }
    }

    /// Consume the schedule and surface the last recorded error.
    pub fn into_last_error(self) -> Error {
        self.last_error
            .unwrap_or_else(|| Error::Generic("retry schedule ended without an attempt".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail() -> Error {
        Error::Generic("boom".to_string())
    }

    #[test]
    fn test_first_attempt_has_no_delay() {
        let mut schedule = RetrySchedule::new(RetryPolicy::new(3));
        let attempt = schedule.next_attempt().unwrap();
        assert_eq!(attempt.number, 1);
        assert!(attempt.delay.is_none());
        assert_eq!(schedule.state(), RetryState::Attempting(1));
    }

    #[test]
    fn test_backoff_is_linear_and_monotonic() {
        let policy = RetryPolicy::new(5);
        assert_eq!(policy.delay_before(1), None);
        assert_eq!(policy.delay_before(2), Some(Duration::from_millis(2000)));
        assert_eq!(policy.delay_before(3), Some(Duration::from_millis(4000)));
        assert_eq!(policy.delay_before(4), Some(Duration::from_millis(6000)));
        assert_eq!(policy.delay_before(5), Some(Duration::from_millis(8000)));
    }

    #[test]
    fn test_exactly_max_attempts_are_handed_out() {
        let mut schedule = RetrySchedule::new(RetryPolicy::new(3));
        let mut attempts = 0;
        while let Some(_attempt) = schedule.next_attempt() {
            attempts += 1;
            schedule.record_failure(fail());
        }
        assert_eq!(attempts, 3);
        assert_eq!(schedule.state(), RetryState::Exhausted);
    }

    #[test]
    fn test_success_is_terminal() {
        let mut schedule = RetrySchedule::new(RetryPolicy::new(3));
        schedule.next_attempt().unwrap();
        schedule.record_failure(fail());
        schedule.next_attempt().unwrap();
        schedule.record_success();
        assert_eq!(schedule.state(), RetryState::Succeeded);
        assert!(schedule.next_attempt().is_none());
    }

    #[test]
    fn test_last_error_wins() {
        let mut schedule = RetrySchedule::new(RetryPolicy::new(2));
        schedule.next_attempt().unwrap();
        schedule.record_failure(Error::Generic("first".to_string()));
        schedule.next_attempt().unwrap();
        schedule.record_failure(Error::Generic("second".to_string()));
        assert!(schedule.next_attempt().is_none());
        match schedule.into_last_error() {
            Error::Generic(msg) => assert_eq!(msg, "second"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_next_attempt_requires_recorded_outcome() {
        let mut schedule = RetrySchedule::new(RetryPolicy::new(3));
        schedule.next_attempt().unwrap();
        // Attempt 1 is in flight; no second attempt until its outcome lands.
        assert!(schedule.next_attempt().is_none());
    }

    #[test]
    fn test_zero_attempt_policy_is_clamped_to_one() {
        let policy = RetryPolicy::new(0);
        assert_eq!(policy.max_attempts(), 1);
    }
}
