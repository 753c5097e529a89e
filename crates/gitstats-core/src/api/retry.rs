//! Retry policy and response classification for GitHub requests.
//!
//! Every attempt is mapped to a [`Disposition`] by [`classify_status`]; the
//! driver in [`crate::api::client`] is the only place that loops.

use std::time::Duration;

use reqwest::StatusCode;

/// Default number of attempts that may fail transiently.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default wait before polling again after a `201 Created`.
pub const DEFAULT_COMPUTING_DELAY: Duration = Duration::from_secs(3);

/// What the retry driver should do after one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// `200 OK`: stop and decode the body.
    Success,
    /// `4xx`: stop immediately. The budget is left untouched.
    Terminal,
    /// `201 Created`: statistics are still being computed. Sleep, then try
    /// again without spending budget.
    RetryAfterDelay,
    /// Anything else: spend one unit of budget and try again.
    RetryNow,
}

/// Classify a response status.
///
/// Transport failures never reach this function; the driver treats them
/// as [`Disposition::RetryNow`].
pub fn classify_status(status: StatusCode) -> Disposition {
    if status == StatusCode::OK {
        Disposition::Success
    } else if status.is_client_error() {
        Disposition::Terminal
    } else if status == StatusCode::CREATED {
        Disposition::RetryAfterDelay
    } else {
        Disposition::RetryNow
    }
}

/// Bounded retry policy shared by every GitHub operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts that may fail with a transport error or non-4xx status.
    pub max_retries: u32,
    /// Sleep between polls while GitHub computes statistics.
    pub computing_delay: Duration,
    /// Optional ceiling on `201` polls. `None` polls until GitHub answers.
    pub max_computing_polls: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: DEFAULT_MAX_RETRIES,
            computing_delay: DEFAULT_COMPUTING_DELAY,
            max_computing_polls: None,
        }
    }
}

impl RetryPolicy {
    /// Override the delay used while statistics are being computed.
    pub fn with_computing_delay(mut self, delay: Duration) -> Self {
        self.computing_delay = delay;
        self
    }

    /// Cap the number of `201` polls per call.
    pub fn with_max_computing_polls(mut self, polls: u32) -> Self {
        self.max_computing_polls = Some(polls);
        self
    }

    /// Whether another `201` poll is allowed after `polls` have been made.
    pub(crate) fn may_poll_again(&self, polls: u32) -> bool {
        self.max_computing_polls.map_or(true, |max| polls < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_success() {
        assert_eq!(classify_status(StatusCode::OK), Disposition::Success);
    }

    #[test]
    fn test_client_errors_are_terminal() {
        for code in [400u16, 401, 403, 404, 422, 451, 499] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(classify_status(status), Disposition::Terminal, "{code}");
        }
    }

    #[test]
    fn test_created_waits_before_retry() {
        assert_eq!(
            classify_status(StatusCode::CREATED),
            Disposition::RetryAfterDelay
        );
    }

    #[test]
    fn test_other_statuses_retry_now() {
        for code in [202u16, 204, 301, 304, 500, 502, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(classify_status(status), Disposition::RetryNow, "{code}");
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.computing_delay, Duration::from_secs(3));
        assert!(policy.may_poll_again(1_000));
    }

    #[test]
    fn test_computing_poll_ceiling() {
        let policy = RetryPolicy::default().with_max_computing_polls(2);
        assert!(policy.may_poll_again(0));
        assert!(policy.may_poll_again(1));
        assert!(!policy.may_poll_again(2));
    }
}
