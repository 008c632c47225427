//! Retry decisions for outbound requests.

use std::time::Duration;

use crate::config::ModerationConfig;
use crate::resilience::backoff::{calculate_backoff, retry_after, with_jitter};

/// Statuses worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Attempt limit and delay schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first one included.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub base_delay_429_ms: u64,
    pub max_delay_429_ms: u64,
    pub jitter_ms: u64,
}

impl From<&ModerationConfig> for RetryPolicy {
    fn from(config: &ModerationConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
            base_delay_429_ms: config.base_delay_429_ms,
            max_delay_429_ms: config.max_delay_429_ms,
            jitter_ms: config.jitter_ms,
        }
    }
}

impl RetryPolicy {
    /// Whether a failure on `attempt` (1-based) may be retried.
    /// `status` is `None` for transport errors, which are always retryable.
    pub fn should_retry(&self, attempt: u32, status: Option<u16>) -> bool {
        attempt < self.max_attempts && status.map_or(true, is_retryable_status)
    }

    /// Wait before the attempt after `attempt`.
    pub fn delay(&self, attempt: u32, status: Option<u16>, retry_after_header: Option<&str>) -> Duration {
        let delay = if status == Some(429) {
            retry_after_header
                .and_then(|v| retry_after(v, self.max_delay_429_ms))
                .unwrap_or_else(|| calculate_backoff(attempt, self.base_delay_429_ms, self.max_delay_429_ms))
        } else {
            calculate_backoff(attempt, self.base_delay_ms, self.max_delay_ms)
        };
        with_jitter(delay, self.jitter_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            jitter_ms: 0,
            ..RetryPolicy::from(&ModerationConfig::default())
        }
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status));
        }
        for status in [200, 400, 401, 404, 501] {
            assert!(!is_retryable_status(status));
        }
    }

    #[test]
    fn test_should_retry_respects_attempt_limit() {
        let policy = policy();
        assert!(policy.should_retry(1, Some(503)));
        assert!(policy.should_retry(3, None));
        assert!(!policy.should_retry(4, Some(503)));
        assert!(!policy.should_retry(1, Some(400)));
    }

    #[test]
    fn test_delay_schedules() {
        let policy = policy();
        assert_eq!(policy.delay(1, Some(503), None), Duration::from_millis(500));
        assert_eq!(policy.delay(3, None, None), Duration::from_millis(2000));
        assert_eq!(policy.delay(2, Some(429), None), Duration::from_millis(10_000));
        assert_eq!(policy.delay(1, Some(429), Some("7")), Duration::from_secs(7));
        assert_eq!(policy.delay(1, Some(429), Some("999")), Duration::from_secs(60));
        // Retry-After only applies to 429
        assert_eq!(policy.delay(1, Some(503), Some("7")), Duration::from_millis(500));
    }
}
