//! Exponential backoff with jitter.

use std::time::Duration;
use rand::Rng;

/// Exponential delay for `attempt` (1-based): `base_ms * 2^(attempt-1)`, capped at `max_ms`.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    Duration::from_millis(delay_ms.min(max_ms))
}

/// Add a uniform random `0..max_jitter_ms` to `delay`.
pub fn with_jitter(delay: Duration, max_jitter_ms: u64) -> Duration {
    let jitter = if max_jitter_ms > 0 {
        rand::thread_rng().gen_range(0..max_jitter_ms)
    } else {
        0
    };
    delay + Duration::from_millis(jitter)
}

/// Delay requested by a `Retry-After` header given in whole seconds,
/// capped at `max_ms`. HTTP-date values are not supported.
pub fn retry_after(value: &str, max_ms: u64) -> Option<Duration> {
    let secs: u64 = value.trim().parse().ok()?;
    Some(Duration::from_millis(secs.saturating_mul(1000).min(max_ms)))
}
