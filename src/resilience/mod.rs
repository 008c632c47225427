//! Resilience subsystem for outbound calls.
//!
//! # Data Flow
//! ```text
//! Request to an external API (moderation):
//!     → On failure: retries.rs (check if retryable, pick the delay)
//!     → backoff.rs (exponential growth, cap, jitter, Retry-After)
//! ```
//!
//! # Design Decisions
//! - Only 429, 5xx gateway-style statuses and transport errors are retried
//! - Jittered backoff prevents thundering herd
//! - 429 gets its own, longer schedule and honours Retry-After

pub mod backoff;
pub mod retries;

pub use backoff::{calculate_backoff, with_jitter};
pub use retries::{is_retryable_status, RetryPolicy};
