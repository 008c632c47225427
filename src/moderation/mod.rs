//! Moderation gate for newly added endpoint strings.
//!
//! # Data Flow
//! ```text
//! base catalog dir + head catalog dir
//!     → diff.rs (strings present in head but not in base)
//!     → gate.rs (cap, chunking, invalid-file failures)
//!     → client.rs (moderation API with retry)
//!     → ModerationReport (pass / flagged items)
//! ```
//!
//! # Design Decisions
//! - Runs offline (CLI / CI), never on the request path
//! - Fails closed: API errors and unparsable files fail the gate

pub mod client;
pub mod diff;
pub mod gate;

pub use client::{ModerationClient, ModerationError, ModerationResult};
pub use diff::{collect_strings, newly_added, scan_dirs, DiffError, FileScan, NewString, ScanResult, INVALID_JSON_MARKER};
pub use gate::{moderate, FlaggedItem, GateLimits, ModerationReport};
