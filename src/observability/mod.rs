//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Server and CLI produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID flows through every log line of a request
//! - Metrics are cheap (atomic increments) and off unless configured

pub mod logging;
pub mod metrics;
