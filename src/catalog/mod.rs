//! Endpoint catalog subsystem.
//!
//! # Data Flow
//! ```text
//! endpoints/*.json (one record per endpoint)
//!     → loader.rs (read, deserialize)
//!     → validation.rs (semantic checks, bad records dropped)
//!     → Catalog (immutable, name-keyed)
//!     → shared via Arc with the router
//! ```
//!
//! # Design Decisions
//! - The catalog is built once at startup and never mutated
//! - A record that fails validation is excluded, never fatal
//! - Iteration order is alphabetical so help output is stable

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{inspect_dir, load_catalog, CatalogError, RecordError, RecordReport};
pub use types::{Catalog, Endpoint, Mode, RANDOM_ENDPOINT};
pub use validation::{validate_endpoint, ValidationError};
