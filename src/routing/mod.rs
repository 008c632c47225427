//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path + `mode` query value
//!     → matcher.rs (normalize path, classify: help / random / endpoint)
//!     → router.rs (endpoint lookup, mode resolution, example selection)
//!     → selector.rs (uniform random choice)
//!     → Return: Dispatch (help, selection, or not-found)
//! ```
//!
//! # Design Decisions
//! - Catalog is immutable at runtime; the router holds it behind Arc
//! - Randomness is injected through the Selector trait
//! - Resolution is independent of the output format

pub mod matcher;
pub mod router;
pub mod selector;

pub use matcher::{normalize_path, Route};
pub use router::{Dispatch, RouteError, Router, Selection};
pub use selector::{SeededSelector, Selector, ThreadRngSelector};
