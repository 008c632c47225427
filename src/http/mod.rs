//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID, query parameters)
//!     → [routing resolves endpoint, mode, example]
//!     → response.rs / help.rs (serialize per format, fixed headers)
//!     → Send to client
//! ```

pub mod help;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestParams, X_REQUEST_ID};
pub use response::Format;
pub use server::{AppState, HttpServer};
