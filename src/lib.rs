//! DevOps-as-a-Service library

pub mod catalog;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod moderation;
pub mod observability;
pub mod resilience;
pub mod routing;

pub use catalog::{Catalog, Endpoint, Mode};
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::Router;
