//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Load the endpoint catalog
//! - Start the metrics exporter when enabled
//! - Build the HTTP server
//!
//! # Design Decisions
//! - Fail fast: config and catalog directory errors are fatal
//! - Individual bad endpoint records are not (see catalog loader)

use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::catalog::{load_catalog, CatalogError};
use crate::config::{load_config, ConfigError, ServiceConfig};
use crate::http::HttpServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Config from `path`, or defaults when no file is given.
pub fn load_service_config(path: Option<&Path>) -> Result<ServiceConfig, StartupError> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(ServiceConfig::default()),
    }
}

/// Load the catalog and build the server. Installs the metrics exporter
/// when enabled, so it must run inside a Tokio runtime.
pub fn bootstrap(config: ServiceConfig) -> Result<HttpServer, StartupError> {
    let catalog = load_catalog(Path::new(&config.catalog.dir))?;
    if catalog.is_empty() {
        tracing::warn!(dir = %config.catalog.dir, "Catalog is empty; every endpoint will 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    Ok(HttpServer::new(config, catalog))
}
