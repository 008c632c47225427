//! DevOps-as-a-Service (DOaaS)
//!
//! A tiny HTTP service that answers every path with a randomly chosen
//! canned line from a catalog of endpoints.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ routing::Router ──▶ catalog::Catalog
//!                      (preflight,      (normalize path,     (endpoints loaded
//!                       params)          resolve mode,        once at startup)
//!                                        pick example)
//!                           │
//!     Client Response       ▼
//!     ◀────────────── http::response (json | text | shields, CORS, no-store)
//!
//!     Cross-cutting: config, observability (tracing + prometheus), lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use doaas::lifecycle::{bootstrap, load_service_config, wait_for_signal, Shutdown};
use doaas::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "doaas")]
#[command(about = "DevOps-as-a-Service HTTP server", long_about = None)]
struct Args {
    /// Path to a TOML config file. Built-in defaults when omitted.
    #[arg(short, long, env = "DOAAS_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the endpoint data directory.
    #[arg(long)]
    catalog_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_service_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(dir) = args.catalog_dir {
        config.catalog.dir = dir;
    }

    init_logging(&config.observability);

    tracing::info!(
        version = %config.service.version,
        bind_address = %config.listener.bind_address,
        catalog_dir = %config.catalog.dir,
        request_timeout_secs = config.timeouts.request_secs,
        "doaas starting"
    );

    let bind_address = config.listener.bind_address.clone();
    let server = bootstrap(config)?;

    let listener = TcpListener::bind(&bind_address).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
