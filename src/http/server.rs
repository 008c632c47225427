//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Answer CORS preflight before any routing
//! - Dispatch requests to the content router and serialize the outcome
//! - Observability (metrics, correlation IDs)

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::Response,
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::catalog::Catalog;
use crate::config::{ServiceConfig, ServiceInfo};
use crate::http::help::{base_url, help_body, help_text};
use crate::http::request::{MakeRequestUuid, RequestParams, X_REQUEST_ID};
use crate::http::response::{content_response, error_response, json_response, preflight_response, text_response, Format};
use crate::observability::metrics;
use crate::routing::{Dispatch, Router as ContentRouter, SeededSelector, Selector, ThreadRngSelector};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ContentRouter>,
    pub service: Arc<ServiceInfo>,
}

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server. Selection is seeded when
    /// `selection.seed` is configured.
    pub fn new(config: ServiceConfig, catalog: Catalog) -> Self {
        let selector: Arc<dyn Selector> = match config.selection.seed {
            Some(seed) => Arc::new(SeededSelector::new(seed)),
            None => Arc::new(ThreadRngSelector),
        };
        Self::with_selector(config, Arc::new(catalog), selector)
    }

    /// Create a server with an explicit source of randomness.
    pub fn with_selector(config: ServiceConfig, catalog: Arc<Catalog>, selector: Arc<dyn Selector>) -> Self {
        let state = AppState {
            router: Arc::new(ContentRouter::with_selector(catalog, selector)),
            service: Arc::new(config.service.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(dispatch_handler))
            .route("/{*path}", any(dispatch_handler))
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered application, for in-process use.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Single entry point for every path.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let start_time = Instant::now();

    if method == Method::OPTIONS {
        metrics::record_request("preflight", 204, "none", start_time);
        return preflight_response();
    }

    let request_id = headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let params = RequestParams::from_query(uri.query());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        mode = ?params.mode,
        format = params.format.as_str(),
        "Dispatching request"
    );

    let (kind, response) = match state.router.dispatch(uri.path(), params.mode.as_deref()) {
        Ok(Dispatch::Help) => {
            let response = match params.format {
                Format::Text => text_response(
                    StatusCode::OK,
                    help_text(state.router.catalog(), &state.service),
                ),
                // shields has no meaning for help and falls through to JSON
                Format::Json | Format::Shields => json_response(
                    StatusCode::OK,
                    &help_body(
                        state.router.catalog(),
                        &state.service,
                        base_url(&state.service, &headers),
                    ),
                ),
            };
            ("help", response)
        }
        Ok(Dispatch::Content(selection)) => {
            let kind = if selection.via_random { "random" } else { "endpoint" };
            tracing::debug!(
                request_id = %request_id,
                endpoint = %selection.endpoint.name,
                mode = %selection.mode,
                "Resolved selection"
            );
            (kind, content_response(&selection, &params))
        }
        Err(err) => {
            tracing::info!(request_id = %request_id, path = %uri.path(), error = %err, "Not found");
            ("not_found", error_response(&err))
        }
    };

    metrics::record_request(kind, response.status().as_u16(), params.format.as_str(), start_time);
    response
}
