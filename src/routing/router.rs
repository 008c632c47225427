//! Request resolution against the catalog.
//!
//! # Responsibilities
//! - Look up the endpoint named by the path
//! - Resolve the effective mode for the request
//! - Pick one example from the resolved pool
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - On a concrete endpoint an unsupported mode degrades to `normal`
//! - On `/random` the mode is a hard filter; no match is a not-found
//! - Explicit errors rather than silent defaults for unknown paths

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{Catalog, Endpoint, Mode};
use crate::routing::matcher::Route;
use crate::routing::selector::{choose, Selector, ThreadRngSelector};

/// Not-found outcomes. Both surface as 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Endpoint not found")]
    EndpointNotFound,

    #[error("No endpoint supports the requested mode")]
    UnsupportedMode {
        requested: String,
        supported: Vec<Mode>,
    },
}

/// Format-neutral result of resolving a content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    pub endpoint: &'a Endpoint,
    pub mode: Mode,
    /// `None` only if the resolved pool is empty.
    pub example: Option<&'a str>,
    /// Whether the endpoint was chosen by `/random`.
    pub via_random: bool,
}

/// What a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<'a> {
    Help,
    Content(Selection<'a>),
}

/// Resolves requests against an immutable catalog.
#[derive(Debug, Clone)]
pub struct Router {
    catalog: Arc<Catalog>,
    selector: Arc<dyn Selector>,
}

impl Router {
    /// Router backed by the thread-local RNG.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_selector(catalog, Arc::new(ThreadRngSelector))
    }

    pub fn with_selector(catalog: Arc<Catalog>, selector: Arc<dyn Selector>) -> Self {
        Self { catalog, selector }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve a raw request path. `requested_mode` is the `mode` query value,
    /// `None` when the parameter was absent.
    pub fn dispatch(&self, path: &str, requested_mode: Option<&str>) -> Result<Dispatch<'_>, RouteError> {
        match Route::classify(path) {
            Route::Help => Ok(Dispatch::Help),
            Route::Random => self.random(requested_mode).map(Dispatch::Content),
            Route::Endpoint(name) => self.endpoint(&name, requested_mode).map(Dispatch::Content),
        }
    }

    /// Content for a named endpoint.
    pub fn endpoint(&self, name: &str, requested_mode: Option<&str>) -> Result<Selection<'_>, RouteError> {
        let endpoint = self.catalog.get(name).ok_or(RouteError::EndpointNotFound)?;
        let mode = self.resolve_mode(endpoint, requested_mode);
        Ok(self.select(endpoint, mode, false))
    }

    /// Content from a randomly chosen endpoint, `random` itself excluded.
    pub fn random(&self, requested_mode: Option<&str>) -> Result<Selection<'_>, RouteError> {
        let candidates = self.catalog.candidates(requested_mode);

        let endpoint = match (choose(self.selector.as_ref(), &candidates), requested_mode) {
            (Some(endpoint), _) => *endpoint,
            (None, Some(requested)) => {
                return Err(RouteError::UnsupportedMode {
                    requested: requested.to_string(),
                    supported: self.catalog.supported_modes(),
                });
            }
            (None, None) => return Err(RouteError::EndpointNotFound),
        };

        let mode = self.resolve_mode(endpoint, requested_mode);
        Ok(self.select(endpoint, mode, true))
    }

    /// No requested mode: uniform pick from the endpoint's modes.
    /// Requested mode: used when the endpoint supports it, else `normal`.
    pub fn resolve_mode(&self, endpoint: &Endpoint, requested_mode: Option<&str>) -> Mode {
        match requested_mode {
            None => choose(self.selector.as_ref(), &endpoint.modes)
                .copied()
                .unwrap_or(Mode::Normal),
            Some(requested) => Mode::parse(requested)
                .filter(|mode| endpoint.supports(*mode))
                .unwrap_or(Mode::Normal),
        }
    }

    fn select<'a>(&'a self, endpoint: &'a Endpoint, mode: Mode, via_random: bool) -> Selection<'a> {
        let example = choose(self.selector.as_ref(), endpoint.pool(mode)).map(String::as_str);
        Selection {
            endpoint,
            mode,
            example,
            via_random,
        }
    }
}
