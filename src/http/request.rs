//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4)
//! - Extract the query parameters the router and serializers consume
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query parsing never fails: malformed or unknown values fall back to defaults
//! - For a repeated key the first value wins

use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::Format;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for every request lacking an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Query parameters consumed by the router and the serializers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    /// Raw `mode` value; `None` when the parameter is absent.
    pub mode: Option<String>,
    pub format: Format,
    pub label: Option<String>,
    pub style: Option<String>,
    pub color: Option<String>,
    pub label_color: Option<String>,
}

impl RequestParams {
    /// Parse a raw (still percent-encoded) query string.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let mut format: Option<String> = None;

        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "mode" => &mut params.mode,
                "format" => &mut format,
                "label" => &mut params.label,
                "style" => &mut params.style,
                "color" => &mut params.color,
                "labelColor" => &mut params.label_color,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        params.format = Format::from_param(format.as_deref());
        params
    }
}
