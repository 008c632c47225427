//! Response serialization.
//!
//! # Responsibilities
//! - Encode a resolved selection as JSON, plain text, or a shields.io badge
//! - Encode not-found errors (always JSON)
//! - Attach the fixed CORS and cache headers
//!
//! # Design Decisions
//! - One neutral selection in, one of three pure serializers out
//! - JSON bodies are pretty-printed with two-space indentation
//! - Preflight responses carry only the CORS headers

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

use crate::catalog::Mode;
use crate::http::request::RequestParams;
use crate::routing::{RouteError, Selection};

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Badge styles accepted by shields.io.
pub const SHIELDS_STYLES: [&str; 5] = ["flat", "flat-square", "plastic", "for-the-badge", "social"];

const DEFAULT_STYLE: &str = "flat";
const DEFAULT_COLOR: &str = "orange";
const BADGE_LABEL: &str = "DOaaS";

/// Message used when there is nothing to pick from.
pub const FALLBACK_MESSAGE: &str = "DevOps as a Service";

/// Response encoding requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Text,
    Shields,
}

impl Format {
    /// Anything other than `text` or `shields` (including absent) is JSON.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("text") => Format::Text,
            Some("shields") => Format::Shields,
            _ => Format::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Text => "text",
            Format::Shields => "shields",
        }
    }
}

/// `format=json` body for endpoint content.
#[derive(Debug, Serialize)]
pub struct ContentBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub example: &'a str,
    pub mode: Mode,
}

/// shields.io endpoint badge schema.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShieldsBadge {
    pub schema_version: u8,
    pub label: String,
    pub message: String,
    pub color: String,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
}

/// 404 body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_modes: Option<Vec<Mode>>,
}

impl From<&RouteError> for ErrorBody {
    fn from(err: &RouteError) -> Self {
        match err {
            RouteError::EndpointNotFound => Self {
                error: err.to_string(),
                requested_mode: None,
                supported_modes: None,
            },
            RouteError::UnsupportedMode { requested, supported } => Self {
                error: err.to_string(),
                requested_mode: Some(requested.clone()),
                supported_modes: Some(supported.clone()),
            },
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Build the badge for a selection.
pub fn shields_badge(selection: &Selection<'_>, params: &RequestParams) -> ShieldsBadge {
    let message = selection
        .example
        .filter(|e| !e.is_empty())
        .unwrap_or(FALLBACK_MESSAGE);

    let label = match non_empty(&params.label) {
        Some(label) => label.to_string(),
        None if selection.via_random => BADGE_LABEL.to_string(),
        None => format!("{} {}", BADGE_LABEL, selection.endpoint.name),
    };

    let style = params
        .style
        .as_deref()
        .filter(|s| SHIELDS_STYLES.contains(s))
        .unwrap_or(DEFAULT_STYLE);

    ShieldsBadge {
        schema_version: 1,
        label,
        message: message.to_string(),
        color: non_empty(&params.color).unwrap_or(DEFAULT_COLOR).to_string(),
        style: style.to_string(),
        label_color: non_empty(&params.label_color).map(str::to_string),
    }
}

/// Serialize a selection in the requested format.
pub fn content_response(selection: &Selection<'_>, params: &RequestParams) -> Response {
    let example = selection.example.unwrap_or(FALLBACK_MESSAGE);
    match params.format {
        Format::Text => text_response(StatusCode::OK, example.to_string()),
        Format::Shields => json_response(StatusCode::OK, &shields_badge(selection, params)),
        Format::Json => json_response(
            StatusCode::OK,
            &ContentBody {
                name: &selection.endpoint.name,
                description: &selection.endpoint.description,
                example,
                mode: selection.mode,
            },
        ),
    }
}

/// 404 with a JSON body, whatever format was requested.
pub fn error_response(err: &RouteError) -> Response {
    json_response(StatusCode::NOT_FOUND, &ErrorBody::from(err))
}

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let body = serde_json::to_string_pretty(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize response body");
        String::from("{}")
    });
    with_headers(status, CONTENT_TYPE_JSON, body)
}

pub fn text_response(status: StatusCode, body: String) -> Response {
    with_headers(status, CONTENT_TYPE_TEXT, body)
}

/// 204 answer to any OPTIONS request.
pub fn preflight_response() -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::NO_CONTENT;
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

fn with_headers(status: StatusCode, content_type: &'static str, body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}
