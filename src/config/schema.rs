//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where endpoint data files live.
    pub catalog: CatalogConfig,

    /// Metadata reported by the help endpoint.
    pub service: ServiceInfo,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Random selection settings.
    pub selection: SelectionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Moderation gate settings (used by the CLI).
    pub moderation: ModerationConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8787").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8787".to_string(),
        }
    }
}

/// Endpoint catalog location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding one `<name>.json` per endpoint.
    pub dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: "endpoints".to_string(),
        }
    }
}

/// Static service metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service name reported in help.
    pub name: String,

    /// Service version reported in help.
    pub version: String,

    /// One-line description reported in help.
    pub description: String,

    /// Public base URL. When unset, derived from the request Host header.
    pub base_url: Option<String>,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: "DOaaS".to_string(),
            version: "1.2.0".to_string(),
            description: "DevOps-as-a-Service: endpoint responses for excuses, motivations, reality checks, and more".to_string(),
            base_url: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Random selection configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Fixed seed for reproducible selection. Thread RNG when unset.
    pub seed: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "doaas=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Moderation API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModerationConfig {
    /// Moderation endpoint URL.
    pub api_url: String,

    /// Model name sent with every request.
    pub model: String,

    /// Strings per moderation request.
    pub chunk_size: usize,

    /// Total attempts per request.
    pub max_retries: u32,

    /// Initial backoff for non-429 failures.
    pub base_delay_ms: u64,

    /// Backoff cap for non-429 failures.
    pub max_delay_ms: u64,

    /// Initial backoff for 429 responses.
    pub base_delay_429_ms: u64,

    /// Backoff cap for 429 responses.
    pub max_delay_429_ms: u64,

    /// Upper bound of the random delay added to every wait.
    pub jitter_ms: u64,

    /// Pause between chunk requests.
    pub chunk_gap_ms: u64,

    /// Maximum newly added strings accepted in one run.
    pub max_new_strings: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/moderations".to_string(),
            model: "omni-moderation-latest".to_string(),
            chunk_size: 50,
            max_retries: 4,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
            base_delay_429_ms: 5_000,
            max_delay_429_ms: 60_000,
            jitter_ms: 500,
            chunk_gap_ms: 2_000,
            max_new_strings: 500,
        }
    }
}
