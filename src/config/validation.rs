//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("service.base_url must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.catalog.dir.trim().is_empty() {
        errors.push(ValidationError::Empty("catalog.dir"));
    }

    if config.service.name.trim().is_empty() {
        errors.push(ValidationError::Empty("service.name"));
    }

    if let Some(base_url) = &config.service.base_url {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(ValidationError::InvalidBaseUrl(base_url.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    let moderation = &config.moderation;
    if moderation.chunk_size == 0 {
        errors.push(ValidationError::Zero("moderation.chunk_size"));
    }
    if moderation.max_retries == 0 {
        errors.push(ValidationError::Zero("moderation.max_retries"));
    }
    if moderation.api_url.trim().is_empty() {
        errors.push(ValidationError::Empty("moderation.api_url"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.moderation.chunk_size = 0;
        config.service.base_url = Some("doaas.dev".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::Zero("timeouts.request_secs")));
        assert!(errors.contains(&ValidationError::InvalidBaseUrl("doaas.dev".into())));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServiceConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
