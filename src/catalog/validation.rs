//! Endpoint record validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles shape and the closed mode set)
//! - Check the record name against its file stem
//! - Check cross-field constraints between `modes` and `examplesByMode`
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: (&Endpoint, expected name) → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::catalog::types::{Endpoint, Mode};

/// A single problem with an endpoint record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("\"name\" must match filename, expected {expected:?}, got {actual:?}")]
    NameMismatch { expected: String, actual: String },

    #[error("\"modes\" must not be empty")]
    NoModes,

    #[error("\"modes\" must include \"normal\"")]
    MissingNormal,

    #[error("\"examples\" must not be empty")]
    NoExamples,

    #[error("examplesByMode key {0} is not listed in modes")]
    UndeclaredMode(Mode),

    #[error("examplesByMode.{0} must not be empty")]
    EmptyModePool(Mode),
}

/// Validate an endpoint record loaded from `<expected_name>.json`.
pub fn validate_endpoint(endpoint: &Endpoint, expected_name: &str) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if endpoint.name != expected_name {
        errors.push(ValidationError::NameMismatch {
            expected: expected_name.to_string(),
            actual: endpoint.name.clone(),
        });
    }

    if endpoint.modes.is_empty() {
        errors.push(ValidationError::NoModes);
    } else if !endpoint.supports(Mode::Normal) {
        errors.push(ValidationError::MissingNormal);
    }

    if endpoint.examples.is_empty() {
        errors.push(ValidationError::NoExamples);
    }

    for (mode, pool) in &endpoint.examples_by_mode {
        if !endpoint.supports(*mode) {
            errors.push(ValidationError::UndeclaredMode(*mode));
        }
        if pool.is_empty() {
            errors.push(ValidationError::EmptyModePool(*mode));
        }
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

    fn valid() -> Endpoint {
        Endpoint::new(
            "blame",
            "Blame someone",
            vec![Mode::Normal, Mode::Toxic],
            vec!["It was DNS.".to_string()],
        )
        .with_mode_examples(Mode::Toxic, vec!["It was you.".to_string()])
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_endpoint(&valid(), "blame").is_ok());
    }

    #[test]
    fn test_name_must_match_file() {
        let errors = validate_endpoint(&valid(), "excuse").unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::NameMismatch {
                expected: "excuse".into(),
                actual: "blame".into(),
            }]
        );
    }

    #[test]
    fn test_collects_every_error() {
        let mut endpoint = valid();
        endpoint.modes = vec![Mode::Chaos];
        endpoint.examples.clear();
        endpoint.examples_by_mode.insert(Mode::Security, Vec::new());

        let errors = validate_endpoint(&endpoint, "blame").unwrap_err();
        assert!(errors.contains(&ValidationError::MissingNormal));
        assert!(errors.contains(&ValidationError::NoExamples));
        assert!(errors.contains(&ValidationError::UndeclaredMode(Mode::Toxic)));
        assert!(errors.contains(&ValidationError::UndeclaredMode(Mode::Security)));
        assert!(errors.contains(&ValidationError::EmptyModePool(Mode::Security)));
    }

    #[test]
    fn test_empty_modes() {
        let mut endpoint = valid();
        endpoint.modes.clear();
        endpoint.examples_by_mode.clear();
        let errors = validate_endpoint(&endpoint, "blame").unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoModes]);
    }
}
