//! Moderation API client.
//!
//! # Responsibilities
//! - POST a batch of strings to the moderation endpoint
//! - Retry transport errors and retryable statuses with backoff
//! - Honor `Retry-After` on 429
//!
//! # Design Decisions
//! - One result per input string or the call fails
//! - Non-retryable statuses fail immediately with the response body
//! - An undecodable success body is final

use std::collections::BTreeMap;

use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ModerationConfig;
use crate::resilience::RetryPolicy;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("moderation API key is not set")]
    MissingApiKey,

    #[error("moderation API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("moderation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("moderation response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("moderation API returned {got} results for {sent} inputs")]
    LengthMismatch { sent: usize, got: usize },

    #[error("{count} new strings exceed the limit of {limit}")]
    TooMany { count: usize, limit: usize },
}

#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ModerationResult>,
}

/// Verdict for one input string.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    #[serde(default)]
    pub categories: BTreeMap<String, bool>,
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
}

impl ModerationResult {
    /// Names of the categories that fired.
    pub fn flagged_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|(_, hit)| **hit)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

pub struct ModerationClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    policy: RetryPolicy,
}

impl ModerationClient {
    pub fn new(config: &ModerationConfig, api_key: impl Into<String>) -> Result<Self, ModerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModerationError::MissingApiKey);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            model: config.model.clone(),
            policy: RetryPolicy::from(config),
        })
    }

    /// Moderate `inputs`, one result per input in the same order.
    pub async fn moderate(&self, inputs: &[String]) -> Result<Vec<ModerationResult>, ModerationError> {
        let mut attempt = 1;
        loop {
            let failure = match self.send(inputs).await {
                Ok(results) => return Ok(results),
                Err(failure) => failure,
            };

            let status = failure.status();
            if failure.is_final() || !self.policy.should_retry(attempt, status) {
                return Err(failure.into_error());
            }

            let delay = self.policy.delay(attempt, status, failure.retry_after());
            tracing::warn!(
                attempt,
                max_attempts = self.policy.max_attempts,
                status = ?status,
                delay_ms = delay.as_millis() as u64,
                "Moderation request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn send(&self, inputs: &[String]) -> Result<Vec<ModerationResult>, Failure> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest {
                model: &self.model,
                input: inputs,
            })
            .send()
            .await
            .map_err(|e| Failure::Error(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            return Err(Failure::Status {
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let parsed: ModerationResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                Failure::Error(ModerationError::Decode(e))
            } else {
                Failure::Error(e.into())
            }
        })?;
        if parsed.results.len() != inputs.len() {
            return Err(Failure::Error(ModerationError::LengthMismatch {
                sent: inputs.len(),
                got: parsed.results.len(),
            }));
        }
        Ok(parsed.results)
    }
}

/// One failed attempt.
enum Failure {
    Status {
        status: u16,
        body: String,
        retry_after: Option<String>,
    },
    Error(ModerationError),
}

impl Failure {
    fn status(&self) -> Option<u16> {
        match self {
            Failure::Status { status, .. } => Some(*status),
            Failure::Error(_) => None,
        }
    }

    fn retry_after(&self) -> Option<&str> {
        match self {
            Failure::Status { retry_after, .. } => retry_after.as_deref(),
            Failure::Error(_) => None,
        }
    }

    /// Only transport errors and statuses are worth retrying.
    fn is_final(&self) -> bool {
        matches!(self, Failure::Error(e) if !matches!(e, ModerationError::Transport(_)))
    }

    fn into_error(self) -> ModerationError {
        match self {
            Failure::Status { status, body, .. } => ModerationError::Status { status, body },
            Failure::Error(e) => e,
        }
    }
}
