//! Pass/fail decision over a scan.

use std::time::Duration;

use serde::Serialize;

use crate::config::ModerationConfig;
use crate::moderation::client::{ModerationClient, ModerationError};
use crate::moderation::diff::{FileScan, NewString, ScanResult};
use crate::resilience::with_jitter;

/// Category reported for files that could not be parsed.
pub const INVALID_JSON_CATEGORY: &str = "invalid_json";

/// Batching limits for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateLimits {
    pub chunk_size: usize,
    pub max_new_strings: usize,
    pub chunk_gap: Duration,
    pub jitter_ms: u64,
}

impl From<&ModerationConfig> for GateLimits {
    fn from(config: &ModerationConfig) -> Self {
        Self {
            chunk_size: config.chunk_size.max(1),
            max_new_strings: config.max_new_strings,
            chunk_gap: Duration::from_millis(config.chunk_gap_ms),
            jitter_ms: config.jitter_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaggedItem {
    pub file: String,
    pub text: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scores: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModerationReport {
    pub files: Vec<FileScan>,
    pub checked: usize,
    pub flagged: Vec<FlaggedItem>,
}

impl ModerationReport {
    pub fn passed(&self) -> bool {
        self.flagged.is_empty()
    }
}

/// Moderate every new string in `scan`.
///
/// The string cap is enforced before any request is made. Unparsable files
/// are flagged without being sent.
pub async fn moderate(
    client: &ModerationClient,
    scan: ScanResult,
    limits: GateLimits,
) -> Result<ModerationReport, ModerationError> {
    let count = scan.items.len();
    if count > limits.max_new_strings {
        return Err(ModerationError::TooMany {
            count,
            limit: limits.max_new_strings,
        });
    }

    let (invalid, items): (Vec<NewString>, Vec<NewString>) =
        scan.items.into_iter().partition(NewString::is_invalid_json);

    let mut report = ModerationReport {
        files: scan.files,
        checked: items.len(),
        flagged: invalid
            .into_iter()
            .map(|item| FlaggedItem {
                file: item.file,
                text: item.text,
                categories: vec![INVALID_JSON_CATEGORY.to_string()],
                scores: Vec::new(),
            })
            .collect(),
    };

    let chunks: Vec<&[NewString]> = items.chunks(limits.chunk_size.max(1)).collect();
    let total = chunks.len();
    for (index, chunk) in chunks.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(with_jitter(limits.chunk_gap, limits.jitter_ms)).await;
        }

        let inputs: Vec<String> = chunk.iter().map(|item| item.text.clone()).collect();
        tracing::info!(chunk = index + 1, total, size = inputs.len(), "Moderating chunk");
        let results = client.moderate(&inputs).await?;

        for (item, result) in chunk.iter().zip(results) {
            if !result.flagged {
                continue;
            }
            let categories = result.flagged_categories();
            let mut scores: Vec<(String, f64)> = result
                .category_scores
                .iter()
                .filter(|(name, _)| categories.contains(name))
                .map(|(name, score)| (name.clone(), *score))
                .collect();
            scores.sort_by(|a, b| b.1.total_cmp(&a.1));
            scores.truncate(3);
            report.flagged.push(FlaggedItem {
                file: item.file.clone(),
                text: item.text.clone(),
                categories,
                scores,
            });
        }
    }

    tracing::info!(
        checked = report.checked,
        flagged = report.flagged.len(),
        "Moderation complete"
    );
    Ok(report)
}
