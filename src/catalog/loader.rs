//! Catalog loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::types::{Catalog, Endpoint};
use crate::catalog::validation::{validate_endpoint, ValidationError};

/// Failure to read the catalog directory itself.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single record was excluded.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of loading one data file.
#[derive(Debug)]
pub struct RecordReport {
    pub path: PathBuf,
    pub result: Result<Endpoint, RecordError>,
}

/// Read and validate every `*.json` record in `dir`, skipping files whose
/// name starts with `_`. Results are ordered by file name.
pub fn inspect_dir(dir: &Path) -> Result<Vec<RecordReport>, CatalogError> {
    let read_err = |source| CatalogError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.starts_with('_') || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            let result = load_record(&path);
            RecordReport { path, result }
        })
        .collect())
}

fn load_record(path: &Path) -> Result<Endpoint, RecordError> {
    let content = fs::read_to_string(path)?;
    let endpoint: Endpoint = serde_json::from_str(&content)?;
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    validate_endpoint(&endpoint, stem).map_err(RecordError::Invalid)?;
    Ok(endpoint)
}

/// Load the catalog from `dir`. Records that fail to parse or validate are
/// logged and left out.
pub fn load_catalog(dir: &Path) -> Result<Catalog, CatalogError> {
    let mut endpoints = Vec::new();
    for report in inspect_dir(dir)? {
        match report.result {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(e) => {
                tracing::warn!(path = %report.path.display(), error = %e, "Excluding endpoint record");
            }
        }
    }

    let catalog = Catalog::new(endpoints);
    tracing::info!(dir = %dir.display(), endpoints = catalog.len(), "Catalog loaded");
    Ok(catalog)
}
