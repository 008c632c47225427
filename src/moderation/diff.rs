//! Newly added string detection between two catalog trees.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Stand-in text recorded for a head file that is not valid JSON.
pub const INVALID_JSON_MARKER: &str = "[Invalid JSON: unable to parse file]";

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One string to moderate and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewString {
    pub file: String,
    pub text: String,
}

impl NewString {
    pub fn is_invalid_json(&self) -> bool {
        self.text == INVALID_JSON_MARKER
    }
}

/// Per-file count of new strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileScan {
    pub file: String,
    pub new_strings: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub files: Vec<FileScan>,
    pub items: Vec<NewString>,
}

/// Every string leaf in `value`, deduplicated, in first-seen order.
/// Object keys are not included.
pub fn collect_strings(value: &Value) -> Vec<String> {
    fn walk<'a>(value: &'a Value, seen: &mut HashSet<&'a str>, out: &mut Vec<String>) {
        match value {
            Value::String(s) => {
                if seen.insert(s.as_str()) {
                    out.push(s.clone());
                }
            }
            Value::Array(items) => items.iter().for_each(|v| walk(v, seen, out)),
            Value::Object(map) => map.values().for_each(|v| walk(v, seen, out)),
            _ => {}
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(value, &mut seen, &mut out);
    out
}

/// Strings in `head` that do not appear anywhere in `base`, blanks skipped.
pub fn newly_added(base: Option<&Value>, head: &Value) -> Vec<String> {
    let base_strings: HashSet<String> = base.map(collect_strings).unwrap_or_default().into_iter().collect();
    collect_strings(head)
        .into_iter()
        .filter(|s| !base_strings.contains(s) && !s.trim().is_empty())
        .collect()
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>, DiffError> {
    let read_err = |source| DiffError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Compare every `*.json` file in `head_dir` with the same file in `base_dir`.
/// A file absent from the base counts as entirely new; an unparsable base is
/// treated the same way.
pub fn scan_dirs(base_dir: &Path, head_dir: &Path) -> Result<ScanResult, DiffError> {
    let mut result = ScanResult::default();

    for head_path in json_files(head_dir)? {
        let file_name = head_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let head_text = fs::read_to_string(&head_path).map_err(|source| DiffError::Read {
            path: head_path.clone(),
            source,
        })?;

        let base_json = match fs::read_to_string(base_dir.join(&file_name)) {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(json) => Some(json),
                Err(e) => {
                    tracing::warn!(file = %file_name, error = %e, "Failed to parse base JSON");
                    None
                }
            },
            Err(_) => None,
        };

        let new_strings = match serde_json::from_str::<Value>(&head_text) {
            Ok(head_json) => newly_added(base_json.as_ref(), &head_json),
            Err(e) => {
                tracing::warn!(file = %file_name, error = %e, "Failed to parse head JSON");
                vec![INVALID_JSON_MARKER.to_string()]
            }
        };

        result.files.push(FileScan {
            file: file_name.clone(),
            new_strings: new_strings.len(),
        });
        result.items.extend(new_strings.into_iter().map(|text| NewString {
            file: file_name.clone(),
            text,
        }));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_strings_walks_everything() {
        let value = json!({
            "name": "blame",
            "modes": ["normal", "toxic"],
            "examples": ["a", "b", "a"],
            "examplesByMode": { "toxic": ["c"] },
            "count": 3
        });
        assert_eq!(
            collect_strings(&value),
            vec!["blame", "normal", "toxic", "a", "b", "c"]
        );
    }

    #[test]
    fn test_newly_added() {
        let base = json!({ "examples": ["old", "kept"] });
        let head = json!({ "examples": ["old", "kept", "new", "   "], "examplesByMode": { "toxic": ["spicy"] } });
        assert_eq!(newly_added(Some(&base), &head), vec!["new", "spicy"]);
        assert_eq!(newly_added(None, &json!(["x", ""])), vec!["x"]);
    }

    #[test]
    fn test_scan_dirs() {
        let base = tempfile::tempdir().unwrap();
        let head = tempfile::tempdir().unwrap();

        fs::write(base.path().join("blame.json"), r#"{"examples":["It was DNS."]}"#).unwrap();
        fs::write(
            head.path().join("blame.json"),
            r#"{"examples":["It was DNS.","It was the cache."]}"#,
        )
        .unwrap();
        fs::write(head.path().join("fresh.json"), r#"{"examples":["Brand new."]}"#).unwrap();
        fs::write(head.path().join("broken.json"), "{").unwrap();
        fs::write(head.path().join("README.md"), "ignored").unwrap();

        let result = scan_dirs(base.path(), head.path()).unwrap();
        assert_eq!(
            result.files,
            vec![
                FileScan { file: "blame.json".into(), new_strings: 1 },
                FileScan { file: "broken.json".into(), new_strings: 1 },
                FileScan { file: "fresh.json".into(), new_strings: 1 },
            ]
        );
        assert_eq!(result.items[0].text, "It was the cache.");
        assert!(result.items[1].is_invalid_json());
        assert_eq!(result.items[2].file, "fresh.json");
    }
}
