//! Path normalization and classification.
//!
//! # Design Decisions
//! - Leading and trailing slashes are stripped, then the rest is lowercased
//! - `""` and `help` both mean help; `random` is reserved
//! - Anything else is treated as an endpoint name

/// The handler a normalized path maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Help,
    Random,
    Endpoint(String),
}

/// Strip every leading and trailing `/`, then lowercase.
pub fn normalize_path(path: &str) -> String {
    path.trim_matches('/').to_lowercase()
}

impl Route {
    /// Classify a raw request path.
    pub fn classify(path: &str) -> Self {
        let normalized = normalize_path(path);
        match normalized.as_str() {
            "" | "help" => Route::Help,
            "random" => Route::Random,
            _ => Route::Endpoint(normalized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/BLAME"), "blame");
        assert_eq!(normalize_path("/blame/"), "blame");
        assert_eq!(normalize_path("//blame"), "blame");
        assert_eq!(normalize_path("///"), "");
        assert_eq!(normalize_path("/a/b/"), "a/b");
    }

    #[test]
    fn test_classify() {
        assert_eq!(Route::classify("/"), Route::Help);
        assert_eq!(Route::classify(""), Route::Help);
        assert_eq!(Route::classify("/HELP"), Route::Help);
        assert_eq!(Route::classify("//help/"), Route::Help);
        assert_eq!(Route::classify("/Random/"), Route::Random);
        assert_eq!(Route::classify("/blame"), Route::Endpoint("blame".into()));
    }
}
