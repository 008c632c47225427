//! Catalog data types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved name of the pseudo-endpoint that picks another endpoint at random.
pub const RANDOM_ENDPOINT: &str = "random";

/// Tone selector for an endpoint's example pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Chaos,
    Corporate,
    Security,
    Wholesome,
    Toxic,
    Sarcastic,
    Devops,
}

impl Mode {
    /// Every mode, in canonical order.
    pub const ALL: [Mode; 8] = [
        Mode::Normal,
        Mode::Chaos,
        Mode::Corporate,
        Mode::Security,
        Mode::Wholesome,
        Mode::Toxic,
        Mode::Sarcastic,
        Mode::Devops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Chaos => "chaos",
            Mode::Corporate => "corporate",
            Mode::Security => "security",
            Mode::Wholesome => "wholesome",
            Mode::Toxic => "toxic",
            Mode::Sarcastic => "sarcastic",
            Mode::Devops => "devops",
        }
    }

    /// Exact, case-sensitive match against the closed set of modes.
    pub fn parse(value: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode: {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::parse(s).ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// A named content category with its example strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Endpoint {
    /// Identifier; equals the catalog key and the data file stem.
    pub name: String,

    /// Human-readable summary shown in help.
    pub description: String,

    /// Supported modes; always contains `normal`.
    pub modes: Vec<Mode>,

    /// Default pool, used when no mode-specific pool applies.
    pub examples: Vec<String>,

    /// Mode-specific override pools.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub examples_by_mode: BTreeMap<Mode, Vec<String>>,
}

impl Endpoint {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        modes: Vec<Mode>,
        examples: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            modes,
            examples,
            examples_by_mode: BTreeMap::new(),
        }
    }

    /// Attach a mode-specific pool.
    pub fn with_mode_examples(mut self, mode: Mode, examples: Vec<String>) -> Self {
        self.examples_by_mode.insert(mode, examples);
        self
    }

    pub fn supports(&self, mode: Mode) -> bool {
        self.modes.contains(&mode)
    }

    /// Literal string membership test, used by the `/random` mode filter.
    pub fn supports_literal(&self, mode: &str) -> bool {
        self.modes.iter().any(|m| m.as_str() == mode)
    }

    /// The pool to draw from for `mode`: the mode-specific pool when it is
    /// present and non-empty, otherwise the default pool.
    pub fn pool(&self, mode: Mode) -> &[String] {
        match self.examples_by_mode.get(&mode) {
            Some(pool) if !pool.is_empty() => pool,
            _ => &self.examples,
        }
    }

    /// Number of examples advertised in help.
    pub fn example_count(&self) -> usize {
        if self.examples_by_mode.is_empty() {
            self.examples.len()
        } else {
            self.examples_by_mode.values().map(Vec::len).sum()
        }
    }
}

/// Immutable set of endpoints keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    endpoints: BTreeMap<String, Endpoint>,
}

impl Catalog {
    /// Build a catalog, keying each endpoint by its lowercased name.
    /// Later duplicates replace earlier ones.
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let endpoints = endpoints
            .into_iter()
            .map(|e| (e.name.to_lowercase(), e))
            .collect();
        Self { endpoints }
    }

    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// All endpoints in name order, `random` included.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    /// Endpoints eligible for `/random`, optionally restricted to those
    /// supporting `mode` (compared as a literal string).
    pub fn candidates(&self, mode: Option<&str>) -> Vec<&Endpoint> {
        self.endpoints
            .iter()
            .filter(|(name, _)| name.as_str() != RANDOM_ENDPOINT)
            .map(|(_, e)| e)
            .filter(|e| mode.map_or(true, |m| e.supports_literal(m)))
            .collect()
    }

    /// Union of the modes of every endpoint, first occurrence wins.
    pub fn supported_modes(&self) -> Vec<Mode> {
        let mut modes = Vec::new();
        for mode in self.iter().flat_map(|e| e.modes.iter().copied()) {
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }
        modes
    }
}
