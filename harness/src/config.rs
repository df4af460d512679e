//! Solve configuration: optional overrides layered onto the default policy.
//!
//! Loaded from JSON (`SolveConfig::load`) and then patched by CLI flags.
//! Every field is optional; an empty object `{}` yields the hardened
//! default policy.
//!
//! ```json
//! { "heuristic": "manhattan", "max_expansions": 50000 }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tileslide_search::policy::{DedupPolicyV1, HeuristicKindV1, SearchPolicyV1};

/// Policy overrides for a harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolveConfig {
    /// Board side length. `None` infers it from the first puzzle row.
    pub dimension: Option<usize>,
    /// Start from [`SearchPolicyV1::baseline`] instead of the default.
    pub baseline: bool,
    /// Heuristic name (`misplaced_tiles` or `manhattan`).
    pub heuristic: Option<String>,
    /// Expansion ceiling. `None` keeps the base policy's value.
    pub max_expansions: Option<u64>,
    /// Remove the expansion ceiling entirely.
    pub unbounded: bool,
    /// Closed-set duplicate suppression.
    pub dedup: Option<bool>,
    /// Parity pre-check before search.
    pub require_solvable: Option<bool>,
}

/// Failure to load or apply a [`SolveConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    Io { path: PathBuf, detail: String },
    /// The config text is not a valid `SolveConfig`.
    Parse { detail: String },
    /// `heuristic` names no known heuristic.
    UnknownHeuristic { name: String },
    /// `unbounded` and `max_expansions` were both set.
    ConflictingBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "reading {}: {detail}", path.display()),
            Self::Parse { detail } => write!(f, "invalid config: {detail}"),
            Self::UnknownHeuristic { name } => write!(
                f,
                "unknown heuristic `{name}` (expected `{}` or `{}`)",
                HeuristicKindV1::MisplacedTiles.as_str(),
                HeuristicKindV1::Manhattan.as_str()
            ),
            Self::ConflictingBudget => {
                write!(f, "`unbounded` and `max_expansions` are mutually exclusive")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SolveConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a JSON config.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })
    }

    /// Resolve the overrides into a concrete policy.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownHeuristic`] or [`ConfigError::ConflictingBudget`].
    pub fn to_policy(&self) -> Result<SearchPolicyV1, ConfigError> {
        let mut policy = if self.baseline {
            SearchPolicyV1::baseline()
        } else {
            SearchPolicyV1::default()
        };
        if let Some(name) = &self.heuristic {
            policy.heuristic = HeuristicKindV1::parse(name)
                .ok_or_else(|| ConfigError::UnknownHeuristic { name: name.clone() })?;
        }
        match (self.unbounded, self.max_expansions) {
            (true, Some(_)) => return Err(ConfigError::ConflictingBudget),
            (true, None) => policy.max_expansions = None,
            (false, Some(n)) => policy.max_expansions = Some(n),
            (false, None) => {}
        }
        if let Some(dedup) = self.dedup {
            policy.dedup = if dedup {
                DedupPolicyV1::SkipExpanded
            } else {
                DedupPolicyV1::None
            };
        }
        if let Some(check) = self.require_solvable {
            policy.require_solvable = check;
        }
        Ok(policy)
    }
}
