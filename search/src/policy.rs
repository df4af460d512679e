//! Search policy types.

use tileslide_kernel::proof::hash::{canonical_hash, ContentHash};
use tileslide_kernel::proof::hash_domain::HashDomain;

use crate::error::SearchError;
use crate::heuristic::{Heuristic, ManhattanDistance, MisplacedTiles};

/// Default hard cap on node expansions.
pub const DEFAULT_MAX_EXPANSIONS: u64 = 1_000_000;

/// Search budget, duplicate handling, and heuristic selection.
///
/// The default policy is the hardened one: parity pre-check, closed-set
/// duplicate suppression, and an expansion ceiling. [`SearchPolicyV1::baseline`]
/// disables all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// Duplicate-state policy for newly generated children.
    pub dedup: DedupPolicyV1,
    /// Reject unreachable goals before search begins.
    pub require_solvable: bool,
    /// Heuristic used to score nodes.
    pub heuristic: HeuristicKindV1,
}

impl SearchPolicyV1 {
    /// No budget, no duplicate suppression, no solvability check,
    /// misplaced-tiles heuristic. Loops forever on an unreachable goal.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            max_expansions: None,
            dedup: DedupPolicyV1::None,
            require_solvable: false,
            heuristic: HeuristicKindV1::MisplacedTiles,
        }
    }

    /// Validate that the engine can honor this policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget,
    /// which would stop every unsolved search at the root before expanding
    /// anything.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Policy snapshot as JSON (keys sorted by `serde_json`'s map).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "dedup": self.dedup.as_str(),
            "heuristic": self.heuristic.as_str(),
            "max_expansions": self.max_expansions,
            "require_solvable": self.require_solvable,
            "schema_version": "search_policy.v1",
        })
    }

    /// Content digest committing a search graph to this policy.
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(
            HashDomain::SearchPolicy,
            self.to_json_value().to_string().as_bytes(),
        )
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
            dedup: DedupPolicyV1::SkipExpanded,
            require_solvable: true,
            heuristic: HeuristicKindV1::MisplacedTiles,
        }
    }
}

/// Duplicate-state policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicyV1 {
    /// Every generated child enters the frontier.
    None,
    /// Children whose board fingerprint is already in the expanded set are
    /// dropped. Default.
    SkipExpanded,
}

impl DedupPolicyV1 {
    /// Stable serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SkipExpanded => "skip_expanded",
        }
    }
}

/// Built-in heuristic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKindV1 {
    /// Count of tiles off their goal cell. Default.
    MisplacedTiles,
    /// Sum of tile distances to their goal cells.
    Manhattan,
}

impl HeuristicKindV1 {
    /// Stable serialized name (matches [`Heuristic::name`]).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MisplacedTiles => "misplaced_tiles",
            Self::Manhattan => "manhattan",
        }
    }

    /// Parse a serialized name. Accepts `misplaced` as a short form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "misplaced_tiles" | "misplaced" => Some(Self::MisplacedTiles),
            "manhattan" => Some(Self::Manhattan),
            _ => None,
        }
    }

    /// Instantiate the heuristic.
    #[must_use]
    pub fn build(self) -> Box<dyn Heuristic> {
        match self {
            Self::MisplacedTiles => Box::new(MisplacedTiles),
            Self::Manhattan => Box::new(ManhattanDistance),
        }
    }
}
