//! `SearchGraphV1`: expansion-event audit log.
//!
//! The normative decision surface is the ordered list of `ExpandEventV1`
//! entries: which node was selected, under which key, and what happened to
//! each of its children.

use tileslide_kernel::proof::hash::{canonical_hash, ContentHash};
use tileslide_kernel::proof::hash_domain::HashDomain;

/// Domain for search graph digests.
pub const DOMAIN_SEARCH_GRAPH: HashDomain = HashDomain::SearchGraph;

/// The complete search audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGraphV1 {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEventV1>,
    /// Aggregate metadata.
    pub metadata: SearchGraphMetadata,
}

/// A single frontier-pop + expansion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandEventV1 {
    /// Total order of expansions.
    pub expansion_order: u64,
    /// The node being expanded.
    pub node_id: u64,
    /// Hex fingerprint of the expanded node's board.
    pub state_fingerprint: String,
    /// The frontier key at time of pop.
    pub pop_key: FrontierPopKeyV1,
    /// Children in generation order.
    pub children: Vec<ChildRecordV1>,
}

/// The frontier ordering key recorded at pop time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierPopKeyV1 {
    pub score: u32,
    pub depth: u32,
    pub creation_order: u64,
}

/// A generated child with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecordV1 {
    /// Index in neighbor generation order.
    pub index: u64,
    /// Hex fingerprint of the child's board.
    pub state_fingerprint: String,
    /// What happened to the child.
    pub outcome: ChildOutcomeV1,
}

/// Outcome of a generated child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcomeV1 {
    /// Inserted into the frontier as a new node.
    Inserted { to_node: u64, score: u32 },
    /// Board already expanded by `existing_node`; not inserted.
    DuplicateSuppressed { existing_node: u64 },
}

/// Aggregate metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchGraphMetadata {
    // Bindings
    pub dimension: u64,
    pub heuristic: String,
    pub policy_digest: String,
    pub root_state_fingerprint: String,
    pub goal_state_fingerprint: String,

    // Counters
    pub total_expansions: u64,
    pub total_children_generated: u64,
    pub total_duplicates_suppressed: u64,
    pub total_frontier_insertions: u64,
    pub frontier_high_water: u64,
    pub termination_reason: TerminationReasonV1,
}

/// Why the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReasonV1 {
    /// A node matching the goal was selected.
    GoalReached { node_id: u64, depth: u32 },
    /// The frontier emptied without selecting a goal.
    FrontierExhausted,
    /// `max_expansions` was hit before a goal was selected.
    ExpansionBudgetExceeded { max_expansions: u64 },
    /// A selected board no longer had exactly one empty marker.
    StateInvariantViolation { node_id: u64 },
}

impl TerminationReasonV1 {
    /// Stable serialized tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
            Self::StateInvariantViolation { .. } => "state_invariant_violation",
        }
    }
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalReached { node_id, depth } => {
                write!(f, "goal reached at node {node_id} (depth {depth})")
            }
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::ExpansionBudgetExceeded { max_expansions } => {
                write!(f, "expansion budget of {max_expansions} exceeded")
            }
            Self::StateInvariantViolation { node_id } => {
                write!(f, "board of node {node_id} lost its empty marker")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// JSON serialization
// ---------------------------------------------------------------------------

impl SearchGraphV1 {
    /// Serialize to compact JSON bytes with sorted keys.
    ///
    /// Output is deterministic: object keys come from `serde_json`'s ordered
    /// map and all numbers are integers.
    #[must_use]
    pub fn to_json_bytes(&self) -> Vec<u8> {
        self.to_json_value().to_string().into_bytes()
    }

    /// Content digest of [`to_json_bytes`](Self::to_json_bytes).
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(DOMAIN_SEARCH_GRAPH, &self.to_json_bytes())
    }

    /// Convert to a `serde_json::Value`.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

fn expand_event_to_json(e: &ExpandEventV1) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(child_record_to_json).collect::<Vec<_>>(),
        "expansion_order": e.expansion_order,
        "node_id": e.node_id,
        "pop_key": {
            "creation_order": e.pop_key.creation_order,
            "depth": e.pop_key.depth,
            "score": e.pop_key.score,
        },
        "state_fingerprint": e.state_fingerprint,
    })
}

fn child_record_to_json(r: &ChildRecordV1) -> serde_json::Value {
    serde_json::json!({
        "index": r.index,
        "outcome": outcome_to_json(r.outcome),
        "state_fingerprint": r.state_fingerprint,
    })
}

fn outcome_to_json(o: ChildOutcomeV1) -> serde_json::Value {
    match o {
        ChildOutcomeV1::Inserted { to_node, score } => {
            serde_json::json!({"score": score, "to_node": to_node, "type": "inserted"})
        }
        ChildOutcomeV1::DuplicateSuppressed { existing_node } => {
            serde_json::json!({"existing_node": existing_node, "type": "duplicate_suppressed"})
        }
    }
}

fn termination_to_json(t: TerminationReasonV1) -> serde_json::Value {
    match t {
        TerminationReasonV1::GoalReached { node_id, depth } => {
            serde_json::json!({"depth": depth, "node_id": node_id, "type": t.as_str()})
        }
        TerminationReasonV1::FrontierExhausted => serde_json::json!({"type": t.as_str()}),
        TerminationReasonV1::ExpansionBudgetExceeded { max_expansions } => {
            serde_json::json!({"max_expansions": max_expansions, "type": t.as_str()})
        }
        TerminationReasonV1::StateInvariantViolation { node_id } => {
            serde_json::json!({"node_id": node_id, "type": t.as_str()})
        }
    }
}

fn metadata_to_json(m: &SearchGraphMetadata) -> serde_json::Value {
    serde_json::json!({
        "dimension": m.dimension,
        "frontier_high_water": m.frontier_high_water,
        "goal_state_fingerprint": m.goal_state_fingerprint,
        "heuristic": m.heuristic,
        "policy_digest": m.policy_digest,
        "root_state_fingerprint": m.root_state_fingerprint,
        "termination_reason": termination_to_json(m.termination_reason),
        "total_children_generated": m.total_children_generated,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expansions": m.total_expansions,
        "total_frontier_insertions": m.total_frontier_insertions,
    })
}
