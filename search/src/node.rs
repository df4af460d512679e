//! Core search node type and frontier ordering key.

use tileslide_kernel::proof::hash::{canonical_hash, ContentHash};
use tileslide_kernel::proof::hash_domain::HashDomain;
use tileslide_kernel::puzzle::board::Board;

/// Domain for board fingerprints.
pub const DOMAIN_SEARCH_NODE: HashDomain = HashDomain::SearchNode;

/// Fingerprint of a board: `canonical_hash(DOMAIN_SEARCH_NODE, board.identity_bytes())`.
#[must_use]
pub fn board_fingerprint(board: &Board) -> ContentHash {
    canonical_hash(DOMAIN_SEARCH_NODE, &board.identity_bytes())
}

/// An immutable search node.
///
/// Ordering for frontier extraction uses `(score, creation_order)` where
/// `score = depth + h_cost`. Lower is better; ties go to the node created
/// first.
///
/// The node does not evaluate its own heuristic: the engine builds it with
/// [`SearchNodeV1::new`] and sets the estimate exactly once with
/// [`SearchNodeV1::with_estimate`] before inserting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNodeV1 {
    /// Monotonic node identifier assigned by the engine.
    pub node_id: u64,
    /// Parent node ID (`None` for root).
    pub parent_id: Option<u64>,
    /// Board owned by this node.
    pub state: Board,
    /// Canonical hash of the board's identity bytes.
    pub state_fingerprint: ContentHash,
    /// Slides from the root (g-cost; root = 0).
    pub depth: u32,
    /// Heuristic estimate of remaining slides.
    pub h_cost: u32,
    /// Evaluation score (f-value): `depth + h_cost`.
    pub score: u32,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl SearchNodeV1 {
    /// Build an unscored node (`h_cost = 0`, `score = depth`).
    #[must_use]
    pub fn new(
        node_id: u64,
        parent_id: Option<u64>,
        state: Board,
        depth: u32,
        creation_order: u64,
    ) -> Self {
        let state_fingerprint = board_fingerprint(&state);
        Self {
            node_id,
            parent_id,
            state,
            state_fingerprint,
            depth,
            h_cost: 0,
            score: depth,
            creation_order,
        }
    }

    /// Set the heuristic estimate, fixing `score = depth + h_cost`.
    #[must_use]
    pub fn with_estimate(mut self, h_cost: u32) -> Self {
        self.h_cost = h_cost;
        self.score = self.depth.saturating_add(h_cost);
        self
    }

    /// This node's frontier key.
    #[must_use]
    pub fn key(&self) -> FrontierKey {
        FrontierKey::from(self)
    }
}

/// The frontier ordering key: `(score, creation_order)`.
///
/// Equal scores keep insertion order, which is what a stable sort of the
/// open list after every insertion produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrontierKey {
    pub score: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.score
            .cmp(&other.score)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&SearchNodeV1> for FrontierKey {
    fn from(node: &SearchNodeV1) -> Self {
        Self {
            score: node.score,
            creation_order: node.creation_order,
        }
    }
}
