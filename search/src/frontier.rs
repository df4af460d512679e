//! Best-first frontier and expanded set.
//!
//! The frontier selects nodes in ascending `(score, creation_order)` order,
//! the same order a stable sort of the open list by score after every
//! insertion would give, at O(log n) per push/pop.
//!
//! The expanded set uses a `BTreeMap` index (not `HashMap`) for
//! deterministic iteration order at serialization boundaries.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tileslide_kernel::proof::hash::ContentHash;

use crate::node::{FrontierKey, SearchNodeV1};

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest score first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNodeV1,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Generated-but-not-yet-expanded nodes.
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    insertions: u64,
    high_water: u64,
}

impl BestFirstFrontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Nodes are never merged; equal boards coexist.
    pub fn push(&mut self, node: SearchNodeV1) {
        self.heap.push(FrontierEntry {
            key: Reverse(node.key()),
            node,
        });
        self.insertions += 1;
        self.high_water = self.high_water.max(self.heap.len() as u64);
    }

    /// Remove and return the lowest-keyed node.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNodeV1> {
        self.heap.pop().map(|e| e.node)
    }

    /// Key of the node the next [`pop`](Self::pop) would return.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    /// All keys in selection order.
    #[must_use]
    pub fn ordered_keys(&self) -> Vec<FrontierKey> {
        let mut keys: Vec<FrontierKey> = self.heap.iter().map(|e| e.key.0).collect();
        keys.sort_unstable();
        keys
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total pushes since creation (or the last [`clear`](Self::clear)).
    #[must_use]
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Drop every node and reset counters.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.insertions = 0;
        self.high_water = 0;
    }
}

/// Nodes already selected and expanded, in expansion order.
///
/// Arena-style: nodes are addressed by `node_id`, and a fingerprint index
/// maps each expanded board to the first node that expanded it.
#[derive(Debug, Default)]
pub struct ExpandedSet {
    nodes: Vec<SearchNodeV1>,
    by_id: BTreeMap<u64, usize>,
    by_fingerprint: BTreeMap<ContentHash, u64>,
}

impl ExpandedSet {
    /// Create a new empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an expanded node. The fingerprint index keeps the first entry.
    pub fn insert(&mut self, node: SearchNodeV1) {
        self.by_id.insert(node.node_id, self.nodes.len());
        self.by_fingerprint
            .entry(node.state_fingerprint.clone())
            .or_insert(node.node_id);
        self.nodes.push(node);
    }

    /// Node ID that first expanded a board with this fingerprint.
    #[must_use]
    pub fn node_for(&self, fingerprint: &ContentHash) -> Option<u64> {
        self.by_fingerprint.get(fingerprint).copied()
    }

    /// Whether a board with this fingerprint has been expanded.
    #[must_use]
    pub fn contains(&self, fingerprint: &ContentHash) -> bool {
        self.by_fingerprint.contains_key(fingerprint)
    }

    /// Look up an expanded node by ID.
    #[must_use]
    pub fn get(&self, node_id: u64) -> Option<&SearchNodeV1> {
        self.by_id.get(&node_id).map(|&i| &self.nodes[i])
    }

    /// Expanded nodes in expansion order.
    #[must_use]
    pub fn nodes(&self) -> &[SearchNodeV1] {
        &self.nodes
    }

    /// Number of expanded nodes (re-expansions included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been expanded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct boards expanded.
    #[must_use]
    pub fn distinct_states(&self) -> usize {
        self.by_fingerprint.len()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_id.clear();
        self.by_fingerprint.clear();
    }
}
