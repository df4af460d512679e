//! Search engine and expansion loop.

use std::iter::FusedIterator;

use tileslide_kernel::proof::hash::ContentHash;
use tileslide_kernel::puzzle::board::Board;
use tileslide_kernel::puzzle::parity;
use tracing::{debug, info, trace};

use crate::error::{BoardRole, SearchError};
use crate::frontier::{BestFirstFrontier, ExpandedSet};
use crate::graph::{
    ChildOutcomeV1, ChildRecordV1, ExpandEventV1, FrontierPopKeyV1, SearchGraphMetadata,
    SearchGraphV1, TerminationReasonV1,
};
use crate::heuristic::{is_goal, Heuristic};
use crate::node::{board_fingerprint, SearchNodeV1};
use crate::policy::{DedupPolicyV1, SearchPolicyV1};

/// Result of a search execution.
///
/// Always contains a complete `SearchGraphV1` audit trail regardless of how
/// the search terminated.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Why the loop stopped.
    pub termination: TerminationReasonV1,
    /// The selected goal node (if found).
    pub goal_node: Option<SearchNodeV1>,
    /// Boards from the initial board to the goal (empty without a goal).
    pub path: Vec<Board>,
    /// The complete search graph audit trail.
    pub graph: SearchGraphV1,
}

impl SearchResult {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReasonV1::GoalReached { .. })
    }

    /// Solution length in slides, if a goal was reached.
    #[must_use]
    pub fn depth(&self) -> Option<u32> {
        self.goal_node.as_ref().map(|n| n.depth)
    }
}

/// Running counters of one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    pub expansions: u64,
    pub children_generated: u64,
    pub duplicates_suppressed: u64,
    pub frontier_insertions: u64,
}

/// Best-first search engine.
///
/// The frontier and expanded set are owned by the engine and reset at the
/// start of every search. [`SearchEngine::start`] borrows the engine
/// mutably, so one instance runs one search at a time; concurrent solves
/// need separate engines.
pub struct SearchEngine {
    policy: SearchPolicyV1,
    heuristic: Box<dyn Heuristic>,
    frontier: BestFirstFrontier,
    expanded: ExpandedSet,
}

impl SearchEngine {
    /// Engine using the heuristic selected by `policy`.
    #[must_use]
    pub fn new(policy: SearchPolicyV1) -> Self {
        let heuristic = policy.heuristic.build();
        Self::with_heuristic(policy, heuristic)
    }

    /// Engine using a caller-supplied heuristic (overrides `policy.heuristic`).
    #[must_use]
    pub fn with_heuristic(policy: SearchPolicyV1, heuristic: Box<dyn Heuristic>) -> Self {
        Self {
            policy,
            heuristic,
            frontier: BestFirstFrontier::new(),
            expanded: ExpandedSet::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// Nodes not yet expanded by the last search.
    #[must_use]
    pub fn frontier(&self) -> &BestFirstFrontier {
        &self.frontier
    }

    /// Nodes expanded by the last search.
    #[must_use]
    pub fn expanded(&self) -> &ExpandedSet {
        &self.expanded
    }

    /// Validate the inputs and begin a search.
    ///
    /// Returns a lazy iterator over the boards selected from the frontier,
    /// in selection order. On success the last board is the goal.
    ///
    /// # Errors
    ///
    /// Pre-flight failures only (see [`SearchError`]); the frontier is not
    /// touched when one is returned.
    pub fn start(&mut self, initial: Board, goal: Board) -> Result<Visits<'_>, SearchError> {
        validate_inputs(&self.policy, &initial, &goal)?;

        self.frontier.clear();
        self.expanded.clear();

        let root = SearchNodeV1::new(0, None, initial, 0, 0);
        let h = self.heuristic.estimate(&root.state, &goal);
        let root = root.with_estimate(h);
        let root_fingerprint = root.state_fingerprint.clone();

        info!(
            event = "solve_start",
            dimension = goal.dimension(),
            heuristic = self.heuristic.name(),
            root_score = root.score,
        );

        self.frontier.push(root);

        Ok(Visits {
            goal_fingerprint: board_fingerprint(&goal),
            engine: self,
            goal,
            root_fingerprint,
            expansions: Vec::new(),
            counters: SearchCounters {
                frontier_insertions: 1,
                ..SearchCounters::default()
            },
            next_node_id: 1,
            termination: None,
            goal_node: None,
        })
    }

    /// Run a search to completion, handing each selected board to `observer`.
    ///
    /// # Errors
    ///
    /// Same pre-flight failures as [`SearchEngine::start`].
    pub fn solve<F>(
        &mut self,
        initial: Board,
        goal: Board,
        mut observer: F,
    ) -> Result<SearchResult, SearchError>
    where
        F: FnMut(&Board),
    {
        let mut visits = self.start(initial, goal)?;
        for board in visits.by_ref() {
            observer(&board);
        }
        Ok(visits.finish())
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("policy", &self.policy)
            .field("heuristic", &self.heuristic.name())
            .field("frontier_len", &self.frontier.len())
            .field("expanded_len", &self.expanded.len())
            .finish()
    }
}

fn validate_inputs(
    policy: &SearchPolicyV1,
    initial: &Board,
    goal: &Board,
) -> Result<(), SearchError> {
    policy.validate()?;
    initial
        .locate_empty()
        .map_err(|source| SearchError::MalformedBoard {
            which: BoardRole::Initial,
            source,
        })?;
    goal.locate_empty()
        .map_err(|source| SearchError::MalformedBoard {
            which: BoardRole::Goal,
            source,
        })?;
    if initial.dimension() != goal.dimension() {
        return Err(SearchError::DimensionMismatch {
            initial: initial.dimension(),
            goal: goal.dimension(),
        });
    }
    if initial.symbols_sorted() != goal.symbols_sorted() {
        return Err(SearchError::SymbolMismatch);
    }
    if policy.require_solvable {
        // Dimensions and symbol sets already agree, so only the parity
        // verdict can come back.
        let reachable = parity::is_reachable(initial, goal).map_err(|source| {
            SearchError::MalformedBoard {
                which: BoardRole::Initial,
                source,
            }
        })?;
        if !reachable {
            return Err(SearchError::Unsolvable);
        }
    }
    Ok(())
}

/// A running search: yields each board selected from the frontier.
///
/// Finite and non-restartable. After the last board, [`Visits::finish`]
/// produces the [`SearchResult`].
pub struct Visits<'e> {
    engine: &'e mut SearchEngine,
    goal: Board,
    goal_fingerprint: ContentHash,
    root_fingerprint: ContentHash,
    expansions: Vec<ExpandEventV1>,
    counters: SearchCounters,
    next_node_id: u64,
    termination: Option<TerminationReasonV1>,
    goal_node: Option<SearchNodeV1>,
}

impl Visits<'_> {
    /// Counters so far.
    #[must_use]
    pub fn counters(&self) -> SearchCounters {
        self.counters
    }

    /// Termination reason, once the search has stopped.
    #[must_use]
    pub fn termination(&self) -> Option<TerminationReasonV1> {
        self.termination
    }

    /// Current frontier (read-only).
    #[must_use]
    pub fn frontier(&self) -> &BestFirstFrontier {
        &self.engine.frontier
    }

    /// Current expanded set (read-only).
    #[must_use]
    pub fn expanded(&self) -> &ExpandedSet {
        &self.engine.expanded
    }

    /// Drive the search to termination and build the result.
    #[must_use]
    pub fn finish(mut self) -> SearchResult {
        while self.next().is_some() {}

        let termination = self
            .termination
            .unwrap_or(TerminationReasonV1::FrontierExhausted);
        let path = self
            .goal_node
            .as_ref()
            .map(|goal| reconstruct_path(&self.engine.expanded, goal))
            .unwrap_or_default();

        let graph = SearchGraphV1 {
            expansions: self.expansions,
            metadata: SearchGraphMetadata {
                dimension: self.goal.dimension() as u64,
                heuristic: self.engine.heuristic.name().to_string(),
                policy_digest: self.engine.policy.digest().as_str().to_string(),
                root_state_fingerprint: self.root_fingerprint.hex_digest().to_string(),
                goal_state_fingerprint: self.goal_fingerprint.hex_digest().to_string(),
                total_expansions: self.counters.expansions,
                total_children_generated: self.counters.children_generated,
                total_duplicates_suppressed: self.counters.duplicates_suppressed,
                total_frontier_insertions: self.counters.frontier_insertions,
                frontier_high_water: self.engine.frontier.high_water(),
                termination_reason: termination,
            },
        };

        SearchResult {
            termination,
            goal_node: self.goal_node,
            path,
            graph,
        }
    }

    fn terminate(&mut self, reason: TerminationReasonV1) {
        info!(
            event = "solve_end",
            termination = reason.as_str(),
            expansions = self.counters.expansions,
            frontier_high_water = self.engine.frontier.high_water(),
        );
        self.termination = Some(reason);
    }

    /// Generate, score and insert the children of `current`, then move it
    /// to the expanded set.
    fn expand(&mut self, current: SearchNodeV1) {
        let Ok(neighbors) = current.state.neighbors() else {
            self.terminate(TerminationReasonV1::StateInvariantViolation {
                node_id: current.node_id,
            });
            return;
        };

        let mut children = Vec::with_capacity(neighbors.len());
        for (index, board) in neighbors.into_iter().enumerate() {
            self.counters.children_generated += 1;
            let fingerprint = board_fingerprint(&board);
            let state_fingerprint = fingerprint.hex_digest().to_string();

            if self.engine.policy.dedup == DedupPolicyV1::SkipExpanded {
                if let Some(existing_node) = self.engine.expanded.node_for(&fingerprint) {
                    trace!(parent = current.node_id, existing_node, "duplicate suppressed");
                    self.counters.duplicates_suppressed += 1;
                    children.push(ChildRecordV1 {
                        index: index as u64,
                        state_fingerprint,
                        outcome: ChildOutcomeV1::DuplicateSuppressed { existing_node },
                    });
                    continue;
                }
            }

            let node_id = self.next_node_id;
            self.next_node_id += 1;
            let child = SearchNodeV1::new(
                node_id,
                Some(current.node_id),
                board,
                current.depth + 1,
                node_id,
            );
            let h = self.engine.heuristic.estimate(&child.state, &self.goal);
            let child = child.with_estimate(h);

            children.push(ChildRecordV1 {
                index: index as u64,
                state_fingerprint,
                outcome: ChildOutcomeV1::Inserted {
                    to_node: node_id,
                    score: child.score,
                },
            });
            self.engine.frontier.push(child);
            self.counters.frontier_insertions += 1;
        }

        debug!(
            node_id = current.node_id,
            score = current.score,
            depth = current.depth,
            children = children.len(),
            frontier_len = self.engine.frontier.len(),
            "expanded"
        );

        self.expansions.push(ExpandEventV1 {
            expansion_order: self.counters.expansions,
            node_id: current.node_id,
            state_fingerprint: current.state_fingerprint.hex_digest().to_string(),
            pop_key: FrontierPopKeyV1 {
                score: current.score,
                depth: current.depth,
                creation_order: current.creation_order,
            },
            children,
        });
        self.engine.expanded.insert(current);
        self.counters.expansions += 1;
    }
}

impl Iterator for Visits<'_> {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        if self.termination.is_some() {
            return None;
        }

        let Some(current) = self.engine.frontier.pop() else {
            self.terminate(TerminationReasonV1::FrontierExhausted);
            return None;
        };
        let emitted = current.state.clone();

        if is_goal(&current.state, &self.goal) {
            self.terminate(TerminationReasonV1::GoalReached {
                node_id: current.node_id,
                depth: current.depth,
            });
            self.goal_node = Some(current);
            return Some(emitted);
        }

        // The budget caps expansions, not selections: a goal already on the
        // frontier is still found.
        if let Some(max_expansions) = self.engine.policy.max_expansions {
            if self.counters.expansions >= max_expansions {
                self.terminate(TerminationReasonV1::ExpansionBudgetExceeded { max_expansions });
                return Some(emitted);
            }
        }

        self.expand(current);
        Some(emitted)
    }
}

impl FusedIterator for Visits<'_> {}

/// Boards from the root to `goal`, following parent links through the
/// expanded set.
///
/// Every ancestor of a frontier node has been expanded, so the chain is
/// complete for any node the engine selected.
#[must_use]
pub fn reconstruct_path(expanded: &ExpandedSet, goal: &SearchNodeV1) -> Vec<Board> {
    let mut path = vec![goal.state.clone()];
    let mut parent = goal.parent_id;

    while let Some(id) = parent {
        let Some(node) = expanded.get(id) else {
            break;
        };
        path.push(node.state.clone());
        parent = node.parent_id;
    }

    path.reverse();
    path
}
