//! Shared helpers for tileslide benchmark suites.
//!
//! Boards come from the lock-test fixtures so benchmarks and lock tests
//! measure the same puzzles.

pub use lock_tests::puzzles::{board, scramble, solved};
use tileslide_kernel::puzzle::board::Board;
use tileslide_search::policy::{DedupPolicyV1, HeuristicKindV1, SearchPolicyV1};
use tileslide_search::search::{SearchEngine, SearchResult};

/// A named solve workload.
pub struct Regime {
    pub name: &'static str,
    pub initial: Board,
    pub goal: Board,
    pub policy: SearchPolicyV1,
}

/// Workloads from trivial to budget-bound.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let classic = board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
    let hardened = SearchPolicyV1::default();
    let manhattan = SearchPolicyV1 {
        heuristic: HeuristicKindV1::Manhattan,
        ..SearchPolicyV1::default()
    };
    vec![
        Regime {
            name: "one_slide",
            initial: board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]),
            goal: solved(3),
            policy: hardened.clone(),
        },
        Regime {
            name: "depth14_misplaced",
            initial: classic.clone(),
            goal: solved(3),
            policy: hardened.clone(),
        },
        Regime {
            name: "depth14_manhattan",
            initial: classic,
            goal: solved(3),
            policy: manhattan.clone(),
        },
        Regime {
            name: "depth6_baseline",
            initial: board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8]),
            goal: solved(3),
            policy: SearchPolicyV1::baseline(),
        },
        Regime {
            name: "4x4_scramble_manhattan",
            initial: scramble(&solved(4), 42, 24),
            goal: solved(4),
            policy: manhattan,
        },
        Regime {
            name: "budget_limited_unsolvable",
            initial: board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]),
            goal: solved(3),
            policy: SearchPolicyV1 {
                max_expansions: Some(2_000),
                require_solvable: false,
                ..hardened.clone()
            },
        },
        Regime {
            name: "2x2_frontier_exhausted",
            initial: board(2, &[2, 1, 3, 0]),
            goal: solved(2),
            policy: SearchPolicyV1 {
                max_expansions: None,
                dedup: DedupPolicyV1::SkipExpanded,
                require_solvable: false,
                ..hardened
            },
        },
    ]
}

/// Solve one regime on a fresh engine.
///
/// # Panics
///
/// Panics if the engine rejects the regime's inputs.
#[must_use]
pub fn run_regime(regime: &Regime) -> SearchResult {
    SearchEngine::new(regime.policy.clone())
        .solve(regime.initial.clone(), regime.goal.clone(), |_| {})
        .expect("regime inputs are valid")
}
