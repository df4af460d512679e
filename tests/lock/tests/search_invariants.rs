//! Structural invariants of the expansion loop and its audit graph.
//!
//! Proves:
//! 1. Popped `(score, creation_order)` keys strictly increase under a
//!    consistent heuristic
//! 2. Graph totals agree with the per-expansion child records
//! 3. Every expanded node was first inserted by an earlier expansion
//! 4. Dedup never re-inserts an already expanded board
//! 5. Graph bytes are identical across fresh and reused engines
//! 6. Neighbor generation is idempotent
//! 7. Unreachable goals terminate under every hardened setting

use std::collections::BTreeSet;

use lock_tests::puzzles::{board, scramble, solved};
use tileslide_kernel::puzzle::board::Board;
use tileslide_search::error::SearchError;
use tileslide_search::graph::{ChildOutcomeV1, SearchGraphV1, TerminationReasonV1};
use tileslide_search::policy::{DedupPolicyV1, HeuristicKindV1, SearchPolicyV1};
use tileslide_search::search::{SearchEngine, SearchResult};

fn classic() -> Board {
    board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5])
}

fn run(policy: SearchPolicyV1, initial: Board) -> SearchResult {
    SearchEngine::new(policy)
        .solve(initial, solved(3), |_| {})
        .expect("inputs are valid")
}

fn policies() -> Vec<SearchPolicyV1> {
    vec![
        SearchPolicyV1::default(),
        SearchPolicyV1 {
            heuristic: HeuristicKindV1::Manhattan,
            ..SearchPolicyV1::default()
        },
        SearchPolicyV1::baseline(),
    ]
}

#[test]
fn pop_keys_strictly_increase() {
    for policy in policies() {
        let initial = if policy.dedup == DedupPolicyV1::None {
            board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8])
        } else {
            classic()
        };
        let result = run(policy, initial);
        let keys: Vec<(u32, u64)> = result
            .graph
            .expansions
            .iter()
            .map(|e| (e.pop_key.score, e.pop_key.creation_order))
            .collect();
        assert!(
            keys.windows(2).all(|w| w[0] < w[1]),
            "pop keys not strictly increasing: {keys:?}"
        );
        let goal = result.goal_node.expect("goal reached");
        let last = keys.last().expect("at least one expansion");
        assert!((goal.score, goal.creation_order) > *last);
    }
}

fn assert_totals_consistent(graph: &SearchGraphV1) {
    let m = &graph.metadata;
    let children: u64 = graph.expansions.iter().map(|e| e.children.len() as u64).sum();
    let suppressed = graph
        .expansions
        .iter()
        .flat_map(|e| &e.children)
        .filter(|c| matches!(c.outcome, ChildOutcomeV1::DuplicateSuppressed { .. }))
        .count() as u64;
    assert_eq!(m.total_expansions, graph.expansions.len() as u64);
    assert_eq!(m.total_children_generated, children);
    assert_eq!(m.total_duplicates_suppressed, suppressed);
    // Root insertion plus every inserted child.
    assert_eq!(m.total_frontier_insertions, 1 + children - suppressed);
    assert!(m.total_frontier_insertions > m.total_expansions);
    assert!(m.frontier_high_water <= m.total_frontier_insertions);
    for (i, e) in graph.expansions.iter().enumerate() {
        assert_eq!(e.expansion_order, i as u64);
        assert!((2..=4).contains(&e.children.len()));
    }
}

#[test]
fn graph_totals_match_child_records() {
    for policy in policies() {
        let initial = if policy.dedup == DedupPolicyV1::None {
            board(3, &[4, 1, 3, 7, 2, 6, 0, 5, 8])
        } else {
            classic()
        };
        assert_totals_consistent(&run(policy, initial).graph);
    }
}

#[test]
fn expanded_nodes_come_from_earlier_insertions() {
    let result = run(SearchPolicyV1::default(), classic());
    let mut inserted = BTreeSet::from([0_u64]);
    for e in &result.graph.expansions {
        assert!(
            inserted.contains(&e.node_id),
            "node {} expanded before insertion",
            e.node_id
        );
        for c in &e.children {
            if let ChildOutcomeV1::Inserted { to_node, .. } = c.outcome {
                assert!(inserted.insert(to_node), "node id {to_node} reused");
            }
        }
    }
}

#[test]
fn dedup_never_inserts_expanded_board() {
    let result = run(SearchPolicyV1::default(), classic());
    let mut expanded = BTreeSet::new();
    for e in &result.graph.expansions {
        for c in &e.children {
            let already = expanded.contains(&c.state_fingerprint);
            match c.outcome {
                ChildOutcomeV1::Inserted { .. } => assert!(!already),
                ChildOutcomeV1::DuplicateSuppressed { .. } => assert!(already),
            }
        }
        expanded.insert(e.state_fingerprint.clone());
    }
    assert!(result.graph.metadata.total_duplicates_suppressed > 0);
}

#[test]
fn graph_bytes_identical_across_engines() {
    let mut reused = SearchEngine::new(SearchPolicyV1::default());
    let warmup = reused
        .solve(board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]), solved(3), |_| {})
        .expect("valid");
    assert_eq!(warmup.depth(), Some(2));

    let again = reused.solve(classic(), solved(3), |_| {}).expect("valid");
    let fresh = run(SearchPolicyV1::default(), classic());
    assert_eq!(again.graph.to_json_bytes(), fresh.graph.to_json_bytes());
    assert_eq!(again.graph.digest(), fresh.graph.digest());
    assert_eq!(again.path, fresh.path);
}

#[test]
fn path_is_a_chain_of_single_slides() {
    for seed in [3, 11, 29] {
        let initial = scramble(&solved(3), seed, 16);
        let result = run(SearchPolicyV1::default(), initial.clone());
        let path = &result.path;
        assert_eq!(path.first(), Some(&initial));
        assert_eq!(path.last(), Some(&solved(3)));
        assert_eq!(path.len() as u32, result.depth().expect("solved") + 1);
        for pair in path.windows(2) {
            let next = pair[0].neighbors().expect("has empty marker");
            assert!(next.contains(&pair[1]), "non-adjacent boards in path");
        }
    }
}

#[test]
fn neighbor_generation_is_idempotent() {
    for seed in 0..16 {
        let b = scramble(&solved(4), seed, 30);
        let first = b.neighbors().expect("has empty marker");
        let second = b.neighbors().expect("has empty marker");
        assert_eq!(first, second);
        for n in &first {
            assert_eq!(n.symbols_sorted(), b.symbols_sorted());
            assert!(n.neighbors().expect("has empty marker").contains(&b));
        }
    }
}

#[test]
fn unreachable_goal_always_terminates_when_hardened() {
    let swapped = board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]);

    let mut engine = SearchEngine::new(SearchPolicyV1::default());
    assert_eq!(
        engine.solve(swapped.clone(), solved(3), |_| {}).err(),
        Some(SearchError::Unsolvable)
    );

    let budget_only = SearchPolicyV1 {
        max_expansions: Some(200),
        dedup: DedupPolicyV1::None,
        require_solvable: false,
        heuristic: HeuristicKindV1::MisplacedTiles,
    };
    let result = run(budget_only, swapped.clone());
    assert_eq!(
        result.termination,
        TerminationReasonV1::ExpansionBudgetExceeded { max_expansions: 200 }
    );
    assert!(result.path.is_empty());

    // 2×2 boards have 12 reachable states per parity class.
    let small = board(2, &[2, 1, 3, 0]);
    let dedup_only = SearchPolicyV1 {
        max_expansions: None,
        require_solvable: false,
        ..SearchPolicyV1::default()
    };
    let result = SearchEngine::new(dedup_only)
        .solve(small, solved(2), |_| {})
        .expect("valid");
    assert_eq!(result.termination, TerminationReasonV1::FrontierExhausted);
}

#[test]
fn budget_exceeded_graph_json_is_complete() {
    let policy = SearchPolicyV1 {
        max_expansions: Some(25),
        require_solvable: false,
        ..SearchPolicyV1::default()
    };
    let result = run(policy, board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]));
    let bytes = result.graph.to_json_bytes();
    assert!(!bytes.contains(&b'\n'), "graph JSON is not compact");

    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
    let termination = &value["metadata"]["termination_reason"];
    assert_eq!(termination["type"], "expansion_budget_exceeded");
    assert_eq!(termination["max_expansions"], 25);
    assert_eq!(value["metadata"]["total_expansions"], 25);
    assert_eq!(
        value["expansions"].as_array().map(Vec::len),
        Some(25),
        "every expansion is recorded even without a goal"
    );
    assert_eq!(value["metadata"]["heuristic"], "misplaced_tiles");
}
