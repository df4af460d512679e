//! Solution depth and heuristic bounds against a breadth-first reference.
//!
//! Proves, on every 3×3 board within 14 moves of the standard goal:
//! 1. Both heuristics are zero on the goal and never exceed the true distance
//! 2. Both heuristics change by at most one per slide (consistency)
//! 3. The engine's solution depth equals the BFS distance (sampled boards)
//! 4. Baseline and hardened policies agree on depth

use std::collections::HashMap;

use lock_tests::puzzles::{bfs_distances, board, scramble, solved};
use tileslide_kernel::puzzle::board::Board;
use tileslide_search::heuristic::{Heuristic, ManhattanDistance, MisplacedTiles};
use tileslide_search::policy::{HeuristicKindV1, SearchPolicyV1};
use tileslide_search::search::SearchEngine;

const RADIUS: u32 = 14;

fn reference() -> HashMap<Board, u32> {
    bfs_distances(&solved(3), RADIUS)
}

/// Up to `per_depth` boards at each distance, in a stable order.
fn samples(dist: &HashMap<Board, u32>, per_depth: usize, max_depth: u32) -> Vec<(Board, u32)> {
    let mut all: Vec<(&Board, u32)> = dist
        .iter()
        .filter(|(_, &d)| d <= max_depth)
        .map(|(b, &d)| (b, d))
        .collect();
    all.sort_by_key(|(b, d)| (*d, b.identity_bytes()));
    let mut out = Vec::new();
    for depth in 0..=max_depth {
        out.extend(
            all.iter()
                .filter(|(_, d)| *d == depth)
                .take(per_depth)
                .map(|(b, d)| ((*b).clone(), *d)),
        );
    }
    out
}

fn solve_depth(policy: SearchPolicyV1, initial: Board) -> Option<u32> {
    let mut engine = SearchEngine::new(policy);
    engine
        .solve(initial, solved(3), |_| {})
        .expect("inputs are valid")
        .depth()
}

#[test]
fn heuristics_are_admissible() {
    let goal = solved(3);
    let dist = reference();
    let heuristics: [&dyn Heuristic; 2] = [&MisplacedTiles, &ManhattanDistance];
    for h in heuristics {
        assert_eq!(h.estimate(&goal, &goal), 0, "{} nonzero on goal", h.name());
        for (b, &d) in &dist {
            let estimate = h.estimate(b, &goal);
            assert!(
                estimate <= d,
                "{} overestimates: h={estimate} > d={d} for\n{b}",
                h.name()
            );
        }
    }
}

#[test]
fn heuristics_are_consistent() {
    let goal = solved(3);
    let dist = reference();
    let heuristics: [&dyn Heuristic; 2] = [&MisplacedTiles, &ManhattanDistance];
    for h in heuristics {
        for b in dist.keys() {
            let here = h.estimate(b, &goal);
            for next in b.neighbors().expect("has empty marker") {
                let there = h.estimate(&next, &goal);
                assert!(
                    here.abs_diff(there) <= 1,
                    "{} jumps by {} across one slide",
                    h.name(),
                    here.abs_diff(there)
                );
            }
        }
    }
}

#[test]
fn hardened_depth_matches_bfs() {
    let dist = reference();
    for kind in [HeuristicKindV1::MisplacedTiles, HeuristicKindV1::Manhattan] {
        for (initial, expected) in samples(&dist, 3, RADIUS) {
            let policy = SearchPolicyV1 {
                heuristic: kind,
                ..SearchPolicyV1::default()
            };
            assert_eq!(
                solve_depth(policy, initial.clone()),
                Some(expected),
                "{} depth mismatch for\n{initial}",
                kind.as_str()
            );
        }
    }
}

#[test]
fn baseline_depth_matches_bfs() {
    let dist = reference();
    for (initial, expected) in samples(&dist, 2, 8) {
        assert_eq!(
            solve_depth(SearchPolicyV1::baseline(), initial.clone()),
            Some(expected),
            "baseline depth mismatch for\n{initial}"
        );
    }
}

#[test]
fn scrambled_boards_solve_optimally() {
    let goal = solved(3);
    let dist = reference();
    for seed in 1..=24 {
        // A walk of at most RADIUS slides always lands inside the reference.
        let initial = scramble(&goal, seed, 12);
        let expected = dist[&initial];
        assert_eq!(
            solve_depth(SearchPolicyV1::default(), initial),
            Some(expected),
            "seed {seed}"
        );
    }
}

#[test]
fn classic_start_is_fourteen_moves() {
    let initial = board(3, &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
    assert_eq!(reference().get(&initial), Some(&14));
    assert_eq!(solve_depth(SearchPolicyV1::default(), initial), Some(14));
}
