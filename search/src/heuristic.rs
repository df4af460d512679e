//! Heuristic estimates of remaining slides.
//!
//! Both estimators are admissible and consistent: one slide moves one tile
//! by one cell, so neither estimate can drop by more than one per slide.

use std::collections::HashMap;

use tileslide_kernel::puzzle::board::Board;
use tileslide_kernel::puzzle::symbol::Symbol;

/// Trait for remaining-cost estimation.
///
/// Implementations must return 0 for a board equal to `goal` and must never
/// exceed the true number of slides; the engine relies on both for optimal
/// solutions. `board` and `goal` always share a dimension.
pub trait Heuristic: Send + Sync {
    /// Stable name recorded in the search graph metadata.
    fn name(&self) -> &'static str;

    /// Estimate the slides from `board` to `goal`.
    fn estimate(&self, board: &Board, goal: &Board) -> u32;
}

/// Count of cells whose symbol differs from the goal, skipping cells where
/// `board` holds the empty marker.
#[must_use]
pub fn misplaced_tiles(board: &Board, goal: &Board) -> u32 {
    let count = board
        .cells()
        .iter()
        .zip(goal.cells())
        .filter(|(cell, target)| !cell.is_empty() && cell != target)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Goal test: no misplaced tile.
#[must_use]
pub fn is_goal(board: &Board, goal: &Board) -> bool {
    misplaced_tiles(board, goal) == 0
}

/// Misplaced-tiles ("Hamming") heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MisplacedTiles;

impl Heuristic for MisplacedTiles {
    fn name(&self) -> &'static str {
        "misplaced_tiles"
    }

    fn estimate(&self, board: &Board, goal: &Board) -> u32 {
        misplaced_tiles(board, goal)
    }
}

/// Sum of row + column distances of each tile to its goal cell.
///
/// Tiles missing from the goal contribute nothing; pre-flight validation
/// rules that case out before search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanDistance;

impl Heuristic for ManhattanDistance {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn estimate(&self, board: &Board, goal: &Board) -> u32 {
        let n = goal.dimension();
        let targets: HashMap<Symbol, usize> = goal
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .map(|(i, &s)| (s, i))
            .collect();

        let distance: usize = board
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_empty())
            .filter_map(|(i, s)| targets.get(s).map(|&t| (i, t)))
            .map(|(i, t)| (i / n).abs_diff(t / n) + (i % n).abs_diff(t % n))
            .sum();
        u32::try_from(distance).unwrap_or(u32::MAX)
    }
}
