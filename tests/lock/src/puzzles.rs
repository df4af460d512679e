//! Board fixtures and a breadth-first reference solver.
//!
//! The BFS distances are ground truth for optimality and admissibility
//! checks; they never go through the engine under test.

use std::collections::{HashMap, VecDeque};

use tileslide_kernel::puzzle::board::Board;
use tileslide_kernel::puzzle::symbol::Symbol;

/// Build a board from row-major labels (`0` is the empty marker).
///
/// # Panics
///
/// Panics if `cells` is not `dimension`² long.
#[must_use]
pub fn board(dimension: usize, cells: &[u32]) -> Board {
    Board::from_cells(dimension, cells.iter().copied().map(Symbol::new).collect())
        .expect("fixture board is square")
}

/// The standard goal: labels ascending, empty marker last.
///
/// # Panics
///
/// Panics for a zero dimension.
#[must_use]
pub fn solved(dimension: usize) -> Board {
    Board::solved(dimension).expect("dimension is positive")
}

/// Exact move distance from `goal` to every board within `max_depth` moves.
///
/// # Panics
///
/// Panics if `goal` has no empty marker.
#[must_use]
pub fn bfs_distances(goal: &Board, max_depth: u32) -> HashMap<Board, u32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(goal.clone(), 0);
    queue.push_back(goal.clone());
    while let Some(board) = queue.pop_front() {
        let d = dist[&board];
        if d == max_depth {
            continue;
        }
        for next in board.neighbors().expect("fixture has an empty marker") {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

/// Deterministic random walk of `steps` slides away from `start`.
///
/// Uses a fixed LCG so every run and platform sees the same boards. The
/// walk never immediately undoes its previous slide, but the resulting
/// distance can still be shorter than `steps`.
///
/// # Panics
///
/// Panics if `start` has no empty marker.
#[must_use]
pub fn scramble(start: &Board, seed: u64, steps: usize) -> Board {
    let mut state = seed;
    let mut previous: Option<Board> = None;
    let mut current = start.clone();
    for _ in 0..steps {
        let options: Vec<Board> = current
            .neighbors()
            .expect("fixture has an empty marker")
            .into_iter()
            .filter(|b| previous.as_ref() != Some(b))
            .collect();
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        #[allow(clippy::cast_possible_truncation)]
        let pick = (state >> 33) as usize % options.len();
        previous = Some(current);
        current = options[pick].clone();
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bfs_radius_one_has_corner_neighbors() {
        let dist = bfs_distances(&solved(3), 1);
        assert_eq!(dist.len(), 3);
        assert_eq!(dist.values().filter(|&&d| d == 1).count(), 2);
    }

    #[test]
    fn scramble_is_deterministic() {
        let goal = solved(3);
        assert_eq!(scramble(&goal, 7, 20), scramble(&goal, 7, 20));
        assert_eq!(scramble(&goal, 7, 0), goal);
    }
}
