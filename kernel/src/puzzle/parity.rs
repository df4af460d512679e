//! Reachability between two boards via permutation parity.
//!
//! A slide of the empty marker is a transposition. Horizontal slides keep
//! the reading order of the non-empty tiles; vertical slides move one tile
//! past `N - 1` others. Hence, with tiles ranked by their goal position:
//!
//! - odd N: `inversions` is invariant mod 2;
//! - even N: `inversions + empty_row` is invariant mod 2.
//!
//! The goal has zero inversions against itself, so `initial` can reach
//! `goal` iff the invariant of `initial` (relative to the goal) is even.

use std::collections::BTreeMap;

use crate::puzzle::board::{Board, BoardError};
use crate::puzzle::symbol::Symbol;

/// Whether `goal` is reachable from `initial` by legal slides.
///
/// Both boards must be well-formed and share a symbol multiset; a tile of
/// `initial` that is missing from `goal` is reported as an error rather than
/// `false`.
///
/// # Errors
///
/// [`BoardError::DimensionMismatch`] for boards of different size, and any
/// [`Board::locate`] failure on either board.
pub fn is_reachable(initial: &Board, goal: &Board) -> Result<bool, BoardError> {
    if initial.dimension() != goal.dimension() {
        return Err(BoardError::DimensionMismatch {
            left: initial.dimension(),
            right: goal.dimension(),
        });
    }
    let (initial_empty_row, _) = initial.locate_empty()?;
    let (goal_empty_row, _) = goal.locate_empty()?;

    let ranks: BTreeMap<Symbol, usize> = goal
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, &s)| (s, i))
        .collect();

    let sequence = initial
        .cells()
        .iter()
        .filter(|s| !s.is_empty())
        .map(|&symbol| {
            ranks
                .get(&symbol)
                .copied()
                .ok_or(BoardError::SymbolNotFound { symbol })
        })
        .collect::<Result<Vec<usize>, BoardError>>()?;

    let inversions = count_inversions(&sequence);
    let invariant = if initial.dimension() % 2 == 1 {
        inversions
    } else {
        inversions + initial_empty_row.abs_diff(goal_empty_row)
    };
    Ok(invariant % 2 == 0)
}

/// Number of pairs `i < j` with `sequence[i] > sequence[j]`.
#[must_use]
pub fn count_inversions(sequence: &[usize]) -> usize {
    sequence
        .iter()
        .enumerate()
        .map(|(i, &v)| sequence[i + 1..].iter().filter(|&&w| w < v).count())
        .sum()
}
