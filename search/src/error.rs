//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (goal reached, budget exhaustion, frontier exhaustion) are expressed via
//! [`crate::graph::TerminationReasonV1`] and always produce a
//! `SearchGraphV1` audit trail.

use std::fmt;

use tileslide_kernel::puzzle::board::BoardError;

/// Which input board a pre-flight failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardRole {
    Initial,
    Goal,
}

impl fmt::Display for BoardRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => f.write_str("initial"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before search execution begins. No `SearchGraphV1`
/// is produced because no frontier operation took place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The policy carries an option the engine cannot honor.
    InvalidPolicy { detail: String },
    /// An input board is missing its empty marker or carries it twice.
    MalformedBoard { which: BoardRole, source: BoardError },
    /// Initial and goal boards have different side lengths.
    DimensionMismatch { initial: usize, goal: usize },
    /// Initial and goal boards do not hold the same multiset of symbols.
    SymbolMismatch,
    /// The goal cannot be reached from the initial board (odd permutation).
    Unsolvable,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::MalformedBoard { which, source } => {
                write!(f, "malformed {which} board: {source}")
            }
            Self::DimensionMismatch { initial, goal } => write!(
                f,
                "initial board is {initial}x{initial} but goal board is {goal}x{goal}"
            ),
            Self::SymbolMismatch => {
                write!(f, "initial and goal boards do not hold the same symbols")
            }
            Self::Unsolvable => write!(f, "goal board is not reachable from the initial board"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedBoard { source, .. } => Some(source),
            _ => None,
        }
    }
}
