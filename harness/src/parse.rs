//! Board acquisition: text rows → `Board`.
//!
//! # Format
//!
//! One board row per line, cells separated by whitespace. `_` (or `0`) is
//! the empty marker; every other token is a non-negative integer label.
//! Tiles therefore start at 1. A board that writes both `0` and `_` is
//! rejected with [`ParseError::ZeroBesideBlank`] instead of reading as two
//! empty cells.
//! Blank lines and lines starting with `#` are skipped, so a puzzle file can
//! separate and annotate its boards:
//!
//! ```text
//! # initial
//! 1 2 3
//! 4 5 6
//! 7 _ 8
//!
//! # goal
//! 1 2 3
//! 4 5 6
//! 7 8 _
//! ```
//!
//! Parsing checks shape only. Whether a board carries exactly one empty
//! marker is the engine's pre-flight concern.

use std::fmt;

use tileslide_kernel::puzzle::board::{Board, BoardError};
use tileslide_kernel::puzzle::symbol::Symbol;

/// Failure to read a board from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer board rows than required.
    MissingRows { expected: usize, found: usize },
    /// More board rows than required.
    TrailingRows { expected: usize, line: usize },
    /// A row has the wrong number of cells.
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A token is neither `_` nor a non-negative integer.
    BadToken { line: usize, token: String },
    /// A board uses both `0` and `_`; `0` is an alias for `_`, not a tile.
    ZeroBesideBlank { line: usize },
    /// The text holds no rows to infer a dimension from.
    NoRows,
    /// The assembled board was rejected.
    Board(BoardError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRows { expected, found } => {
                write!(f, "expected {expected} board rows, found {found}")
            }
            Self::TrailingRows { expected, line } => {
                write!(f, "line {line}: unexpected row after {expected} board rows")
            }
            Self::RowLength {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} cells, found {found}"),
            Self::BadToken { line, token } => write!(
                f,
                "line {line}: `{token}` is not `{}` or a non-negative integer",
                Symbol::EMPTY_TOKEN
            ),
            Self::ZeroBesideBlank { line } => write!(
                f,
                "line {line}: board uses both `0` and `{}`; `0` also marks the empty cell, so number tiles from 1",
                Symbol::EMPTY_TOKEN
            ),
            Self::NoRows => write!(f, "no board rows in input"),
            Self::Board(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoardError> for ParseError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

/// Parse one cell token.
#[must_use]
pub fn parse_symbol(token: &str) -> Option<Symbol> {
    if token == Symbol::EMPTY_TOKEN {
        return Some(Symbol::EMPTY);
    }
    token.parse::<u32>().ok().map(Symbol::new)
}

/// Non-blank, non-comment lines with their 1-based line numbers.
fn board_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
}

/// Number of cells in the first board row.
///
/// # Errors
///
/// [`ParseError::NoRows`] if the text has no board rows.
pub fn infer_dimension(text: &str) -> Result<usize, ParseError> {
    board_lines(text)
        .next()
        .map(|(_, l)| l.split_whitespace().count())
        .ok_or(ParseError::NoRows)
}

fn take_board<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    dimension: usize,
) -> Result<Board, ParseError> {
    let mut rows = Vec::with_capacity(dimension);
    let (mut zero_line, mut blank_line) = (None, None);
    for found in 0..dimension {
        let Some((line, text)) = lines.next() else {
            return Err(ParseError::MissingRows {
                expected: dimension,
                found,
            });
        };
        let row = text
            .split_whitespace()
            .map(|token| {
                parse_symbol(token).ok_or_else(|| ParseError::BadToken {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<Symbol>, ParseError>>()?;
        if row.len() != dimension {
            return Err(ParseError::RowLength {
                line,
                expected: dimension,
                found: row.len(),
            });
        }
        for token in text.split_whitespace() {
            if token == Symbol::EMPTY_TOKEN {
                blank_line.get_or_insert(line);
            } else if parse_symbol(token) == Some(Symbol::EMPTY) {
                zero_line.get_or_insert(line);
            }
        }
        if let (Some(z), Some(b)) = (zero_line, blank_line) {
            return Err(ParseError::ZeroBesideBlank { line: z.max(b) });
        }
        rows.push(row);
    }
    Board::new(rows).map_err(ParseError::from)
}

fn expect_end<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    expected: usize,
) -> Result<(), ParseError> {
    match lines.next() {
        Some((line, _)) => Err(ParseError::TrailingRows { expected, line }),
        None => Ok(()),
    }
}

/// Parse exactly one `dimension`×`dimension` board.
///
/// # Errors
///
/// Any [`ParseError`] for malformed rows or tokens.
pub fn parse_board(text: &str, dimension: usize) -> Result<Board, ParseError> {
    let mut lines = board_lines(text);
    let board = take_board(&mut lines, dimension)?;
    expect_end(&mut lines, dimension)?;
    Ok(board)
}

/// Parse an initial board followed by a goal board.
///
/// # Errors
///
/// Any [`ParseError`] for malformed rows or tokens.
pub fn parse_puzzle(text: &str, dimension: usize) -> Result<(Board, Board), ParseError> {
    let mut lines = board_lines(text);
    let initial = take_board(&mut lines, dimension)?;
    let goal = take_board(&mut lines, dimension).map_err(|e| match e {
        ParseError::MissingRows { expected, found } => ParseError::MissingRows {
            expected: expected * 2,
            found: expected + found,
        },
        other => other,
    })?;
    expect_end(&mut lines, dimension * 2)?;
    Ok((initial, goal))
}
