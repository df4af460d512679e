//! `Board`: an N×N sliding-tile configuration.
//!
//! # Layout
//!
//! Cells are stored row-major in a flat `Vec<Symbol>` of length `N * N`.
//! Exactly one cell of a well-formed board holds [`Symbol::EMPTY`]; all
//! other symbols are distinct. Construction does not enforce the empty
//! marker invariant: a malformed board is reported by [`Board::locate`]
//! the first time the empty marker is looked up.
//!
//! # Value semantics
//!
//! A `Board` is never mutated through the public API. [`Board::swap`]
//! returns a fresh board and leaves the receiver untouched, so boards can be
//! handed to search nodes without aliasing.

use std::fmt;

use crate::puzzle::symbol::Symbol;

/// Offsets tried around the empty marker, in generation order:
/// left, right, up, down.
pub const SLIDE_OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Structural failure on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A board must have at least one row.
    ZeroDimension,
    /// A row (or the flat cell list) does not match the board dimension.
    NotSquare {
        dimension: usize,
        row: usize,
        len: usize,
    },
    /// Two boards that must share a dimension do not.
    DimensionMismatch { left: usize, right: usize },
    /// The symbol does not occur on the board.
    SymbolNotFound { symbol: Symbol },
    /// The symbol occurs more than once on the board.
    DuplicateSymbol { symbol: Symbol, count: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "board has no rows"),
            Self::NotSquare {
                dimension,
                row,
                len,
            } => write!(
                f,
                "row {row} has {len} cells, expected {dimension} for a {dimension}x{dimension} board"
            ),
            Self::DimensionMismatch { left, right } => {
                write!(f, "board dimensions differ: {left}x{left} vs {right}x{right}")
            }
            Self::SymbolNotFound { symbol } => write!(f, "symbol {symbol} not found on board"),
            Self::DuplicateSymbol { symbol, count } => {
                write!(f, "symbol {symbol} occurs {count} times on board")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// An N×N board of symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dimension: usize,
    cells: Vec<Symbol>,
}

impl Board {
    /// Build a board from rows.
    ///
    /// # Errors
    ///
    /// [`BoardError::ZeroDimension`] for no rows, [`BoardError::NotSquare`]
    /// if any row length differs from the row count.
    pub fn new(rows: Vec<Vec<Symbol>>) -> Result<Self, BoardError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(BoardError::ZeroDimension);
        }
        let mut cells = Vec::with_capacity(dimension * dimension);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != dimension {
                return Err(BoardError::NotSquare {
                    dimension,
                    row,
                    len: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Ok(Self { dimension, cells })
    }

    /// Build a board from a flat row-major cell list.
    ///
    /// # Errors
    ///
    /// [`BoardError::ZeroDimension`] if `dimension` is 0,
    /// [`BoardError::NotSquare`] if `cells.len() != dimension²`.
    pub fn from_cells(dimension: usize, cells: Vec<Symbol>) -> Result<Self, BoardError> {
        if dimension == 0 {
            return Err(BoardError::ZeroDimension);
        }
        if cells.len() != dimension * dimension {
            return Err(BoardError::NotSquare {
                dimension,
                row: cells.len() / dimension,
                len: cells.len(),
            });
        }
        Ok(Self { dimension, cells })
    }

    /// The canonical solved board: tiles `1..N²` in reading order, empty
    /// marker in the bottom-right corner.
    ///
    /// # Errors
    ///
    /// [`BoardError::ZeroDimension`] if `dimension` is 0.
    pub fn solved(dimension: usize) -> Result<Self, BoardError> {
        let total = dimension * dimension;
        let cells = (1..total)
            .map(|v| Symbol::new(u32::try_from(v).unwrap_or(u32::MAX)))
            .chain(std::iter::once(Symbol::EMPTY))
            .collect();
        Self::from_cells(dimension, cells)
    }

    /// Board side length N.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Row-major cells.
    #[must_use]
    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Symbol]> {
        self.cells.chunks(self.dimension)
    }

    /// Symbol at `(row, col)`, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Symbol> {
        if row < self.dimension && col < self.dimension {
            Some(self.cells[row * self.dimension + col])
        } else {
            None
        }
    }

    /// Find the unique position of `symbol`.
    ///
    /// # Errors
    ///
    /// [`BoardError::SymbolNotFound`] if absent, [`BoardError::DuplicateSymbol`]
    /// if it occurs more than once.
    pub fn locate(&self, symbol: Symbol) -> Result<(usize, usize), BoardError> {
        let mut found = None;
        let mut count = 0usize;
        for (i, &cell) in self.cells.iter().enumerate() {
            if cell == symbol {
                count += 1;
                found.get_or_insert(i);
            }
        }
        match (found, count) {
            (None, _) => Err(BoardError::SymbolNotFound { symbol }),
            (Some(i), 1) => Ok((i / self.dimension, i % self.dimension)),
            (Some(_), count) => Err(BoardError::DuplicateSymbol { symbol, count }),
        }
    }

    /// Position of the empty marker.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::locate`] failures (missing or repeated marker).
    pub fn locate_empty(&self) -> Result<(usize, usize), BoardError> {
        self.locate(Symbol::EMPTY)
    }

    /// Exchange two cells, returning a new board.
    ///
    /// Returns `None` if either position lies outside `[0, N)` in either
    /// dimension. Illegal slides are an expected result of boundary probing,
    /// so this is not an error.
    #[must_use]
    pub fn swap(&self, r1: isize, c1: isize, r2: isize, c2: isize) -> Option<Self> {
        let a = self.index_of(r1, c1)?;
        let b = self.index_of(r2, c2)?;
        let mut cells = self.cells.clone();
        cells.swap(a, b);
        Some(Self {
            dimension: self.dimension,
            cells,
        })
    }

    /// All boards reachable by one slide of the empty marker.
    ///
    /// Tries left, right, up, down (see [`SLIDE_OFFSETS`]) and keeps the
    /// legal results. The order is fixed: frontier tie-breaking depends on it.
    ///
    /// # Errors
    ///
    /// Propagates [`Board::locate_empty`] failures.
    pub fn neighbors(&self) -> Result<Vec<Self>, BoardError> {
        let (row, col) = self.locate_empty()?;
        #[allow(clippy::cast_possible_wrap)]
        let (r, c) = (row as isize, col as isize);
        Ok(SLIDE_OFFSETS
            .iter()
            .filter_map(|&(dr, dc)| self.swap(r, c, r + dr, c + dc))
            .collect())
    }

    /// The board's symbols sorted ascending (its multiset).
    #[must_use]
    pub fn symbols_sorted(&self) -> Vec<Symbol> {
        let mut symbols = self.cells.clone();
        symbols.sort_unstable();
        symbols
    }

    /// Canonical identity bytes: dimension as `u32` LE, then every cell LE.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.cells.len() * 4);
        out.extend_from_slice(&u32::try_from(self.dimension).unwrap_or(u32::MAX).to_le_bytes());
        for cell in &self.cells {
            out.extend_from_slice(&cell.to_le_bytes());
        }
        out
    }

    fn index_of(&self, row: isize, col: isize) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.dimension && col < self.dimension).then_some(row * self.dimension + col)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, symbol) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
