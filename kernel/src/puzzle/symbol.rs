//! `Symbol`: a single tile label.
//!
//! # Text form
//!
//! | Symbol          | Text  |
//! |-----------------|-------|
//! | `Symbol::EMPTY` | `_`   |
//! | `Symbol(n)`     | `n`   |
//!
//! # Canonical form
//!
//! Hashing always uses [`Symbol::to_le_bytes`]; the integer value is for
//! ranking and display.

use std::fmt;

/// A tile label on a board.
///
/// Derives `Ord` so a board's symbols can be sorted into a canonical multiset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// The reserved empty marker (the movable blank cell).
    pub const EMPTY: Self = Self(0);

    /// Text token for the empty marker.
    pub const EMPTY_TOKEN: &'static str = "_";

    /// Construct a tile symbol. `Symbol::new(0)` is the empty marker.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw label value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether this is the empty marker.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Little-endian bytes (canonical hashing form).
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Symbol(_)")
        } else {
            write!(f, "Symbol({})", self.0)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str(Self::EMPTY_TOKEN)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<u32> for Symbol {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
