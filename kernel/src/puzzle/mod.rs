//! Puzzle module: `Symbol`, `Board`, and reachability between boards.
//!
//! This is the foundational layer. No other kernel module is imported here.

pub mod board;
pub mod parity;
pub mod symbol;
