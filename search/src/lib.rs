//! TileSlide Search: deterministic best-first search over sliding-tile boards.
//!
//! This crate provides the search layer. It depends only on
//! `tileslide_kernel`; it does NOT depend on `tileslide_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! tileslide_kernel  ←  tileslide_search  ←  tileslide_harness
//! (boards, hashing)    (frontier, nodes)     (parse, render, runner)
//! ```
//!
//! # Key types
//!
//! - [`search::SearchEngine`] — owns one frontier and expanded set; runs one search at a time
//! - [`search::Visits`] — lazy iterator over the boards selected from the frontier
//! - [`node::SearchNodeV1`] — immutable node with `(score, creation_order)` ordering
//! - [`graph::SearchGraphV1`] — expansion-event audit log
//! - [`policy::SearchPolicyV1`] — budget, duplicate handling, heuristic selection
//! - [`heuristic::Heuristic`] — trait for remaining-cost estimates
//!
//! # Example
//!
//! ```
//! use tileslide_kernel::puzzle::board::Board;
//! use tileslide_kernel::puzzle::symbol::Symbol;
//! use tileslide_search::policy::SearchPolicyV1;
//! use tileslide_search::search::SearchEngine;
//!
//! let cells = [1, 2, 3, 4, 5, 6, 7, 0, 8].map(Symbol::new).to_vec();
//! let initial = Board::from_cells(3, cells).unwrap();
//! let goal = Board::solved(3).unwrap();
//!
//! let mut engine = SearchEngine::new(SearchPolicyV1::default());
//! let mut seen = 0;
//! let result = engine.solve(initial, goal, |_| seen += 1).unwrap();
//! assert_eq!(result.depth(), Some(1));
//! assert_eq!(seen, 2);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod search;
