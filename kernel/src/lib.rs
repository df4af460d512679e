//! TileSlide Kernel: boards, slides, and canonical hashing.
//!
//! # API Surface
//!
//! - [`puzzle::board::Board`] -- an N×N board; `locate`, `swap`, `neighbors`
//! - [`puzzle::parity::is_reachable`] -- solvability of an initial/goal pair
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 fingerprints
//!
//! # Module Dependency Direction
//!
//! `puzzle` and `proof` are independent. Callers hash
//! [`puzzle::board::Board::identity_bytes`] through `proof`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
pub mod puzzle;
