//! Proof module: canonical hashing and domain separators.
//!
//! Depends on nothing else in the kernel; `puzzle` feeds it bytes.

pub mod hash;
pub mod hash_domain;
