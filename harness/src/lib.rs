//! Tileslide Harness: puzzle I/O around the search engine.
//!
//! Parses boards from text, resolves a [`config::SolveConfig`] into a
//! search policy, runs the engine, and renders the visit transcript.
//! The engine itself never touches files or the console; everything
//! outward-facing lives here.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod console;
pub mod parse;
pub mod render;
pub mod runner;
