//! `slide`: solve a sliding-tile puzzle and print every board the search
//! selects.
//!
//! ```text
//! slide puzzle.txt --heuristic manhattan --graph-out graph.json
//! slide --dimension 3 < puzzle.txt
//! ```

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tileslide_harness::config::SolveConfig;
use tileslide_harness::console;
use tileslide_harness::render::{render_step, render_transcript};
use tileslide_harness::runner::stream_text;

#[derive(Parser, Debug)]
#[command(name = "slide", version, about = "Best-first sliding-tile puzzle solver")]
struct Args {
    /// Puzzle file: initial rows, then goal rows. Reads stdin when omitted.
    ///
    /// `_` marks the empty cell and `0` is accepted as an alias for it, so
    /// tiles are numbered from 1. A board mixing `0` and `_` is rejected.
    puzzle: Option<PathBuf>,

    /// Board side length (default: cells in the first row)
    #[arg(short, long)]
    dimension: Option<usize>,

    /// Heuristic: misplaced_tiles or manhattan
    #[arg(long)]
    heuristic: Option<String>,

    /// Stop after this many expansions
    #[arg(long, conflicts_with = "unbounded")]
    max_expansions: Option<u64>,

    /// No expansion ceiling
    #[arg(long)]
    unbounded: bool,

    /// Re-expand states that were already expanded
    #[arg(long)]
    no_dedup: bool,

    /// Skip the parity pre-check
    #[arg(long)]
    no_parity_check: bool,

    /// Start from the baseline policy (no dedup, no budget, no parity check)
    #[arg(long)]
    baseline: bool,

    /// JSON config file; flags override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the search graph JSON here
    #[arg(long)]
    graph_out: Option<PathBuf>,

    /// Print only the solution path instead of every visited board
    #[arg(long)]
    path_only: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn solve_config(&self) -> Result<SolveConfig> {
        let mut config = match &self.config {
            Some(path) => SolveConfig::load(path)?,
            None => SolveConfig::default(),
        };
        if self.dimension.is_some() {
            config.dimension = self.dimension;
        }
        if self.heuristic.is_some() {
            config.heuristic.clone_from(&self.heuristic);
        }
        if self.baseline {
            config.baseline = true;
        }
        if let Some(n) = self.max_expansions {
            config.max_expansions = Some(n);
            config.unbounded = false;
        }
        if self.unbounded {
            config.unbounded = true;
            config.max_expansions = None;
        }
        if self.no_dedup {
            config.dedup = Some(false);
        }
        if self.no_parity_check {
            config.require_solvable = Some(false);
        }
        Ok(config)
    }

    fn read_puzzle(&self) -> Result<String> {
        match &self.puzzle {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading puzzle {}", path.display())),
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading puzzle from stdin")?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    console::init(args.verbose);

    let config = args.solve_config()?;
    let text = args.read_puzzle()?;

    // Boards are written as they are selected; a long search never holds
    // its whole visit list in memory.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut write_error: Option<io::Error> = None;
    let report = stream_text(&text, &config, |index, board| {
        if args.path_only || write_error.is_some() {
            return;
        }
        let step = render_step(index, board);
        if let Err(e) = out.write_all(step.as_bytes()).and_then(|()| out.flush()) {
            write_error = Some(e);
        }
    })?;
    if let Some(e) = write_error {
        return Err(e).context("writing visited boards");
    }

    if let Some(path) = &args.graph_out {
        std::fs::write(path, &report.graph_json)
            .with_context(|| format!("writing graph to {}", path.display()))?;
    }

    if args.path_only {
        write!(out, "{}", render_transcript(&report.result.path))?;
    }
    writeln!(out, "\n{}", report.summary_line())?;
    out.flush()?;

    if !report.result.is_goal_reached() {
        bail!("search stopped: {}", report.result.termination);
    }
    Ok(())
}
