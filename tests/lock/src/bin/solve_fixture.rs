//! Binary that solves a fixed 3×3 puzzle through the harness runner
//! and prints deterministic output lines for cross-process verification.
//!
//! Usage: `solve_fixture`
//!
//! Output: key=value lines (see source for format).

use tileslide_harness::config::SolveConfig;
use tileslide_harness::runner::run_text;

/// Depth-14 puzzle: initial rows, then goal rows.
const PUZZLE: &str = "\
8 1 3
4 _ 2
7 6 5

1 2 3
4 5 6
7 8 _
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let report = run_text(PUZZLE, &SolveConfig::default())?;
    let metadata = &report.result.graph.metadata;

    println!("graph_digest={}", report.graph_digest);
    println!("transcript_digest={}", report.transcript_digest);
    println!("policy_digest={}", metadata.policy_digest);
    println!("termination_reason={}", metadata.termination_reason.as_str());
    println!("depth={}", report.depth().unwrap_or_default());
    println!("visited={}", report.visited.len());
    println!("total_expansions={}", metadata.total_expansions);
    println!(
        "total_duplicates_suppressed={}",
        metadata.total_duplicates_suppressed
    );
    println!("frontier_high_water={}", metadata.frontier_high_water);
    Ok(())
}
