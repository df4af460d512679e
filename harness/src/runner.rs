//! Harness runner: puzzle text in, rendered transcript and audit graph out.
//!
//! The runner owns all I/O-adjacent work (parsing, rendering, digests) so
//! the engine stays a pure state machine.
//!
//! # Pipeline
//!
//! ```text
//! SolveConfig::to_policy() → parse_puzzle()
//!   → SearchEngine::solve() [collect visited boards]
//!   → render_transcript() → graph.to_json_bytes() → digests → SolveReport
//! ```

use std::fmt;

use tileslide_kernel::proof::hash::{canonical_hash, ContentHash};
use tileslide_kernel::proof::hash_domain::HashDomain;
use tileslide_kernel::puzzle::board::Board;
use tileslide_search::error::SearchError;
use tileslide_search::graph::TerminationReasonV1;
use tileslide_search::policy::SearchPolicyV1;
use tileslide_search::search::{SearchEngine, SearchResult};
use tracing::{info, warn};

use crate::config::{ConfigError, SolveConfig};
use crate::parse::{infer_dimension, parse_puzzle, ParseError};
use crate::render::render_transcript;

/// Domain prefix for transcript hashing.
pub const DOMAIN_TRANSCRIPT: HashDomain = HashDomain::Transcript;

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Puzzle text could not be parsed.
    Parse(ParseError),
    /// Config could not be resolved to a policy.
    Config(ConfigError),
    /// The engine rejected the inputs before searching.
    Search(SearchError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Search(e) => write!(f, "search rejected: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Search(e) => Some(e),
        }
    }
}

impl From<ParseError> for RunError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Everything a harness run produces.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Policy the engine ran under.
    pub policy: SearchPolicyV1,
    /// Engine result (termination, goal node, path, graph).
    pub result: SearchResult,
    /// Every board the engine selected, in selection order.
    pub visited: Vec<Board>,
    /// `visited` rendered with arrow separators.
    pub transcript: String,
    /// Compact sorted-key JSON of the audit graph.
    pub graph_json: Vec<u8>,
    /// Digest of `graph_json` under the search-graph domain.
    pub graph_digest: ContentHash,
    /// Digest of `transcript` under the transcript domain.
    pub transcript_digest: ContentHash,
}

impl SolveReport {
    /// Solution length in moves, if the goal was reached.
    #[must_use]
    pub fn depth(&self) -> Option<u32> {
        self.result.depth()
    }

    /// Final status line for console output.
    #[must_use]
    pub fn summary_line(&self) -> String {
        summary_line(&self.result)
    }
}

/// Outcome of a streamed run. Boards went to the observer and are not kept.
#[derive(Debug, Clone)]
pub struct StreamReport {
    /// Policy the engine ran under.
    pub policy: SearchPolicyV1,
    /// Engine result (termination, goal node, path, graph).
    pub result: SearchResult,
    /// Number of boards handed to the observer.
    pub visited: usize,
    /// Compact sorted-key JSON of the audit graph.
    pub graph_json: Vec<u8>,
    /// Digest of `graph_json` under the search-graph domain.
    pub graph_digest: ContentHash,
}

impl StreamReport {
    /// Solution length in moves, if the goal was reached.
    #[must_use]
    pub fn depth(&self) -> Option<u32> {
        self.result.depth()
    }

    /// Final status line for console output.
    #[must_use]
    pub fn summary_line(&self) -> String {
        summary_line(&self.result)
    }
}

/// `Goal state reached in N moves`, or why the search stopped.
#[must_use]
pub fn summary_line(result: &SearchResult) -> String {
    match &result.termination {
        TerminationReasonV1::GoalReached { depth, .. } => {
            format!("Goal state reached in {depth} moves")
        }
        other => format!(
            "No solution: {other} after {} expansions",
            result.graph.metadata.total_expansions
        ),
    }
}

/// Solve `initial` → `goal`, handing each selected board to `observer`
/// together with its 0-based selection index as soon as it is selected.
///
/// # Errors
///
/// [`RunError::Config`] for an unusable config, [`RunError::Search`] for a
/// pre-flight rejection. Budget exhaustion and an empty frontier are not
/// errors; they are reported through `StreamReport::result.termination`.
pub fn stream_solve<F>(
    initial: Board,
    goal: Board,
    config: &SolveConfig,
    mut observer: F,
) -> Result<StreamReport, RunError>
where
    F: FnMut(usize, &Board),
{
    let policy = config.to_policy()?;
    let mut engine = SearchEngine::new(policy.clone());
    let mut visited = 0usize;
    let result = engine.solve(initial, goal, |board| {
        observer(visited, board);
        visited += 1;
    })?;

    let graph_json = result.graph.to_json_bytes();
    let graph_digest = result.graph.digest();

    if result.is_goal_reached() {
        info!(
            event = "run_complete",
            visited,
            depth = result.depth(),
            graph_digest = %graph_digest,
        );
    } else {
        warn!(
            event = "run_incomplete",
            termination = result.termination.as_str(),
            visited,
        );
    }

    Ok(StreamReport {
        policy,
        result,
        visited,
        graph_json,
        graph_digest,
    })
}

/// Solve `initial` → `goal` and keep every selected board.
///
/// # Errors
///
/// Same as [`stream_solve`].
pub fn run_solve(
    initial: Board,
    goal: Board,
    config: &SolveConfig,
) -> Result<SolveReport, RunError> {
    let mut visited = Vec::new();
    let stream = stream_solve(initial, goal, config, |_, board| visited.push(board.clone()))?;

    let transcript = render_transcript(&visited);
    let transcript_digest = canonical_hash(DOMAIN_TRANSCRIPT, transcript.as_bytes());

    Ok(SolveReport {
        policy: stream.policy,
        result: stream.result,
        visited,
        transcript,
        graph_json: stream.graph_json,
        graph_digest: stream.graph_digest,
        transcript_digest,
    })
}

fn parse_text(text: &str, config: &SolveConfig) -> Result<(Board, Board), RunError> {
    let dimension = match config.dimension {
        Some(d) => d,
        None => infer_dimension(text)?,
    };
    Ok(parse_puzzle(text, dimension)?)
}

/// Parse a puzzle (initial rows then goal rows) and solve it.
///
/// The dimension comes from `config.dimension`, else from the first row.
///
/// # Errors
///
/// [`RunError::Parse`] plus everything [`run_solve`] returns.
pub fn run_text(text: &str, config: &SolveConfig) -> Result<SolveReport, RunError> {
    let (initial, goal) = parse_text(text, config)?;
    run_solve(initial, goal, config)
}

/// Parse a puzzle and stream its solve through `observer`.
///
/// # Errors
///
/// [`RunError::Parse`] plus everything [`stream_solve`] returns.
pub fn stream_text<F>(text: &str, config: &SolveConfig, observer: F) -> Result<StreamReport, RunError>
where
    F: FnMut(usize, &Board),
{
    let (initial, goal) = parse_text(text, config)?;
    stream_solve(initial, goal, config, observer)
}
