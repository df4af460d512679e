//! Log output for the `slide` binary.
//!
//! ## Log Levels
//!
//! - **INFO**: solve start/end, run summary
//! - **DEBUG**: one event per node expansion
//! - **TRACE**: individual duplicate suppressions
//!
//! Events go to stderr; stdout carries only the transcript.

use std::sync::OnceLock;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "tileslide_search=info,tileslide_harness=info";

static INIT: OnceLock<()> = OnceLock::new();

/// Install the stderr subscriber. Only the first call has effect.
///
/// `verbosity` raises the default filter: 1 → debug, 2+ → trace.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let fallback = match verbosity {
            0 => DEFAULT_FILTER.to_string(),
            1 => DEFAULT_FILTER.replace("=info", "=debug"),
            _ => DEFAULT_FILTER.replace("=info", "=trace"),
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init();
    });
}
