//! Logging and tracing configuration
//!
//! Diagnostics go to stderr through tracing; the step report itself is
//! printed to stdout by the runner.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies. `verbose`
/// raises the crate default to DEBUG so every HTTP exchange is logged.
pub fn init_cli(verbose: bool) {
    let default = if verbose {
        "story_harness=debug,warn"
    } else {
        "story_harness=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
