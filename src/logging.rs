//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over the CLI verbosity.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
fn default_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::default().add_directive(level.into())
}

/// Install the global subscriber.
pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))
}

