//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise `showcase=info` (or `showcase=debug`
//! with `--verbose`). Logs go to stderr so command output on stdout stays
//! machine-readable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "showcase=debug,info"
    } else {
        "showcase=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(log: &LogConfig, verbose: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let result = if log.format == "json" {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer.compact()).try_init()
    };

    if result.is_err() {
        tracing::debug!("logger already initialised");
    }
}
