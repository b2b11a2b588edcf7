//! Diagnostic tracing setup
//!
//! Diagnostics go to stderr so they never interleave with the action lines
//! mirrored to stdout. `RUST_LOG` takes precedence over `--verbose`.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Install the global tracing subscriber
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "debug");
    }

    #[test]
    fn test_second_init_fails() {
        // Only one global subscriber per process
        init(false).ok();
        let err = init(true).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize logging"));
    }
}
