#![forbid(unsafe_code)]

//! Diagnostic logging to stderr
//!
//! Table output owns stdout, so log lines always go to stderr. The filter is
//! read from `TEAMTIME_LOG` (same syntax as `RUST_LOG`) and defaults to
//! `warn`; `--verbose` forces `debug` for this crate.

use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "TEAMTIME_LOG";

/// Builds the filter for the given verbosity
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("teamtime=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Installs the global subscriber; failure to do so is not fatal
pub fn init(verbose: bool) {
    if let Err(e) = fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: logging init failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter() {
        assert!(filter(true).to_string().contains("teamtime=debug"));
    }
}
