// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log setup for the CLI and for test binaries.

use crate::env;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `--verbose` nor `SHOTGUARD_LOG` is given
pub const DEFAULT_FILTER: &str = "warn";

/// Build the log filter: `--verbose`, then `SHOTGUARD_LOG`, then [`DEFAULT_FILTER`]
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    match env::log_filter() {
        Some(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|err| {
            eprintln!("test-capture: ignoring invalid {}: {err}", env::SHOTGUARD_LOG);
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Install a stderr subscriber.
///
/// Returns false when a global subscriber was already installed, e.g. by
/// the test binary embedding this crate.
pub fn init(verbose: bool) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
