// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by test-capture are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

use shotguard_scoped::{ProcessEnv, SettingsStore};
use std::path::PathBuf;

/// Comparison mode override (`record`, `compare`, `verify`)
pub const SHOTGUARD_MODE: &str = "SHOTGUARD_MODE";
/// Output scale override
pub const SHOTGUARD_SCALE: &str = "SHOTGUARD_SCALE";
/// Baseline directory override
pub const SHOTGUARD_BASELINE_DIR: &str = "SHOTGUARD_BASELINE_DIR";
/// Actual-image output directory override
pub const SHOTGUARD_OUTPUT_DIR: &str = "SHOTGUARD_OUTPUT_DIR";
/// `tracing` filter directive for the CLI
pub const SHOTGUARD_LOG: &str = "SHOTGUARD_LOG";

/// `SHOTGUARD_MODE`: raw comparison mode, validated by the config layer.
pub fn mode() -> Option<String> {
    non_empty(SHOTGUARD_MODE)
}

/// `SHOTGUARD_SCALE`: raw scale factor, validated by the config layer.
pub fn scale() -> Option<String> {
    non_empty(SHOTGUARD_SCALE)
}

/// `SHOTGUARD_BASELINE_DIR`: where baselines are read and recorded.
pub fn baseline_dir() -> Option<PathBuf> {
    non_empty(SHOTGUARD_BASELINE_DIR).map(PathBuf::from)
}

/// `SHOTGUARD_OUTPUT_DIR`: where actual captures and diffs are written.
pub fn output_dir() -> Option<PathBuf> {
    non_empty(SHOTGUARD_OUTPUT_DIR).map(PathBuf::from)
}

/// `SHOTGUARD_LOG`: log filter, e.g. `debug` or `test_capture=trace`.
pub fn log_filter() -> Option<String> {
    non_empty(SHOTGUARD_LOG)
}

fn non_empty(name: &str) -> Option<String> {
    ProcessEnv.get(name).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
