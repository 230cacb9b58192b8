// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture configuration loaded from `shotguard.toml` and the environment.

use crate::baseline::CompareMode;
use crate::env;
use crate::png::Tolerance;
use serde::{Deserialize, Serialize};
use shotguard_capture::{Remediation, Scale, ScaleError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "shotguard.toml";
/// Where actual captures are written
pub const DEFAULT_OUTPUT_DIR: &str = "build/screenshots";
/// Where baselines are committed
pub const DEFAULT_BASELINE_DIR: &str = "tests/screenshots";
/// Command shown to users when a capture differs from its baseline
pub const DEFAULT_REMEDIATION_COMMAND: &str = "SHOTGUARD_MODE=record cargo test";

fn default_apply_overrides() -> bool {
    true
}

/// Errors loading or resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid scale '{value}': {source}")]
    InvalidScale {
        value: String,
        #[source]
        source: ScaleError,
    },

    #[error("invalid tolerance: max_diff_ratio must be in [0, 1], got {0}")]
    InvalidTolerance(f64),

    #[error("{0}")]
    InvalidMode(String),
}

/// Resolved capture configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaptureConfig {
    /// Directory for actual captures and diff artifacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory holding committed baselines
    #[serde(default = "default_baseline_dir")]
    pub baseline_dir: PathBuf,

    /// Output scale in (0, 1] (default: 1.0)
    #[serde(default)]
    pub scale: Scale,

    /// record, compare or verify (default: verify)
    #[serde(default)]
    pub mode: CompareMode,

    /// Command printed when a regression is detected
    #[serde(default = "default_remediation_command")]
    pub remediation_command: String,

    /// Whether scoped environment overrides actually write their value.
    /// When false they only restore (default: true)
    #[serde(default = "default_apply_overrides")]
    pub apply_overrides: bool,

    /// Pixel tolerance for PNG comparisons
    #[serde(default)]
    pub tolerance: Tolerance,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_baseline_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASELINE_DIR)
}

fn default_remediation_command() -> String {
    DEFAULT_REMEDIATION_COMMAND.to_string()
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            baseline_dir: default_baseline_dir(),
            scale: Scale::default(),
            mode: CompareMode::default(),
            remediation_command: default_remediation_command(),
            apply_overrides: default_apply_overrides(),
            tolerance: Tolerance::default(),
        }
    }
}

impl CaptureConfig {
    /// Parse TOML content; `origin` is only used in error messages
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve configuration: defaults, then the config file, then the environment.
    ///
    /// An explicit path must exist; otherwise `shotguard.toml` in `dir` is
    /// used when present.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(&candidate)?
                } else {
                    tracing::debug!("no config file found, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply `SHOTGUARD_*` environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(mode) = env::mode() {
            self.mode = mode.parse().map_err(ConfigError::InvalidMode)?;
        }
        if let Some(value) = env::scale() {
            self.scale = parse_scale(&value)?;
        }
        if let Some(dir) = env::baseline_dir() {
            self.baseline_dir = dir;
        }
        if let Some(dir) = env::output_dir() {
            self.output_dir = dir;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.tolerance.max_diff_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigError::InvalidTolerance(ratio));
        }
        Ok(())
    }

    /// Remediation hint for regressions under this config
    pub fn remediation(&self) -> Remediation {
        Remediation::new(&self.remediation_command, &self.baseline_dir)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Parse a scale factor from text
pub fn parse_scale(value: &str) -> Result<Scale, ConfigError> {
    let invalid = |source| ConfigError::InvalidScale {
        value: value.to_string(),
        source,
    };
    let raw: f64 = value
        .trim()
        .parse()
        .map_err(|_| invalid(ScaleError(f64::NAN)))?;
    Scale::new(raw).map_err(invalid)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
