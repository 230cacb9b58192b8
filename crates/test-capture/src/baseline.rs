// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared pieces of the file-system baseline stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// What a baseline store does with a capture
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Write the capture as the new baseline
    Record,
    /// Produce diff artifacts but never fail
    Compare,
    /// Fail when the capture differs from the baseline or no baseline exists
    #[default]
    Verify,
}

impl FromStr for CompareMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "record" => Ok(CompareMode::Record),
            "compare" => Ok(CompareMode::Compare),
            "verify" => Ok(CompareMode::Verify),
            other => Err(format!(
                "unknown mode '{other}' (expected record, compare or verify)"
            )),
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompareMode::Record => "record",
            CompareMode::Compare => "compare",
            CompareMode::Verify => "verify",
        };
        f.write_str(name)
    }
}

/// Errors from the baseline stores themselves, never a visual difference
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("capture path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Directory holding committed baselines, one file per capture name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaselineDir {
    root: PathBuf,
}

impl BaselineDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Baseline matching the artifact at `actual`, by file name
    pub fn baseline_for(&self, actual: &Path) -> Result<PathBuf, StoreError> {
        let name = actual
            .file_name()
            .ok_or_else(|| StoreError::NoFileName(actual.to_path_buf()))?;
        Ok(self.root.join(name))
    }

    pub(crate) fn ensure(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root).map_err(|e| StoreError::io(&self.root, e))
    }
}

/// Sibling of `path` with `suffix` appended to the file stem
pub(crate) fn sibling(path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}.{extension}"))
}

#[cfg(test)]
#[path = "baseline_tests.rs"]
mod tests;
