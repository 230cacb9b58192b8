// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison results and the backend interface.

use crate::request::Scale;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A genuine difference between a capture and its baseline.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{description} (baseline: {}, actual: {})", .baseline.display(), .actual.display())]
pub struct Mismatch {
    /// Human-readable summary of what differs
    pub description: String,
    pub baseline: PathBuf,
    pub actual: PathBuf,
    /// Diff artifact, when the backend produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<PathBuf>,
}

/// Outcome of comparing one capture against its baseline
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComparisonResult {
    Match,
    Mismatch(Mismatch),
}

impl ComparisonResult {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonResult::Match)
    }
}

/// Baseline storage and diffing engine.
///
/// `Ok(ComparisonResult::Mismatch)` is a content difference. `Err` is reserved
/// for the backend itself failing (unreadable files, corrupt images) and is
/// never reported as a visual difference.
pub trait ComparisonBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Compare the artifact at `actual`, captured at `scale`, with its baseline
    fn compare(&self, actual: &Path, scale: Scale) -> Result<ComparisonResult, Self::Error>;
}

impl<B: ComparisonBackend + ?Sized> ComparisonBackend for &B {
    type Error = B::Error;

    fn compare(&self, actual: &Path, scale: Scale) -> Result<ComparisonResult, Self::Error> {
        (**self).compare(actual, scale)
    }
}
