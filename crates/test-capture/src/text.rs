// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text baseline store, for surfaces that render to a character grid.

use crate::baseline::{sibling, BaselineDir, CompareMode, StoreError};
use shotguard_capture::{ComparisonBackend, ComparisonResult, Mismatch, Scale};
use similar::TextDiff;
use std::path::{Path, PathBuf};

/// Normalize text output for comparison
///
/// - Strip trailing whitespace per line (preserve leading and interior)
/// - Strip trailing empty lines
/// - Use `\n` line endings
pub fn normalize(input: &str) -> String {
    let mut lines: Vec<&str> = input.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// File-system baseline store for text captures
#[derive(Clone, Debug)]
pub struct TextBaselineStore {
    baselines: BaselineDir,
    mode: CompareMode,
}

impl TextBaselineStore {
    pub fn new(baseline_dir: impl Into<PathBuf>, mode: CompareMode) -> Self {
        Self {
            baselines: BaselineDir::new(baseline_dir),
            mode,
        }
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    pub fn baselines(&self) -> &BaselineDir {
        &self.baselines
    }
}

impl ComparisonBackend for TextBaselineStore {
    type Error = StoreError;

    fn compare(&self, actual: &Path, scale: Scale) -> Result<ComparisonResult, StoreError> {
        if !scale.is_full() {
            tracing::debug!(%scale, "scale ignored for text captures");
        }

        let baseline = self.baselines.baseline_for(actual)?;
        let content = read(actual)?;

        if self.mode == CompareMode::Record {
            self.baselines.ensure()?;
            let mut normalized = normalize(&content);
            normalized.push('\n');
            std::fs::write(&baseline, normalized).map_err(|e| StoreError::io(&baseline, e))?;
            tracing::info!(baseline = %baseline.display(), "recorded baseline");
            return Ok(ComparisonResult::Match);
        }

        let mismatch = if baseline.exists() {
            let expected = normalize(&read(&baseline)?);
            let actual_text = normalize(&content);
            if expected == actual_text {
                return Ok(ComparisonResult::Match);
            }

            let diff = TextDiff::from_lines(&expected, &actual_text)
                .unified_diff()
                .header("baseline", "actual")
                .to_string();
            let diff_path = sibling(actual, "", "diff");
            std::fs::write(&diff_path, &diff).map_err(|e| StoreError::io(&diff_path, e))?;

            Mismatch {
                description: format!("text differs from baseline:\n{diff}"),
                baseline,
                actual: actual.to_path_buf(),
                diff: Some(diff_path),
            }
        } else {
            Mismatch {
                description: format!("no baseline recorded for {}", actual.display()),
                baseline,
                actual: actual.to_path_buf(),
                diff: None,
            }
        };

        if self.mode == CompareMode::Compare {
            tracing::warn!("{mismatch} (compare mode, not failing)");
            return Ok(ComparisonResult::Match);
        }
        Ok(ComparisonResult::Mismatch(mismatch))
    }
}

fn read(path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
