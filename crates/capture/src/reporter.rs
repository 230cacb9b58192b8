// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture, compare, and report.
//!
//! [`CaptureReporter`] runs one capture-and-compare cycle. A genuine visual
//! difference becomes a [`RegressionError`] that tells the user how to
//! regenerate baselines and where to commit them. Anything that goes wrong
//! in the capture or comparison machinery itself is returned untouched as
//! [`CaptureError::Infrastructure`], so a broken backend is never mistaken
//! for a baseline that needs updating.

use crate::comparison::{ComparisonBackend, ComparisonResult, Mismatch};
use crate::log::CaptureLog;
use crate::record::CaptureOutcome;
use crate::request::CaptureRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// What a user must do to accept a visual change
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remediation {
    /// Command that regenerates baselines
    pub command: String,
    /// Directory where regenerated baselines are committed
    pub baseline_dir: PathBuf,
}

impl Remediation {
    pub fn new(command: impl Into<String>, baseline_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            baseline_dir: baseline_dir.into(),
        }
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Please run `{}` and commit images in {}",
            self.command,
            self.baseline_dir.display()
        )
    }
}

/// A capture differs from its baseline.
///
/// The comparison backend's [`Mismatch`] is kept as the error source.
#[derive(Debug, Error)]
#[error("Image changes are detected. {remediation}")]
pub struct RegressionError {
    pub remediation: Remediation,
    #[source]
    pub cause: Mismatch,
}

/// Failure of [`CaptureReporter::capture`]
#[derive(Debug, Error)]
pub enum CaptureError<E> {
    /// The capture differs from its baseline
    #[error(transparent)]
    Regression(RegressionError),

    /// Capturing or comparing failed; the original error, unchanged
    #[error(transparent)]
    Infrastructure(E),
}

impl<E> CaptureError<E> {
    pub fn is_regression(&self) -> bool {
        matches!(self, CaptureError::Regression(_))
    }

    pub fn regression(&self) -> Option<&RegressionError> {
        match self {
            CaptureError::Regression(r) => Some(r),
            CaptureError::Infrastructure(_) => None,
        }
    }

    pub fn into_infrastructure(self) -> Option<E> {
        match self {
            CaptureError::Infrastructure(e) => Some(e),
            CaptureError::Regression(_) => None,
        }
    }
}

/// Orchestrates capture-and-compare cycles against one backend.
pub struct CaptureReporter<B> {
    backend: B,
    remediation: Remediation,
    log: Option<CaptureLog>,
}

impl<B: ComparisonBackend> CaptureReporter<B> {
    pub fn new(backend: B, remediation: Remediation) -> Self {
        Self {
            backend,
            remediation,
            log: None,
        }
    }

    /// Record every cycle in `log`
    pub fn with_log(mut self, log: CaptureLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn remediation(&self) -> &Remediation {
        &self.remediation
    }

    /// Capture with `capture`, then compare the artifact with its baseline.
    ///
    /// `capture` must write the actual image to `request.output()`. The
    /// artifact is left in place whatever the outcome; the baseline is never
    /// touched by the reporter.
    pub fn capture<S, E, F>(
        &self,
        request: &CaptureRequest<S>,
        capture: F,
    ) -> Result<(), CaptureError<E>>
    where
        F: FnOnce(&CaptureRequest<S>) -> Result<(), E>,
        E: From<B::Error> + fmt::Display,
    {
        tracing::debug!(output = %request.output().display(), scale = %request.scale(), "capturing");

        if let Err(err) = capture(request) {
            return Err(self.infrastructure(request, err));
        }

        let result = match self.backend.compare(request.output(), request.scale()) {
            Ok(result) => result,
            Err(err) => return Err(self.infrastructure(request, E::from(err))),
        };

        match result {
            ComparisonResult::Match => {
                tracing::debug!(output = %request.output().display(), "capture matches baseline");
                self.log(request, CaptureOutcome::Match);
                Ok(())
            }
            ComparisonResult::Mismatch(mismatch) => {
                tracing::warn!(
                    output = %request.output().display(),
                    baseline = %mismatch.baseline.display(),
                    "{}",
                    mismatch.description
                );
                self.log(request, CaptureOutcome::Regression(mismatch.clone()));
                Err(CaptureError::Regression(RegressionError {
                    remediation: self.remediation.clone(),
                    cause: mismatch,
                }))
            }
        }
    }

    /// Compare an artifact that already exists at `request.output()`
    pub fn verify<S>(&self, request: &CaptureRequest<S>) -> Result<(), CaptureError<B::Error>> {
        self.capture(request, |_| Ok(()))
    }

    fn infrastructure<S, E: fmt::Display>(
        &self,
        request: &CaptureRequest<S>,
        err: E,
    ) -> CaptureError<E> {
        tracing::debug!(output = %request.output().display(), error = %err, "capture infrastructure failed");
        self.log(
            request,
            CaptureOutcome::Infrastructure {
                message: err.to_string(),
            },
        );
        CaptureError::Infrastructure(err)
    }

    fn log<S>(&self, request: &CaptureRequest<S>, outcome: CaptureOutcome) {
        if let Some(ref log) = self.log {
            log.record(request.output(), request.scale(), outcome);
        }
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
