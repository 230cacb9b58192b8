// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture request parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scale factor must lie in `(0, 1]`
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("scale must be in (0, 1], got {0}")]
pub struct ScaleError(pub f64);

/// Output scale factor applied to a capture before comparison.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    /// Full resolution
    pub const FULL: Scale = Scale(1.0);

    /// Validate a scale factor
    pub fn new(value: f64) -> Result<Self, ScaleError> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(ScaleError(value))
        }
    }

    /// Raw factor
    pub fn get(self) -> f64 {
        self.0
    }

    /// True when no resizing is needed
    pub fn is_full(self) -> bool {
        self.0 >= 1.0
    }

    /// Scaled dimensions, never smaller than one pixel per axis
    pub fn apply(self, width: u32, height: u32) -> (u32, u32) {
        let scale = |v: u32| ((f64::from(v) * self.0).round() as u32).max(1);
        (scale(width), scale(height))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for Scale {
    type Error = ScaleError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for one capture.
///
/// The surface is whatever handle the rendering host hands out; the reporter
/// only passes it through to the capture function.
#[derive(Clone, Debug)]
pub struct CaptureRequest<S> {
    surface: S,
    scale: Scale,
    output: PathBuf,
}

impl<S> CaptureRequest<S> {
    /// Capture `surface` to `output` at full scale
    pub fn new(surface: S, output: impl Into<PathBuf>) -> Self {
        Self {
            surface,
            scale: Scale::FULL,
            output: output.into(),
        }
    }

    /// Set the output scale
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Where the actual-image artifact is written
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// File name of the artifact, used to match it with its baseline
    pub fn name(&self) -> Option<&str> {
        self.output.file_name().and_then(|n| n.to_str())
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
