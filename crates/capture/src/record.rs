// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log entries.

use crate::comparison::Mismatch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;

/// One capture-and-compare cycle as recorded in a [`CaptureLog`](crate::CaptureLog)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Sequence number
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Milliseconds since the log was created
    pub elapsed_ms: u64,

    /// Actual-image artifact
    pub output: PathBuf,

    pub scale: f64,

    pub outcome: CaptureOutcome,
}

/// How a capture ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaptureOutcome {
    Match,
    Regression(Mismatch),
    Infrastructure {
        message: String,
    },
}

impl CaptureOutcome {
    /// True for anything but a match
    pub fn is_failure(&self) -> bool {
        !matches!(self, CaptureOutcome::Match)
    }
}
