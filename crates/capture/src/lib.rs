// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture-and-compare reporting for screenshot regression tests.
//!
//! A test renders something, writes the actual image with a capture
//! function, and hands it to a [`ComparisonBackend`] through a
//! [`CaptureReporter`]. Mismatches come back as a [`RegressionError`]
//! carrying remediation instructions; backend faults come back unchanged.

mod comparison;
mod log;
mod record;
mod reporter;
mod request;

pub use comparison::{ComparisonBackend, ComparisonResult, Mismatch};
pub use log::CaptureLog;
pub use record::{CaptureOutcome, CaptureRecord};
pub use reporter::{CaptureError, CaptureReporter, RegressionError, Remediation};
pub use request::{CaptureRequest, Scale, ScaleError};
