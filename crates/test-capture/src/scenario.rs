// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Building blocks for screenshot test scenarios.
//!
//! A scenario typically establishes an environment precondition with
//! [`hardware_renderer_environment`], renders something, and hands the
//! result to [`Screenshots::capture`].

use crate::baseline::StoreError;
use crate::config::CaptureConfig;
use crate::png::PngBaselineStore;
use crate::surface::{write_png, write_text, HarnessError, Surface, TextSurface};
use crate::text::TextBaselineStore;
use shotguard_capture::{CaptureError, CaptureLog, CaptureReporter, CaptureRequest, Scale};
use shotguard_scoped::{
    with_override_mode, ApplyMode, ScopedError, SettingsError, SettingsStore, SystemProperties,
};
use std::path::{Path, PathBuf};

/// System property that switches the renderer to its native hardware path
pub const USE_HARDWARE_RENDERER_NATIVE: &str = "shotguard.screenshot.hwrdr.native";

/// Run `block` with the native hardware renderer flag set to `"true"`.
///
/// The flag lives in [`SystemProperties::global`] and is restored when the
/// block returns, fails or panics. With [`ApplyMode::RestoreOnly`] the flag
/// is left as it is and only restored afterward.
pub fn hardware_renderer_environment<T, E, F>(
    mode: ApplyMode,
    block: F,
) -> Result<T, ScopedError<E, SettingsError>>
where
    F: FnOnce() -> Result<T, E>,
{
    with_override_mode(
        SystemProperties::global(),
        USE_HARDWARE_RENDERER_NATIVE,
        Some("true"),
        mode,
        block,
    )
}

/// Current value of the hardware renderer flag
pub fn hardware_renderer_enabled() -> bool {
    SystemProperties::global()
        .get(USE_HARDWARE_RENDERER_NATIVE)
        .is_some_and(|v| v == "true")
}

/// Screenshot capture suite driven by a [`CaptureConfig`].
///
/// Image captures are written to `<output_dir>/<name>.png`, text captures
/// to `<output_dir>/<name>.txt`, and both are compared against
/// `<baseline_dir>` with the configured mode.
pub struct Screenshots {
    images: CaptureReporter<PngBaselineStore>,
    texts: CaptureReporter<TextBaselineStore>,
    output_dir: PathBuf,
    scale: Scale,
    apply_mode: ApplyMode,
}

impl Screenshots {
    pub fn new(config: &CaptureConfig) -> Self {
        let images = PngBaselineStore::new(&config.baseline_dir, config.mode)
            .with_tolerance(config.tolerance);
        let texts = TextBaselineStore::new(&config.baseline_dir, config.mode);
        Self {
            images: CaptureReporter::new(images, config.remediation()),
            texts: CaptureReporter::new(texts, config.remediation()),
            output_dir: config.output_dir.clone(),
            scale: config.scale,
            apply_mode: if config.apply_overrides {
                ApplyMode::Apply
            } else {
                ApplyMode::RestoreOnly
            },
        }
    }

    /// Record every capture in `log`
    pub fn with_log(self, log: CaptureLog) -> Self {
        Self {
            images: self.images.with_log(log.clone()),
            texts: self.texts.with_log(log),
            ..self
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Apply mode to use for environment overrides in these scenarios
    pub fn apply_mode(&self) -> ApplyMode {
        self.apply_mode
    }

    /// Capture `surface` as `<name>.png` and compare it with its baseline
    pub fn capture<S: Surface>(
        &self,
        name: &str,
        surface: S,
    ) -> Result<(), CaptureError<HarnessError>> {
        let request = CaptureRequest::new(surface, self.output_dir.join(format!("{name}.png")))
            .with_scale(self.scale);
        self.images.capture(&request, write_png)
    }

    /// Capture `surface` as `<name>.txt` and compare it with its baseline
    pub fn capture_text<S: TextSurface>(
        &self,
        name: &str,
        surface: S,
    ) -> Result<(), CaptureError<HarnessError>> {
        let request = CaptureRequest::new(surface, self.output_dir.join(format!("{name}.txt")));
        self.texts.capture(&request, write_text)
    }

    /// Compare an existing PNG artifact with its baseline
    pub fn verify_png(&self, actual: &Path, scale: Scale) -> Result<(), CaptureError<StoreError>> {
        self.images
            .verify(&CaptureRequest::new((), actual).with_scale(scale))
    }

    /// Compare an existing text artifact with its baseline
    pub fn verify_text(&self, actual: &Path) -> Result<(), CaptureError<StoreError>> {
        self.texts.verify(&CaptureRequest::new((), actual))
    }
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
