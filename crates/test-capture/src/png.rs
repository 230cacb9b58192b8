// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! PNG baseline store.
//!
//! Baselines live in one directory, named after the capture file. Captures
//! are resized by the requested scale before they are recorded or compared,
//! so baselines are stored at the reduced size.

use crate::baseline::{sibling, BaselineDir, CompareMode, StoreError};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use shotguard_capture::{ComparisonBackend, ComparisonResult, Mismatch, Scale};
use std::path::{Path, PathBuf};

/// How much two images may differ and still match
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct Tolerance {
    /// Largest per-channel difference still treated as equal
    pub channel: u8,
    /// Largest fraction of differing pixels, in `[0, 1]`
    pub max_diff_ratio: f64,
}

/// Pixel-level comparison of two same-sized images
#[derive(Clone, Debug)]
pub struct PixelDiff {
    pub differing: u64,
    pub total: u64,
    /// Differing pixels in red over a dimmed copy of the actual image
    pub image: RgbaImage,
}

impl PixelDiff {
    /// Compare `actual` with `expected`; both must have the same dimensions
    pub fn compute(actual: &RgbaImage, expected: &RgbaImage, channel_tolerance: u8) -> Self {
        let mut image = RgbaImage::new(actual.width(), actual.height());
        let mut differing = 0u64;

        for (x, y, pixel) in actual.enumerate_pixels() {
            let other = expected.get_pixel(x, y);
            let differs = pixel
                .0
                .iter()
                .zip(other.0.iter())
                .any(|(a, b)| a.abs_diff(*b) > channel_tolerance);
            let marked = if differs {
                differing += 1;
                Rgba([255, 0, 0, 255])
            } else {
                let [r, g, b, _] = pixel.0;
                Rgba([r / 3, g / 3, b / 3, 255])
            };
            image.put_pixel(x, y, marked);
        }

        Self {
            differing,
            total: u64::from(actual.width()) * u64::from(actual.height()),
            image,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.differing as f64 / self.total as f64
        }
    }

    /// True when the difference exceeds `tolerance`
    pub fn exceeds(&self, tolerance: &Tolerance) -> bool {
        self.differing > 0 && self.ratio() > tolerance.max_diff_ratio
    }
}

/// File-system baseline store for PNG captures
#[derive(Clone, Debug)]
pub struct PngBaselineStore {
    baselines: BaselineDir,
    mode: CompareMode,
    tolerance: Tolerance,
}

impl PngBaselineStore {
    pub fn new(baseline_dir: impl Into<PathBuf>, mode: CompareMode) -> Self {
        Self {
            baselines: BaselineDir::new(baseline_dir),
            mode,
            tolerance: Tolerance::default(),
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    pub fn baselines(&self) -> &BaselineDir {
        &self.baselines
    }

    fn verdict(&self, mismatch: Mismatch) -> ComparisonResult {
        if self.mode == CompareMode::Compare {
            tracing::warn!("{mismatch} (compare mode, not failing)");
            ComparisonResult::Match
        } else {
            ComparisonResult::Mismatch(mismatch)
        }
    }
}

impl ComparisonBackend for PngBaselineStore {
    type Error = StoreError;

    fn compare(&self, actual: &Path, scale: Scale) -> Result<ComparisonResult, StoreError> {
        let baseline = self.baselines.baseline_for(actual)?;
        let image = scaled(load(actual)?, scale);

        if self.mode == CompareMode::Record {
            self.baselines.ensure()?;
            save(&image, &baseline)?;
            tracing::info!(baseline = %baseline.display(), "recorded baseline");
            return Ok(ComparisonResult::Match);
        }

        if !baseline.exists() {
            return Ok(self.verdict(Mismatch {
                description: format!("no baseline recorded for {}", actual.display()),
                baseline,
                actual: actual.to_path_buf(),
                diff: None,
            }));
        }

        let expected = load(&baseline)?;
        let actual_artifact = if scale.is_full() {
            actual.to_path_buf()
        } else {
            let path = sibling(actual, "_actual", "png");
            save(&image, &path)?;
            path
        };

        if image.dimensions() != expected.dimensions() {
            return Ok(self.verdict(Mismatch {
                description: format!(
                    "size differs: actual {}x{}, baseline {}x{}",
                    image.width(),
                    image.height(),
                    expected.width(),
                    expected.height()
                ),
                baseline,
                actual: actual_artifact,
                diff: None,
            }));
        }

        let diff = PixelDiff::compute(&image, &expected, self.tolerance.channel);
        if !diff.exceeds(&self.tolerance) {
            tracing::debug!(
                baseline = %baseline.display(),
                differing = diff.differing,
                "within tolerance"
            );
            return Ok(ComparisonResult::Match);
        }

        let diff_path = sibling(actual, "_diff", "png");
        save(&diff.image, &diff_path)?;

        Ok(self.verdict(Mismatch {
            description: format!(
                "{} of {} pixels differ ({:.2}%)",
                diff.differing,
                diff.total,
                diff.ratio() * 100.0
            ),
            baseline,
            actual: actual_artifact,
            diff: Some(diff_path),
        }))
    }
}

/// Resize `image` by `scale`; full scale returns it unchanged
pub fn scaled(image: RgbaImage, scale: Scale) -> RgbaImage {
    if scale.is_full() {
        return image;
    }
    let (width, height) = scale.apply(image.width(), image.height());
    imageops::resize(&image, width, height, FilterType::Lanczos3)
}

pub(crate) fn load(path: &Path) -> Result<RgbaImage, StoreError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn save(image: &RgbaImage, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "png_tests.rs"]
mod tests;
