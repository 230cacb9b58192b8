// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test capture and comparison utilities for shotguard.
//!
//! This crate provides file-system baseline stores (PNG and text), capturable
//! surfaces, configuration, and the scenario helpers used by screenshot
//! tests. The `test-capture` binary exposes the same comparison from the
//! command line.

pub mod baseline;
pub mod config;
pub mod env;
pub mod logging;
pub mod png;
pub mod scenario;
pub mod surface;
pub mod text;

pub use baseline::{BaselineDir, CompareMode, StoreError};
pub use config::{CaptureConfig, ConfigError};
pub use png::{PixelDiff, PngBaselineStore, Tolerance};
pub use scenario::{
    hardware_renderer_enabled, hardware_renderer_environment, Screenshots,
    USE_HARDWARE_RENDERER_NATIVE,
};
pub use surface::{
    write_png, write_text, FnSurface, HarnessError, SolidSurface, Surface, SurfaceError,
    TextSurface,
};
pub use text::TextBaselineStore;
