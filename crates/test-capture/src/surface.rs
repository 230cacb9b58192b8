// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capturable surfaces and the capture functions that write them to disk.

use crate::baseline::StoreError;
use image::{Rgba, RgbaImage};
use shotguard_capture::CaptureRequest;
use std::path::Path;
use thiserror::Error;

/// The rendering host failed to produce an image
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("surface is not attached: {0}")]
    Detached(String),

    #[error("render failed: {0}")]
    Render(String),
}

/// Anything that can go wrong while capturing and comparing, short of a visual diff
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Something that renders to a bitmap
pub trait Surface {
    fn render(&self) -> Result<RgbaImage, SurfaceError>;
}

impl<T: Surface + ?Sized> Surface for &T {
    fn render(&self) -> Result<RgbaImage, SurfaceError> {
        (**self).render()
    }
}

impl Surface for RgbaImage {
    fn render(&self) -> Result<RgbaImage, SurfaceError> {
        Ok(self.clone())
    }
}

/// Something that renders to text
pub trait TextSurface {
    fn render_text(&self) -> Result<String, SurfaceError>;
}

impl TextSurface for str {
    fn render_text(&self) -> Result<String, SurfaceError> {
        Ok(self.to_string())
    }
}

impl TextSurface for String {
    fn render_text(&self) -> Result<String, SurfaceError> {
        Ok(self.clone())
    }
}

impl<T: TextSurface + ?Sized> TextSurface for &T {
    fn render_text(&self) -> Result<String, SurfaceError> {
        (**self).render_text()
    }
}

/// Uniformly colored surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidSurface {
    pub width: u32,
    pub height: u32,
    pub color: [u8; 4],
}

impl SolidSurface {
    pub fn new(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl Surface for SolidSurface {
    fn render(&self) -> Result<RgbaImage, SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::Render(format!(
                "empty surface {}x{}",
                self.width, self.height
            )));
        }
        Ok(RgbaImage::from_pixel(self.width, self.height, Rgba(self.color)))
    }
}

/// Surface backed by a render closure
pub struct FnSurface<F>(pub F);

impl<F> Surface for FnSurface<F>
where
    F: Fn() -> Result<RgbaImage, SurfaceError>,
{
    fn render(&self) -> Result<RgbaImage, SurfaceError> {
        (self.0)()
    }
}

/// Render the request's surface and write it as a PNG to `request.output()`
pub fn write_png<S: Surface>(request: &CaptureRequest<S>) -> Result<(), HarnessError> {
    let image = request.surface().render()?;
    crate::png::save(&image, request.output())?;
    Ok(())
}

/// Render the request's surface and write it as text to `request.output()`
pub fn write_text<S: TextSurface>(request: &CaptureRequest<S>) -> Result<(), HarnessError> {
    let text = request.surface().render_text()?;
    let output = request.output();
    ensure_parent(output)?;
    std::fs::write(output, text).map_err(|e| StoreError::io(output, e))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
