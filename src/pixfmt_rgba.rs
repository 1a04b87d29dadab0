//! RGBA pixel format.
//!
//! Provides the `PixelFormat` trait and the `PixfmtRgba32` implementation
//! that writes opaque pixels into a [`PixelBuffer`].

use crate::color::Rgba8;
use crate::rendering_buffer::{PixelBuffer, BPP};

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Trait for pixel formats the pattern renderer can paint into.
///
/// This is the abstraction layer between the renderer and the raw pixel data.
/// Implementations handle the storage layout (RGBA, gray); the renderer only
/// ever overwrites, it never blends.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Copy (overwrite) a horizontal line of `len` pixels with color `c`.
    fn copy_hline(&mut self, x: u32, y: u32, len: u32, c: &Self::ColorType);

    /// Copy (overwrite) a single pixel at (x, y) with color `c`.
    fn copy_pixel(&mut self, x: u32, y: u32, c: &Self::ColorType);

    /// Get the pixel color at (x, y).
    fn pixel(&self, x: u32, y: u32) -> Self::ColorType;
}

// ============================================================================
// PixfmtRgba32: RGBA, 8 bits per channel
// ============================================================================

/// Pixel format for RGBA32 (4 bytes per pixel).
///
/// Component order: R=0, G=1, B=2, A=3.
pub struct PixfmtRgba32<'a> {
    rbuf: &'a mut PixelBuffer,
}

impl<'a> PixfmtRgba32<'a> {
    pub fn new(rbuf: &'a mut PixelBuffer) -> Self {
        Self { rbuf }
    }
}

impl<'a> PixelFormat for PixfmtRgba32<'a> {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.rbuf.width()
    }

    fn height(&self) -> u32 {
        self.rbuf.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        self.rbuf.pixel(x, y)
    }

    fn copy_pixel(&mut self, x: u32, y: u32, c: &Rgba8) {
        let row = self.rbuf.row_slice_mut(y);
        let off = x as usize * BPP;
        row[off..off + BPP].copy_from_slice(&c.to_array());
    }

    fn copy_hline(&mut self, x: u32, y: u32, len: u32, c: &Rgba8) {
        let row = self.rbuf.row_slice_mut(y);
        let start = x as usize * BPP;
        let end = start + len as usize * BPP;
        let px = c.to_array();
        for dst in row[start..end].chunks_exact_mut(BPP) {
            dst.copy_from_slice(&px);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
