//! Rendering buffer: owned, row-major RGBA pixel storage.
//!
//! [`PixelBuffer`] is what [`render`](crate::pattern::render) hands back to
//! the caller: `width * height * 4` bytes, top row first, RGBA order. It has
//! no identity across renders; every curve change produces a fresh one.

use crate::color::Rgba8;

/// Bytes per RGBA pixel.
pub const BPP: usize = 4;

/// An RGBA pixel buffer with dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    /// RGBA pixel data, row-major, top-to-bottom. Length = width * height * 4.
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed (transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * BPP],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BPP
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Get a safe immutable slice for row `y`.
    pub fn row_slice(&self, y: u32) -> &[u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Get a safe mutable slice for row `y`.
    pub fn row_slice_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride().max(1))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        let off = x as usize * BPP;
        let row = self.row_slice(y);
        Rgba8::from([row[off], row[off + 1], row[off + 2], row[off + 3]])
    }
}

// ============================================================================
// Tests
// ============================================================================
