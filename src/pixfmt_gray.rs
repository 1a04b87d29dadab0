//! Grayscale pixel format.
//!
//! Writes 8-bit luma (1 byte per pixel) into a caller-owned slice. This is
//! the layout of most monochrome display bitmaps, so a pattern can be painted
//! straight into a driver's framebuffer without an RGBA detour.
//!
//! There is no alpha channel in the buffer; `pixel()` always reports `a=255`.

use crate::color::Gray8;
use crate::pixfmt_rgba::PixelFormat;

/// Bytes per pixel for Gray8.
const BPP: usize = 1;

/// Pixel format for Gray8 (1 byte per pixel), rows packed with stride = width.
pub struct PixfmtGray8<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> PixfmtGray8<'a> {
    /// Attach to `buf`.
    ///
    /// # Panics
    /// If `buf` is shorter than `width * height` bytes.
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        let need = width as usize * height as usize * BPP;
        assert!(
            buf.len() >= need,
            "gray buffer too small: {} bytes for {}x{}",
            buf.len(),
            width,
            height
        );
        Self { buf, width, height }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BPP
    }
}

impl<'a> PixelFormat for PixfmtGray8<'a> {
    type ColorType = Gray8;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Gray8 {
        Gray8::luma(self.buf[self.offset(x, y)])
    }

    fn copy_pixel(&mut self, x: u32, y: u32, c: &Gray8) {
        let off = self.offset(x, y);
        self.buf[off] = c.v;
    }

    fn copy_hline(&mut self, x: u32, y: u32, len: u32, c: &Gray8) {
        let off = self.offset(x, y);
        self.buf[off..off + len as usize * BPP].fill(c.v);
    }
}

// ============================================================================
// Tests
// ============================================================================
