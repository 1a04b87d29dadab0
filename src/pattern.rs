//! Pattern renderer: paints the banded dither-vs-solid test image.
//!
//! The image is split into one horizontal band per row of the band table.
//! Within a band every column outside the layout's solid region carries a
//! 50% checkerboard of the band's light/dark pair, and every column inside it
//! carries the band's solid luma. All pixels are opaque neutral grays.
//!
//! Rendering is pure: the same curve and dimensions always give the same
//! bytes, and nothing is cached between calls.

use std::ops::Range;

use log::debug;

use crate::band::{band_index, bands_for, dither_bit, Band, BandRows};
use crate::color::Gray8;
use crate::curve::Curve;
use crate::layout::{Layout, SolidRegion};
use crate::pixfmt_rgba::{PixelFormat, PixfmtRgba32};
use crate::rendering_buffer::PixelBuffer;

/// Renders one curve. Holds the precomputed band table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRenderer {
    layout: Layout,
    bands: Vec<Band>,
}

impl PatternRenderer {
    pub fn new(curve: &Curve) -> Self {
        Self {
            layout: curve.layout(),
            bands: bands_for(curve),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Band table, top band first.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn solid_region(&self) -> SolidRegion {
        self.layout.solid_region()
    }

    /// Row range of each band for an image `height` rows tall.
    pub fn band_rows(&self, height: u32) -> BandRows {
        BandRows::new(height, self.bands.len())
    }

    /// Band and row range pairs, top to bottom.
    pub fn band_spans(&self, height: u32) -> impl Iterator<Item = (&Band, Range<u32>)> + '_ {
        self.bands.iter().zip(self.band_rows(height))
    }

    /// Luma of pixel `(x, y)` in a `width` × `height` image.
    pub fn luma_at(&self, x: u32, y: u32, width: u32, height: u32) -> u8 {
        let band = &self.bands[band_index(y, height, self.bands.len())];
        if self.solid_region().contains(x, width) {
            band.solid
        } else {
            band.dither_at(x, y)
        }
    }

    /// Paint the pattern over the whole of `pf`.
    ///
    /// # Panics
    /// If the target has zero width or height.
    pub fn render_into<PF>(&self, pf: &mut PF)
    where
        PF: PixelFormat,
        PF::ColorType: From<Gray8>,
    {
        let width = pf.width();
        let height = pf.height();
        assert!(
            width > 0 && height > 0,
            "pattern target must be non-empty, got {}x{}",
            width,
            height
        );
        debug!(
            "rendering {} pattern at {}x{} ({} bands)",
            self.layout,
            width,
            height,
            self.bands.len()
        );

        let (solid_x1, solid_x2) = self.solid_region().span(width);
        for (band, rows) in self.band_spans(height) {
            let solid: PF::ColorType = Gray8::luma(band.solid).into();
            let light: PF::ColorType = Gray8::luma(band.dither_light).into();
            let dark: PF::ColorType = Gray8::luma(band.dither_dark).into();
            for y in rows {
                for x in (0..solid_x1).chain(solid_x2..width) {
                    let c = if dither_bit(x, y) {
                        &dark
                    } else {
                        &light
                    };
                    pf.copy_pixel(x, y, c);
                }
                if solid_x2 > solid_x1 {
                    pf.copy_hline(solid_x1, y, solid_x2 - solid_x1, &solid);
                }
            }
        }
    }

    /// Render into a fresh RGBA buffer.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn render(&self, width: u32, height: u32) -> PixelBuffer {
        assert!(
            width > 0 && height > 0,
            "pattern dimensions must be positive, got {}x{}",
            width,
            height
        );
        let mut buf = PixelBuffer::new(width, height);
        let mut pf = PixfmtRgba32::new(&mut buf);
        self.render_into(&mut pf);
        buf
    }
}

/// Render `curve` into a `width` × `height` RGBA buffer.
///
/// # Panics
/// If `width` or `height` is zero.
pub fn render(curve: &Curve, width: u32, height: u32) -> PixelBuffer {
    PatternRenderer::new(curve).render(width, height)
}

/// Render `curve` at its layout's designed canvas size.
pub fn render_default(curve: &Curve) -> PixelBuffer {
    let (w, h) = curve.layout().canvas_size();
    render(curve, w, h)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;
    use crate::gamma::Gamma;
    use crate::pixfmt_gray::PixfmtGray8;

    fn is_opaque_gray(buf: &PixelBuffer) -> bool {
        buf.as_bytes().chunks_exact(4).all(|p| {
            let c = Rgba8::from([p[0], p[1], p[2], p[3]]);
            c.a == 255 && c.is_neutral()
        })
    }

    fn srgb_ish() -> Curve {
        Curve::new(Layout::Halving, &[171, 127, 97, 74, 56, 41, 30]).unwrap()
    }

    #[test]
    fn test_buffer_size_and_format() {
        let buf = render(&srgb_ish(), 134, 240);
        assert_eq!(buf.as_bytes().len(), 134 * 240 * 4);
        assert!(is_opaque_gray(&buf));
    }

    #[test]
    fn test_first_and_last_rows() {
        let buf = render(&srgb_ish(), 134, 240);
        for x in 0..134 {
            let top = buf.pixel(x, 0).r;
            let bottom = buf.pixel(x, 239).r;
            if (45..90).contains(&x) {
                assert_eq!(top, 171, "x={}", x);
                assert_eq!(bottom, 30, "x={}", x);
            } else if x % 2 == 0 {
                assert_eq!(top, 255, "x={}", x);
                // Row 239 is odd, so even columns land on the dark phase.
                assert_eq!(bottom, 0, "x={}", x);
            } else {
                assert_eq!(top, 0, "x={}", x);
                assert_eq!(bottom, 41, "x={}", x);
            }
        }
    }

    #[test]
    fn test_pixels_match_luma_at() {
        let r = PatternRenderer::new(&srgb_ish());
        let buf = r.render(31, 17);
        for y in 0..17 {
            for x in 0..31 {
                assert_eq!(buf.pixel(x, y).r, r.luma_at(x, y, 31, 17));
            }
        }
    }

    #[test]
    fn test_luma_in_band_triple() {
        let curve = Curve::from_gamma(Layout::NamedGrays, &Gamma::Srgb);
        let r = PatternRenderer::new(&curve);
        let (w, h) = Layout::NamedGrays.canvas_size();
        let buf = r.render(w, h);
        for (band, rows) in r.band_spans(h) {
            for y in rows {
                for x in 0..w {
                    let v = buf.pixel(x, y).r;
                    if r.solid_region().contains(x, w) {
                        assert_eq!(v, band.solid);
                    } else {
                        assert_eq!(v, band.dither_at(x, y));
                    }
                }
            }
        }
    }

    #[test]
    fn test_named_split_at_midpoint() {
        let curve = Curve::from_gamma(Layout::NamedGrays, &Gamma::Srgb);
        let buf = render(&curve, 200, 300);
        // Top band: 87% solid on the right, white over black on the left.
        assert_eq!(buf.pixel(100, 0).r, 240);
        assert_eq!(buf.pixel(199, 0).r, 240);
        assert_eq!(buf.pixel(0, 0).r, 255);
        assert_eq!(buf.pixel(1, 0).r, 0);
        assert_eq!(buf.pixel(99, 0).r, 0);
        // Second band dithers the 87% value over black.
        assert_eq!(buf.pixel(0, 34).r, 240);
    }

    #[test]
    fn test_deterministic() {
        let a = render(&srgb_ish(), 134, 240);
        let b = render(&srgb_ish(), 134, 240);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_gray_target_matches_rgba() {
        let r = PatternRenderer::new(&srgb_ish());
        let rgba = r.render(40, 30);
        let mut gray = vec![0u8; 40 * 30];
        r.render_into(&mut PixfmtGray8::new(&mut gray, 40, 30));
        for y in 0..30u32 {
            for x in 0..40u32 {
                assert_eq!(gray[(y * 40 + x) as usize], rgba.pixel(x, y).r);
            }
        }
    }

    #[test]
    fn test_tiny_images() {
        let buf = render(&srgb_ish(), 1, 1);
        assert_eq!(buf.as_bytes(), &[255, 255, 255, 255]);
        let buf = render(&srgb_ish(), 3, 2);
        // Column 1 is the middle third; row 1 lands in band 1*7/2 = 3.
        assert_eq!(buf.pixel(1, 0).r, 171);
        assert_eq!(buf.pixel(1, 1).r, 74);
    }

    #[test]
    fn test_render_default_size() {
        let buf = render_default(&srgb_ish());
        assert_eq!((buf.width(), buf.height()), (134, 240));
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_width_panics() {
        let _ = render(&srgb_ish(), 0, 10);
    }
}
