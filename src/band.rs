//! Bands: the horizontal strips of a pattern and their luma triples.
//!
//! A band shows a 50% checkerboard of `dither_light` / `dither_dark` next to
//! a `solid` patch. In both layouts the light half is the solid value of the
//! band above (white for the top band) and the dark half is black, so in the
//! halving layout a matching display makes the two halves merge. The named
//! layout's 37% band is the one exception: it dithers over the gray25 point.

use std::ops::Range;

use crate::curve::Curve;
use crate::layout::Layout;

/// Luma values of one horizontal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    pub solid: u8,
    pub dither_light: u8,
    pub dither_dark: u8,
}

impl Band {
    pub const fn new(solid: u8, dither_light: u8, dither_dark: u8) -> Self {
        Self {
            solid,
            dither_light,
            dither_dark,
        }
    }

    /// Checkerboard value at `(x, y)`.
    #[inline]
    pub fn dither_at(&self, x: u32, y: u32) -> u8 {
        if dither_bit(x, y) {
            self.dither_dark
        } else {
            self.dither_light
        }
    }
}

/// Checkerboard parity: `(x XOR y) AND 1`.
#[inline]
pub fn dither_bit(x: u32, y: u32) -> bool {
    (x ^ y) & 1 == 1
}

// ============================================================================
// Band tables
// ============================================================================

// Curve indices in the named-grays layout.
const G25: usize = 3;
const G37: usize = 4;

/// Build the band table for `curve`, brightest band first.
pub fn bands_for(curve: &Curve) -> Vec<Band> {
    let points = curve.points();
    match curve.layout() {
        Layout::Halving => {
            let mut light = 255u8;
            points
                .iter()
                .map(|&solid| {
                    let band = Band::new(solid, light, 0);
                    light = solid;
                    band
                })
                .collect()
        }
        Layout::NamedGrays => {
            // Curve order is darkest first; bands run brightest first.
            let mut light = 255u8;
            points
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &solid)| {
                    // The 37% band dithers over gray25 instead of black.
                    let dark = if i == G37 { points[G25] } else { 0 };
                    let band = Band::new(solid, light, dark);
                    light = solid;
                    band
                })
                .collect()
        }
    }
}

// ============================================================================
// Row partition
// ============================================================================

/// Band index of row `y` in an image `height` rows tall split into `n` bands.
///
/// Row `y` belongs to the first band `k` with `y < height * (k + 1) / n`.
/// The comparison is done in integers, which truncates fractional boundaries.
#[inline]
pub fn band_index(y: u32, height: u32, n: usize) -> usize {
    debug_assert!(height > 0 && n > 0);
    ((y as u64 * n as u64) / height as u64) as usize
}

/// First row that is not in band `k - 1`, i.e. the smallest `y` with
/// `y >= height * k / n`.
#[inline]
fn boundary(k: usize, height: u32, n: usize) -> u32 {
    (height as u64 * k as u64).div_ceil(n as u64) as u32
}

/// Iterator over the row range of each band, top to bottom.
///
/// Ranges are contiguous and together cover `0..height`. A band can be empty
/// when `height < n`.
#[derive(Debug, Clone)]
pub struct BandRows {
    height: u32,
    n: usize,
    k: usize,
}

impl BandRows {
    pub fn new(height: u32, n: usize) -> Self {
        Self { height, n, k: 0 }
    }
}

impl Iterator for BandRows {
    type Item = Range<u32>;

    fn next(&mut self) -> Option<Range<u32>> {
        if self.k >= self.n {
            return None;
        }
        let start = boundary(self.k, self.height, self.n);
        let end = boundary(self.k + 1, self.height, self.n);
        self.k += 1;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.n - self.k;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BandRows {}

// ============================================================================
// Tests
// ============================================================================
