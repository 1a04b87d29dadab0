//! Color types written by the pattern renderer.
//!
//! The pattern only ever produces neutral grays, so the renderer works in
//! [`Gray8`] luma and each pixel format converts to its own storage type.

// ============================================================================
// Gray8 (8-bit luma)
// ============================================================================

/// Grayscale color with u8 components (value + alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gray8 {
    pub v: u8,
    pub a: u8,
}

impl Gray8 {
    pub const BLACK: Gray8 = Gray8 { v: 0, a: 255 };
    pub const WHITE: Gray8 = Gray8 { v: 255, a: 255 };

    /// Opaque gray from a luma byte.
    #[inline]
    pub const fn luma(v: u8) -> Self {
        Self { v, a: 255 }
    }
}

impl Default for Gray8 {
    fn default() -> Self {
        Self::BLACK
    }
}

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when R, G and B are equal.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        self.r == self.g && self.g == self.b
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Gray8> for Rgba8 {
    #[inline]
    fn from(c: Gray8) -> Self {
        Self {
            r: c.v,
            g: c.v,
            b: c.v,
            a: c.a,
        }
    }
}

impl From<[u8; 4]> for Rgba8 {
    #[inline]
    fn from(p: [u8; 4]) -> Self {
        Self {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
