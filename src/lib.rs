//! # dither-gamma
//!
//! Dithered gamma test patterns. Given a handful of brightness control points
//! (a [`Curve`]), the renderer paints horizontal bands that each put a 50%
//! checkerboard next to a solid patch. On a display whose tone response
//! matches the curve, the two halves of every band look equally bright.
//!
//! ## Architecture
//!
//! 1. **Curve**: ordered points bound to a [`Layout`]
//! 2. **Band table**: solid / light / dark luma per band, derived from the curve
//! 3. **Renderer**: walks the band row ranges and writes pixels
//! 4. **Pixel format**: RGBA32 [`PixelBuffer`] or a caller's 8-bit gray bitmap
//!
//! [`CurvePresetStore`] and [`CurveControls`] sit in front of the curve for
//! interactive use: named presets, a `custom` slot, and change listeners.
//!
//! ```
//! use dither_gamma::{render, Curve, Layout};
//!
//! let curve = Curve::new(Layout::Halving, &[171, 127, 97, 74, 56, 41, 30]).unwrap();
//! let buf = render(&curve, 134, 240);
//! assert_eq!(buf.as_bytes().len(), 134 * 240 * 4);
//! ```

// Foundation
pub mod color;
pub mod error;
pub mod gamma;

// Model
pub mod band;
pub mod curve;
pub mod layout;

// Pixel storage
pub mod pixfmt_gray;
pub mod pixfmt_rgba;
pub mod rendering_buffer;

// Rendering and interaction
pub mod controls;
pub mod pattern;
pub mod preset;

pub use band::Band;
pub use controls::{CurveControls, ListenerId};
pub use curve::Curve;
pub use error::PatternError;
pub use layout::{Layout, SolidRegion};
pub use pattern::{render, PatternRenderer};
pub use preset::{CurvePresetStore, CUSTOM};
pub use rendering_buffer::PixelBuffer;
