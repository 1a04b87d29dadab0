//! Reference display responses used to derive curves.
//!
//! A [`GammaFunction`] maps the relative luminance a swatch stands for
//! (0..1) to the signal level (0..1) an ideal display needs to emit it.
//! [`Curve::from_gamma`](crate::curve::Curve::from_gamma) samples one at
//! every point of a layout, which gives the curve a perfectly calibrated
//! panel would pass with.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Luminance-to-signal encoding of a reference display.
///
/// Implement this for measured responses (e.g. a lookup table from a
/// colorimeter); [`Gamma`] covers the textbook ones.
pub trait GammaFunction {
    fn encode(&self, luminance: f64) -> f64;
}

/// Textbook display responses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gamma {
    /// Signal equals luminance.
    Linear,
    /// Pure power-law panel with this exponent; the encoding is its inverse.
    Power(f64),
    /// Piecewise IEC 61966-2-1 sRGB.
    #[default]
    Srgb,
}

impl GammaFunction for Gamma {
    fn encode(&self, luminance: f64) -> f64 {
        match *self {
            Gamma::Linear => luminance,
            Gamma::Power(exponent) => luminance.powf(exponent.recip()),
            Gamma::Srgb => {
                if luminance <= 0.003_130_8 {
                    luminance * 12.92
                } else {
                    1.055 * luminance.powf(1.0 / 2.4) - 0.055
                }
            }
        }
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gamma::Linear => f.write_str("linear"),
            Gamma::Power(exponent) => write!(f, "{}", exponent),
            Gamma::Srgb => f.write_str("srgb"),
        }
    }
}

/// Accepts `srgb`, `linear`, or a positive exponent such as `2.2`.
impl FromStr for Gamma {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "srgb" => Ok(Gamma::Srgb),
            "linear" | "none" | "1" => Ok(Gamma::Linear),
            other => match other.parse::<f64>() {
                Ok(e) if e.is_finite() && e > 0.0 => Ok(Gamma::Power(e)),
                _ => Err(PatternError::UnknownGamma(s.to_string())),
            },
        }
    }
}

/// Encode `luminance` to an 8-bit signal, rounding half up. Both the input
/// and the encoded value are clamped to 0..1.
#[inline]
pub fn encode_u8<G: GammaFunction + ?Sized>(gamma: &G, luminance: f64) -> u8 {
    let v = gamma.encode(luminance.clamp(0.0, 1.0)).clamp(0.0, 1.0);
    (v * 255.0 + 0.5) as u8
}
