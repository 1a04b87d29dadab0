//! The brightness curve a pattern is rendered from.

use std::fmt;

use log::warn;

use crate::error::{PatternError, Result};
use crate::gamma::{encode_u8, GammaFunction};
use crate::layout::Layout;

/// Ordered brightness control points, bound to the layout that reads them.
///
/// The point count always matches [`Layout::point_count`]; construction is
/// the only place that is checked, and deserialization goes through it too.
/// Values should darken as the represented luminance drops, but that is a
/// calibration convention and is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCurve"))]
pub struct Curve {
    layout: Layout,
    points: Vec<u8>,
}

/// Unchecked wire form of [`Curve`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCurve {
    layout: Layout,
    points: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCurve> for Curve {
    type Error = PatternError;

    fn try_from(raw: RawCurve) -> Result<Self> {
        Curve::new(raw.layout, &raw.points)
    }
}

impl Curve {
    /// Build a curve, checking the point count against `layout`.
    pub fn new(layout: Layout, points: &[u8]) -> Result<Self> {
        let expected = layout.point_count();
        if points.len() != expected {
            return Err(PatternError::CurveLength {
                layout,
                expected,
                found: points.len(),
            });
        }
        let curve = Self {
            layout,
            points: points.to_vec(),
        };
        if !curve.follows_convention() {
            warn!(
                "{} curve {:?} does not darken monotonically with luminance",
                layout, curve.points
            );
        }
        Ok(curve)
    }

    /// Reference curve for an ideal display whose encoding is `gamma`.
    pub fn from_gamma<G: GammaFunction + ?Sized>(layout: Layout, gamma: &G) -> Self {
        let points = layout
            .point_luminance()
            .iter()
            .map(|&l| encode_u8(gamma, l))
            .collect();
        Self { layout, points }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn points(&self) -> &[u8] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.points.get(index).copied()
    }

    /// Overwrite one point.
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(PatternError::PointIndex { index, len })?;
        *slot = value;
        Ok(())
    }

    /// True when brighter points never have smaller values than darker ones.
    pub fn follows_convention(&self) -> bool {
        let lum = self.layout.point_luminance();
        let mut order: Vec<usize> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| lum[b].total_cmp(&lum[a]));
        order
            .windows(2)
            .all(|w| self.points[w[0]] >= self.points[w[1]])
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.layout)?;
        for (i, v) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", v)?;
        }
        f.write_str("]")
    }
}

impl AsRef<[u8]> for Curve {
    fn as_ref(&self) -> &[u8] {
        &self.points
    }
}

// ============================================================================
// Tests
// ============================================================================
