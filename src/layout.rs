//! Pattern layouts.
//!
//! Two variants exist:
//!
//! - [`Layout::Halving`]: seven points at 1/2, 1/4, … 1/128 of full
//!   luminance. Each band dithers the previous point against black, so every
//!   step should look exactly half as bright as the one above it. Solid patch
//!   in the middle third; 134×240 canvas.
//! - [`Layout::NamedGrays`]: nine swatches at 3%, 6%, 12%, 25%, 37%, 50%,
//!   62%, 75%, 87%. Dithered on the left half, solid on the right; 200×300
//!   canvas.

use std::fmt;
use std::str::FromStr;

use crate::error::PatternError;

/// Where the solid (non-dithered) patch of each band sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SolidRegion {
    /// `x` in `[width/3, 2*width/3)`, dithered on both sides.
    MiddleThird,
    /// `x >= width/2`, dithered on the left.
    RightHalf,
}

impl SolidRegion {
    /// True when column `x` of a `width`-wide image is painted solid.
    ///
    /// Compares in integers, so the thirds are exact even when `width` is not
    /// a multiple of three.
    #[inline]
    pub fn contains(self, x: u32, width: u32) -> bool {
        let x = x as u64;
        let w = width as u64;
        match self {
            SolidRegion::MiddleThird => 3 * x >= w && 3 * x < 2 * w,
            SolidRegion::RightHalf => 2 * x >= w,
        }
    }

    /// Column range `[start, end)` of the solid patch.
    pub fn span(self, width: u32) -> (u32, u32) {
        let w = width as u64;
        let (start, end) = match self {
            SolidRegion::MiddleThird => (w.div_ceil(3), (2 * w).div_ceil(3)),
            SolidRegion::RightHalf => (w.div_ceil(2), w),
        };
        (start as u32, end as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Layout {
    #[default]
    Halving,
    NamedGrays,
}

const HALVING_LABELS: [&str; 7] = ["1/2", "1/4", "1/8", "1/16", "1/32", "1/64", "1/128"];

const HALVING_LUMINANCE: [f64; 7] = [
    1.0 / 2.0,
    1.0 / 4.0,
    1.0 / 8.0,
    1.0 / 16.0,
    1.0 / 32.0,
    1.0 / 64.0,
    1.0 / 128.0,
];

const NAMED_LABELS: [&str; 9] = [
    "gray3", "gray6", "gray12", "gray25", "gray37", "gray50", "gray62", "gray75", "gray87",
];

// The percentages are the truncated names of these exact fractions.
const NAMED_LUMINANCE: [f64; 9] = [
    1.0 / 32.0,
    1.0 / 16.0,
    1.0 / 8.0,
    1.0 / 4.0,
    3.0 / 8.0,
    1.0 / 2.0,
    5.0 / 8.0,
    3.0 / 4.0,
    7.0 / 8.0,
];

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Halving, Layout::NamedGrays];

    /// Number of curve points this layout consumes.
    pub const fn point_count(self) -> usize {
        match self {
            Layout::Halving => HALVING_LABELS.len(),
            Layout::NamedGrays => NAMED_LABELS.len(),
        }
    }

    /// Logical canvas size `(width, height)` the layout was designed for.
    pub const fn canvas_size(self) -> (u32, u32) {
        match self {
            Layout::Halving => (134, 240),
            Layout::NamedGrays => (200, 300),
        }
    }

    pub const fn solid_region(self) -> SolidRegion {
        match self {
            Layout::Halving => SolidRegion::MiddleThird,
            Layout::NamedGrays => SolidRegion::RightHalf,
        }
    }

    /// Human-readable label of each curve point, in curve order.
    pub fn point_labels(self) -> &'static [&'static str] {
        match self {
            Layout::Halving => &HALVING_LABELS,
            Layout::NamedGrays => &NAMED_LABELS,
        }
    }

    /// Relative luminance (0..1) each curve point stands for, in curve order.
    pub fn point_luminance(self) -> &'static [f64] {
        match self {
            Layout::Halving => &HALVING_LUMINANCE,
            Layout::NamedGrays => &NAMED_LUMINANCE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layout::Halving => "halving",
            Layout::NamedGrays => "named-grays",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layout {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halving" | "fractional" | "7" => Ok(Layout::Halving),
            "named-grays" | "named" | "percent" | "9" => Ok(Layout::NamedGrays),
            _ => Err(PatternError::UnknownLayout(s.to_string())),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_tables_agree() {
        for layout in Layout::ALL {
            assert_eq!(layout.point_labels().len(), layout.point_count());
            assert_eq!(layout.point_luminance().len(), layout.point_count());
        }
        assert_eq!(Layout::Halving.point_count(), 7);
        assert_eq!(Layout::NamedGrays.point_count(), 9);
    }

    #[test]
    fn test_middle_third_134() {
        let r = SolidRegion::MiddleThird;
        // 134/3 = 44.67, 268/3 = 89.33
        assert!(!r.contains(44, 134));
        assert!(r.contains(45, 134));
        assert!(r.contains(89, 134));
        assert!(!r.contains(90, 134));
        assert_eq!(r.span(134), (45, 90));
    }

    #[test]
    fn test_middle_third_exact_multiple() {
        let r = SolidRegion::MiddleThird;
        assert!(!r.contains(2, 9));
        assert!(r.contains(3, 9));
        assert!(r.contains(5, 9));
        assert!(!r.contains(6, 9));
        assert_eq!(r.span(9), (3, 6));
    }

    #[test]
    fn test_right_half() {
        let r = SolidRegion::RightHalf;
        assert!(!r.contains(99, 200));
        assert!(r.contains(100, 200));
        assert_eq!(r.span(200), (100, 200));
        // Odd width: the middle column stays dithered.
        assert!(!r.contains(2, 5));
        assert!(r.contains(3, 5));
        assert_eq!(r.span(5), (3, 5));
    }

    #[test]
    fn test_span_matches_contains() {
        for region in [SolidRegion::MiddleThird, SolidRegion::RightHalf] {
            for width in 1..40 {
                let (start, end) = region.span(width);
                for x in 0..width {
                    assert_eq!(
                        region.contains(x, width),
                        x >= start && x < end,
                        "{:?} width={} x={}",
                        region,
                        width,
                        x
                    );
                }
            }
        }
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("halving".parse::<Layout>().unwrap(), Layout::Halving);
        assert_eq!("Named-Grays".parse::<Layout>().unwrap(), Layout::NamedGrays);
        assert_eq!("9".parse::<Layout>().unwrap(), Layout::NamedGrays);
        assert_eq!(Layout::NamedGrays.to_string(), "named-grays");
        assert_eq!(
            "bogus".parse::<Layout>(),
            Err(PatternError::UnknownLayout("bogus".to_string()))
        );
    }

    #[test]
    fn test_canvas_sizes() {
        assert_eq!(Layout::Halving.canvas_size(), (134, 240));
        assert_eq!(Layout::NamedGrays.canvas_size(), (200, 300));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_names() {
        use crate::band::Band;

        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Doc {
            layout: Layout,
            region: SolidRegion,
            band: Band,
        }

        let doc = Doc {
            layout: Layout::NamedGrays,
            region: SolidRegion::RightHalf,
            band: Band::new(165, 188, 137),
        };
        let text = toml::to_string(&doc).unwrap();
        assert!(text.contains("layout = \"named-grays\""), "{}", text);
        assert!(text.contains("region = \"right-half\""), "{}", text);
        assert_eq!(toml::from_str::<Doc>(&text).unwrap(), doc);
        assert!(toml::from_str::<Doc>(&text.replace("named-grays", "NamedGrays")).is_err());
    }
}
