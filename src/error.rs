//! Error type shared by curve construction, presets, and controls.

use thiserror::Error;

use crate::layout::Layout;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("{layout} layout expects {expected} curve points, got {found}")]
    CurveLength {
        layout: Layout,
        expected: usize,
        found: usize,
    },
    #[error("curve belongs to the {found} layout, expected {expected}")]
    LayoutMismatch { expected: Layout, found: Layout },
    #[error("unknown layout: {0}")]
    UnknownLayout(String),
    #[error("unknown gamma {0:?}: expected srgb, linear or a positive exponent")]
    UnknownGamma(String),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("preset name is reserved: {0}")]
    ReservedPreset(String),
    #[error("curve point {index} out of range (curve has {len} points)")]
    PointIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, PatternError>;
