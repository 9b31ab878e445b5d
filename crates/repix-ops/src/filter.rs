//! Reconstruction filter catalog.
//!
//! Each filter is a symmetric, continuous weight function with finite
//! support, evaluated while building kernel tables. Quality grows (and with
//! it ringing and cost) from [`Filter::Box`] up to [`Filter::Lanczos4`].

use crate::{OpsError, OpsResult};
use std::f32::consts::PI;

/// Offsets closer to zero than this evaluate to exactly 1.0, sidestepping
/// the 0/0 form of the windowed-sinc expressions.
const SINC_EPSILON: f32 = 1.192_092_9e-7;

/// Reconstruction filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Box / nearest-neighbor (fastest, blocky).
    Box,
    /// Hamming-windowed sinc (support 1, very mild ringing).
    Hamming,
    /// Lanczos with a 2-lobe window.
    Lanczos2,
    /// Lanczos with a 3-lobe window (good default for downscaling).
    #[default]
    Lanczos3,
    /// Lanczos with a 4-lobe window (sharpest, most ringing).
    Lanczos4,
}

impl Filter {
    /// Maps a numeric quality level (0..=4) to its filter.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] for levels above 4.
    ///
    /// # Example
    ///
    /// ```rust
    /// use repix_ops::Filter;
    ///
    /// assert_eq!(Filter::from_quality(0).unwrap(), Filter::Box);
    /// assert_eq!(Filter::from_quality(3).unwrap(), Filter::Lanczos3);
    /// assert!(Filter::from_quality(5).is_err());
    /// ```
    pub fn from_quality(quality: u8) -> OpsResult<Self> {
        match quality {
            0 => Ok(Filter::Box),
            1 => Ok(Filter::Hamming),
            2 => Ok(Filter::Lanczos2),
            3 => Ok(Filter::Lanczos3),
            4 => Ok(Filter::Lanczos4),
            other => Err(OpsError::InvalidParameter(format!(
                "quality must be 0..=4, got {other}"
            ))),
        }
    }

    /// Returns the numeric quality level of this filter.
    #[inline]
    pub fn quality(&self) -> u8 {
        match self {
            Filter::Box => 0,
            Filter::Hamming => 1,
            Filter::Lanczos2 => 2,
            Filter::Lanczos3 => 3,
            Filter::Lanczos4 => 4,
        }
    }

    /// Returns the support radius (filter window half-width).
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Box => 0.5,
            Filter::Hamming => 1.0,
            Filter::Lanczos2 => 2.0,
            Filter::Lanczos3 => 3.0,
            Filter::Lanczos4 => 4.0,
        }
    }

    /// Evaluates the filter weight at offset `x`.
    ///
    /// Symmetric apart from the box filter's half-open window, and zero
    /// outside [`support`](Self::support).
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Box => box_weight(x),
            Filter::Hamming => hamming_weight(x),
            Filter::Lanczos2 => lanczos_weight(x, 2.0),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
            Filter::Lanczos4 => lanczos_weight(x, 4.0),
        }
    }
}

/// Box weight. The window is half-open so a sample point sitting exactly on
/// a pixel boundary contributes to exactly one output pixel.
#[inline]
fn box_weight(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

/// Hamming-windowed sinc weight.
#[inline]
fn hamming_weight(x: f32) -> f32 {
    if x <= -1.0 || x >= 1.0 {
        0.0
    } else if x.abs() < SINC_EPSILON {
        1.0
    } else {
        let xpi = x * PI;
        (xpi.sin() / xpi) * (0.54 + 0.46 * xpi.cos())
    }
}

/// Lanczos weight with an `a`-lobe window.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    if x <= -a || x >= a {
        0.0
    } else if x.abs() < SINC_EPSILON {
        1.0
    } else {
        let xpi = x * PI;
        let xa = xpi / a;
        (xpi.sin() / xpi) * (xa.sin() / xa)
    }
}
