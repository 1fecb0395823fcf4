//! Conversions between 16-bit samples and the normalized float domain.

use crate::defaults::FULL_SCALE;

/// Maps a 16-bit sample into [-1.0, 1.0).
#[inline]
pub fn to_unit(sample: i16) -> f64 {
    f64::from(sample) / FULL_SCALE
}

/// Maps a normalized value back to 16 bits.
///
/// Rounds to nearest (halves toward positive infinity) and saturates to the
/// i16 range. Clipping is signal limiting, never an error.
#[inline]
pub fn from_unit(value: f64) -> i16 {
    saturate(value * FULL_SCALE)
}

/// Rounds and clamps a value already in sample units.
///
/// Halves round up: 2.5 → 3, -2.5 → -2.
#[inline]
pub fn saturate(value: f64) -> i16 {
    (value + 0.5)
        .floor()
        .clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}
