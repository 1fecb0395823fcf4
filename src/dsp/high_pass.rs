//! Single-pole IIR high-pass filter.
//!
//! Removes sub-audible rumble ahead of the other stages:
//!
//! ```text
//! rc = 1 / (2π·cutoff)   dt = 1 / sample_rate   alpha = rc / (rc + dt)
//! y[n] = alpha · (y[n-1] + x[n] − x[n-1])
//! ```
//!
//! The recursion runs in the normalized domain on unclipped history; only the
//! emitted sample is rounded and saturated.

use crate::dsp::sample::{from_unit, to_unit};
use std::f64::consts::PI;

/// Filter history: previous input and previous output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HighPassState {
    x1: f64,
    y1: f64,
}

impl HighPassState {
    /// Advances the filter by one normalized sample.
    #[inline]
    pub fn step(self, x: f64, alpha: f64) -> (Self, f64) {
        let y = alpha * (self.y1 + x - self.x1);
        (Self { x1: x, y1: y }, y)
    }
}

/// Smoothing coefficient for a cutoff frequency at a sample rate.
pub fn alpha(cutoff_hz: f64, sample_rate: u32) -> f64 {
    let rc = 1.0 / (2.0 * PI * cutoff_hz);
    let dt = 1.0 / f64::from(sample_rate);
    rc / (rc + dt)
}

/// Filters the buffer, reusing its allocation.
pub fn high_pass(mut samples: Vec<i16>, sample_rate: u32, cutoff_hz: f64) -> Vec<i16> {
    let alpha = alpha(cutoff_hz, sample_rate);
    let mut state = HighPassState::default();

    for sample in samples.iter_mut() {
        let (next, y) = state.step(to_unit(*sample), alpha);
        state = next;
        *sample = from_unit(y);
    }

    samples
}
