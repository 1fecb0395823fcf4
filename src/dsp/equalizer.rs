//! Constant-coefficient biquad that lifts vocal presence around 2 kHz.
//!
//! Direct form I:
//!
//! ```text
//! y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] − a1·y[n-1] − a2·y[n-2]
//! ```
//!
//! The feedback coefficients are subtracted exactly as written above.

use crate::dsp::sample::{from_unit, to_unit};

/// Biquad section coefficients with `a0` normalized to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Fixed presence-boost section. Empirically tuned; unity gain at DC.
pub const PRESENCE_BOOST: BiquadCoefficients = BiquadCoefficients {
    b0: 1.02,
    b1: -1.8,
    b2: 0.8,
    a1: -1.8,
    a2: 0.82,
};

/// Two samples of input and output history.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    #[inline]
    pub fn step(self, x0: f64, c: &BiquadCoefficients) -> (Self, f64) {
        let y0 = c.b0 * x0 + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;
        let next = Self {
            x1: x0,
            x2: self.x1,
            y1: y0,
            y2: self.y1,
        };
        (next, y0)
    }
}

/// Runs the buffer through a biquad section, reusing its allocation.
pub fn biquad(mut samples: Vec<i16>, coefficients: &BiquadCoefficients) -> Vec<i16> {
    let mut state = BiquadState::default();
    for sample in samples.iter_mut() {
        let (next, y) = state.step(to_unit(*sample), coefficients);
        state = next;
        *sample = from_unit(y);
    }
    samples
}

/// Applies the fixed presence boost.
pub fn peak_equalize(samples: Vec<i16>) -> Vec<i16> {
    biquad(samples, &PRESENCE_BOOST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_response_uses_subtracted_feedback() {
        // Hand-computed from the difference equation.
        let out = peak_equalize(vec![1000, 0, 0, 0, 0, 0]);
        assert_eq!(out, vec![1020, 36, 28, 22, 16, 10]);
    }

    #[test]
    fn step_response_settles_at_unity_gain() {
        let out = peak_equalize(vec![16384; 2000]);
        let last = *out.last().unwrap();
        assert!((last - 16384).abs() <= 1, "DC gain should be 1, got {last}");
    }

    #[test]
    fn step_response_overshoots_then_clamps() {
        let out = peak_equalize(vec![16384; 6]);
        assert_eq!(out, vec![16712, 17302, 17767, 18121, 18376, 18546]);

        let loud = peak_equalize(vec![i16::MAX; 50]);
        assert_eq!(loud[0], i16::MAX, "1.02 · full scale must saturate");
        assert!(loud.iter().all(|&s| s > 32000), "ringing settles back near full scale");
    }

    #[test]
    fn silence_stays_silent() {
        assert_eq!(peak_equalize(vec![0; 32]), vec![0; 32]);
    }

    #[test]
    fn identity_section_passes_signal() {
        let identity = BiquadCoefficients {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
        };
        let input = vec![-32768i16, -5, 0, 7, 32767];
        assert_eq!(biquad(input.clone(), &identity), input);
    }
}
