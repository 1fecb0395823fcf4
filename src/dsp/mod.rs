//! Filter stages of the enhancement chain.
//!
//! Every stage takes ownership of a sample buffer and returns a buffer of the
//! same length. Stateful filters keep their history in small `Copy` structs
//! created fresh for each call, so no state leaks between recordings.

pub mod equalizer;
pub mod high_pass;
pub mod normalize;
pub mod sample;
pub mod smoothing;

use crate::audio::format::AudioFormat;

/// One processing stage with its runtime parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterStage {
    /// Single-pole high-pass at `cutoff_hz`.
    HighPass { cutoff_hz: f64 },
    /// Centered moving average over `window` samples.
    NoiseSmooth { window: usize },
    /// Fixed presence boost around 2 kHz.
    PeakEqualizer,
    /// Gain toward `target_level` RMS.
    Normalize { target_level: f64 },
}

impl FilterStage {
    /// Applies the stage to an interleaved buffer.
    ///
    /// Channels are not separated: the buffer is filtered as one sequence.
    pub fn apply(&self, samples: Vec<i16>, format: &AudioFormat) -> Vec<i16> {
        match *self {
            Self::HighPass { cutoff_hz } => {
                high_pass::high_pass(samples, format.sample_rate, cutoff_hz)
            }
            Self::NoiseSmooth { window } => smoothing::moving_average(samples, window),
            Self::PeakEqualizer => equalizer::peak_equalize(samples),
            Self::Normalize { target_level } => normalize::normalize(samples, target_level),
        }
    }

    /// Name for logging/diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HighPass { .. } => "high-pass",
            Self::NoiseSmooth { .. } => "noise-smooth",
            Self::PeakEqualizer => "peak-equalizer",
            Self::Normalize { .. } => "normalize",
        }
    }
}

impl std::fmt::Display for FilterStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighPass { cutoff_hz } => write!(f, "high-pass ({cutoff_hz} Hz)"),
            Self::NoiseSmooth { window } => write!(f, "noise-smooth (window {window})"),
            Self::PeakEqualizer => write!(f, "peak-equalizer"),
            Self::Normalize { target_level } => write!(f, "normalize (target {target_level})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_stages() -> [FilterStage; 4] {
        [
            FilterStage::HighPass { cutoff_hz: 85.0 },
            FilterStage::NoiseSmooth { window: 3 },
            FilterStage::PeakEqualizer,
            FilterStage::Normalize { target_level: 0.7 },
        ]
    }

    /// Deterministic full-range noise.
    fn noise(len: usize) -> Vec<i16> {
        let mut state = 0x2545_f491u32;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as i16
            })
            .collect()
    }

    #[test]
    fn every_stage_preserves_length() {
        let format = AudioFormat::pcm16(22050, 1);
        for stage in all_stages() {
            for len in [0usize, 1, 2, 3, 1000] {
                let out = stage.apply(noise(len), &format);
                assert_eq!(out.len(), len, "{stage} changed the buffer length");
            }
        }
    }

    #[test]
    fn every_stage_survives_full_scale_input() {
        // Output is i16, so range is guaranteed by type; this checks that
        // saturating paths neither panic nor wrap sign.
        let format = AudioFormat::pcm16(8000, 2);
        let square: Vec<i16> = (0..2000)
            .map(|i| if (i / 7) % 2 == 0 { i16::MAX } else { i16::MIN })
            .collect();
        for stage in all_stages() {
            let out = stage.apply(square.clone(), &format);
            let peak = out.iter().map(|&s| i32::from(s).abs()).max().unwrap_or(0);
            assert!(peak > 20000, "{stage} lost the signal, peak = {peak}");
            assert!(out[3] > 0, "{stage} flipped the sign of a positive run");
        }
    }

    #[test]
    fn names_are_stable() {
        let names: Vec<&str> = all_stages().iter().map(FilterStage::name).collect();
        assert_eq!(
            names,
            vec!["high-pass", "noise-smooth", "peak-equalizer", "normalize"]
        );
    }

    #[test]
    fn display_includes_parameters() {
        assert_eq!(
            FilterStage::HighPass { cutoff_hz: 85.0 }.to_string(),
            "high-pass (85 Hz)"
        );
        assert_eq!(
            FilterStage::NoiseSmooth { window: 5 }.to_string(),
            "noise-smooth (window 5)"
        );
    }
}
