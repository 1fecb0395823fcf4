//! Loudness and length measurements over 16-bit sample buffers.

use crate::audio::format::AudioFormat;
use crate::defaults::FULL_SCALE;

/// Calculates the RMS level of samples in the normalized domain.
///
/// Each sample is divided by 32768 before squaring, so a full-scale square
/// wave reads just under 1.0. An empty buffer reads 0.0.
pub fn calculate_rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let normalized = f64::from(sample) / FULL_SCALE;
            normalized * normalized
        })
        .sum();

    (sum_squares / samples.len() as f64).sqrt()
}

/// Playback duration of an interleaved buffer in seconds.
pub fn duration_secs(sample_count: usize, format: &AudioFormat) -> f64 {
    let frames_per_sec = f64::from(format.sample_rate) * f64::from(format.channels);
    if frames_per_sec == 0.0 {
        return 0.0;
    }
    sample_count as f64 / frames_per_sec
}
