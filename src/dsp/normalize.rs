//! Loudness normalization toward a target RMS level.

use crate::audio::level::calculate_rms;
use crate::defaults::{MAX_GAIN, MIN_GAIN, SILENCE_RMS};
use crate::dsp::sample::saturate;

/// Gain that brings `rms` to `target_level`, or `None` for near-silence.
///
/// The gain is clamped to [0.1, 8.0].
pub fn normalization_gain(rms: f64, target_level: f64) -> Option<f64> {
    if rms < SILENCE_RMS {
        return None;
    }
    Some((target_level / rms).clamp(MIN_GAIN, MAX_GAIN))
}

/// Scales the buffer so its RMS approaches `target_level`.
///
/// Buffers below the silence threshold are returned unchanged.
pub fn normalize(mut samples: Vec<i16>, target_level: f64) -> Vec<i16> {
    let Some(gain) = normalization_gain(calculate_rms(&samples), target_level) else {
        return samples;
    };

    // sample/32768 · gain · 32768 collapses to sample · gain.
    for sample in samples.iter_mut() {
        *sample = saturate(f64::from(*sample) * gain);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(amplitude: f64, len: usize) -> Vec<i16> {
        (0..len)
            .map(|i| (amplitude * 32767.0 * (i as f64 * 0.07).sin()).round() as i16)
            .collect()
    }

    #[test]
    fn silence_is_returned_unchanged() {
        assert_eq!(normalize(vec![0; 1000], 0.7), vec![0; 1000]);
    }

    #[test]
    fn near_silence_is_returned_unchanged() {
        // RMS = 30/32768 ≈ 0.0009
        let input = vec![30i16; 100];
        assert_eq!(normalize(input.clone(), 0.7), input);
    }

    #[test]
    fn brings_quiet_signal_to_target() {
        let out = normalize(tone(0.1, 4000), 0.2);
        let rms = calculate_rms(&out);
        assert!((rms - 0.2).abs() < 0.001, "rms = {rms}");
    }

    #[test]
    fn gain_is_capped_at_eight() {
        // RMS ≈ 0.01 would need 70× to reach 0.7.
        let input = vec![328i16; 100];
        let out = normalize(input, 0.7);
        assert!(out.iter().all(|&s| s == 2624), "328 · 8 = 2624, got {}", out[0]);
    }

    #[test]
    fn gain_floor_is_one_tenth() {
        assert_eq!(normalization_gain(1.0, 0.01), Some(0.1));
        assert_eq!(normalization_gain(0.0005, 0.7), None);
        assert_eq!(normalization_gain(0.35, 0.7), Some(2.0));
    }

    #[test]
    fn loud_constant_signal_lands_on_target() {
        let out = normalize(vec![i16::MAX; 1000], 0.7);
        let rms = calculate_rms(&out);
        assert!((rms - 0.7).abs() < 1e-3, "rms = {rms}");
    }

    #[test]
    fn is_idempotent_within_one_lsb() {
        let once = normalize(tone(0.3, 5000), 0.2);
        let twice = normalize(once.clone(), 0.2);
        for (a, b) in once.iter().zip(&twice) {
            assert!((i32::from(*a) - i32::from(*b)).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn halved_samples_round_up() {
        let input = vec![-5i16, -3, 999, -1000, 2000];
        // Target at half the measured level gives a gain of exactly 0.5.
        let target = calculate_rms(&input) / 2.0;
        assert_eq!(normalization_gain(calculate_rms(&input), target), Some(0.5));

        let out = normalize(input, target);
        assert_eq!(out, vec![-2, -1, 500, -500, 1000]);
    }

    #[test]
    fn hot_signal_saturates_instead_of_wrapping() {
        let mut input = vec![1000i16; 999];
        input.push(i16::MIN);
        let out = normalize(input, 0.9);
        assert_eq!(*out.last().unwrap(), i16::MIN);
    }
}
