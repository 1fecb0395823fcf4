//! Centered moving-average noise smoothing.
//!
//! Each output sample is the rounded mean of the inclusive window
//! `[i - h, i + h]` with `h = window / 2`. At the buffer edges the window
//! shrinks to the samples that exist; nothing wraps and nothing is
//! zero-padded.

use crate::dsp::sample::saturate;

/// Smooths the buffer with a centered moving average of `window` samples.
///
/// A window of 0 or 1 leaves the signal unchanged.
pub fn moving_average(samples: Vec<i16>, window: usize) -> Vec<i16> {
    let half = window / 2;
    let n = samples.len();
    if half == 0 || n == 0 {
        return samples;
    }

    // prefix[i] = sum of samples[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0i64);
    let mut running = 0i64;
    for &sample in &samples {
        running += i64::from(sample);
        prefix.push(running);
    }

    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half).min(n - 1);
            let sum = prefix[end + 1] - prefix[start];
            let count = (end - start + 1) as f64;
            // Mean of valid i16 values: saturate never clips here.
            saturate(sum as f64 / count)
        })
        .collect()
}
