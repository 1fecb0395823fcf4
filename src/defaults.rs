//! Default configuration constants for vocalift.
//!
//! Shared between the pipeline configuration, the filter stages and the CLI
//! so every entry point agrees on the same tuning.

/// Full-scale divisor for converting 16-bit samples to the normalized domain.
pub const FULL_SCALE: f64 = 32768.0;

/// Default high-pass cutoff in Hz.
///
/// 85 Hz sits just below the fundamental of low male voices and removes
/// handling noise, desk thumps and mains rumble.
pub const HIGH_PASS_CUTOFF_HZ: f64 = 85.0;

/// Default moving-average window width (samples) for noise smoothing.
pub const SMOOTHING_WINDOW: usize = 3;

/// Default target RMS level (0.0 to 1.0) for loudness normalization.
pub const TARGET_LEVEL: f64 = 0.7;

/// RMS below which a recording is treated as silence and left untouched.
pub const SILENCE_RMS: f64 = 0.001;

/// Lower bound for the normalization gain.
pub const MIN_GAIN: f64 = 0.1;

/// Upper bound for the normalization gain.
pub const MAX_GAIN: f64 = 8.0;

/// Default program used by the external enhancer.
pub const EXTERNAL_PROGRAM: &str = "ffmpeg";

/// Default timeout for one external enhancer run, in seconds.
pub const EXTERNAL_TIMEOUT_SECS: u64 = 60;
