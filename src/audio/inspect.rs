//! Metadata and level report for a single WAV buffer.

use crate::audio::format::{AudioFormat, PCM16_BITS};
use crate::audio::level::{calculate_rms, duration_secs};
use crate::audio::wav;
use crate::error::Result;
use serde::Serialize;

/// What a WAV file contains, without modifying it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    pub format: AudioFormat,
    pub data_bytes: usize,
    pub duration_secs: f64,
    /// Level over the whole stream; only measured for decodable 16-bit files.
    pub rms: Option<f64>,
    /// Whether the enhancement stages accept this file.
    pub processable: bool,
}

/// Inspects a WAV buffer of any bit depth.
pub fn inspect(bytes: &[u8]) -> Result<Inspection> {
    let info = wav::probe(bytes)?;
    let format = info.format;

    let bytes_per_sample = usize::from(format.bits_per_sample / 8).max(1);
    let sample_count = info.data_len() / bytes_per_sample;

    // A 16-bit payload that does not decode (odd size) still gets a report.
    let samples = if format.bits_per_sample == PCM16_BITS {
        wav::decode(bytes).ok().map(|(_, samples)| samples)
    } else {
        None
    };
    let rms = samples.as_deref().map(calculate_rms);
    let processable = format.ensure_processable().is_ok() && samples.is_some();

    Ok(Inspection {
        format,
        data_bytes: info.data_len(),
        duration_secs: duration_secs(sample_count, &format),
        rms,
        processable,
    })
}
