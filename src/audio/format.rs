//! PCM stream format metadata.

use crate::error::{Result, VocaliftError};
use serde::{Deserialize, Serialize};

/// Bit depth the enhancement stages operate on.
pub const PCM16_BITS: u16 = 16;

/// Format of an interleaved PCM stream as declared by a WAV "fmt " chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bits per sample. Only 16 is accepted for processing.
    pub bits_per_sample: u16,
}

impl AudioFormat {
    /// Creates a 16-bit PCM format.
    pub fn pcm16(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            bits_per_sample: PCM16_BITS,
        }
    }

    /// Bytes per interleaved frame (one sample for every channel).
    pub fn block_align(&self) -> u16 {
        self.channels.saturating_mul(self.bits_per_sample / 8)
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(u32::from(self.block_align()))
    }

    /// Highest representable frequency in Hz.
    pub fn nyquist_hz(&self) -> f64 {
        f64::from(self.sample_rate) / 2.0
    }

    /// Checks that the stream can be fed through the filter stages.
    ///
    /// Sample rate and channel count must be positive and the depth must be
    /// 16-bit. Other depths are still reported by the decoder for metadata.
    pub fn ensure_processable(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(VocaliftError::InvalidFormat {
                message: "sample rate is zero".to_string(),
            });
        }
        if self.channels == 0 {
            return Err(VocaliftError::InvalidFormat {
                message: "channel count is zero".to_string(),
            });
        }
        if self.bits_per_sample != PCM16_BITS {
            return Err(VocaliftError::UnsupportedBitDepth {
                bits: self.bits_per_sample,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let layout = match self.channels {
            1 => "mono".to_string(),
            2 => "stereo".to_string(),
            n => format!("{n} channels"),
        };
        write!(
            f,
            "{} Hz {} {}-bit",
            self.sample_rate, layout, self.bits_per_sample
        )
    }
}
