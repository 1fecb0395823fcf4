//! RIFF/WAVE container codec for 16-bit PCM.
//!
//! Decoding walks the chunk list after the 12-byte RIFF header, picks up the
//! stream format from "fmt " and stops at the first "data" chunk. Unknown
//! chunks (LIST, fact, cue, ...) are skipped by their declared size. After an
//! odd-sized chunk the RIFF pad byte is skipped too, but only when the
//! unpadded position does not already hold a chunk header. Encoding always writes the
//! canonical 44-byte PCM header so output is a pure function of its input.

use crate::audio::format::{AudioFormat, PCM16_BITS};
use crate::error::{Result, VocaliftError};
use std::ops::Range;

const RIFF_TAG: &[u8; 4] = b"RIFF";
const WAVE_TAG: &[u8; 4] = b"WAVE";
const FMT_TAG: &[u8; 4] = b"fmt ";
const DATA_TAG: &[u8; 4] = b"data";

/// Offset of the first chunk header (after "RIFF", size, "WAVE").
const FIRST_CHUNK_OFFSET: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
/// Bytes of the "fmt " payload we read (up to and including bits-per-sample).
const FMT_MIN_LEN: usize = 16;
const PCM_FORMAT_CODE: u16 = 1;

/// Size of the header emitted by [`encode`].
pub const CANONICAL_HEADER_LEN: usize = 44;

/// Container metadata located without interpreting the sample payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub format: AudioFormat,
    /// Byte range of the "data" payload within the input buffer.
    pub data: Range<usize>,
}

impl WavInfo {
    /// Declared size of the data payload in bytes.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }
}

/// Locates the format and data payload of a WAV buffer.
///
/// Works for any declared bit depth, so callers can report metadata for
/// files the enhancement stages will refuse.
pub fn probe(bytes: &[u8]) -> Result<WavInfo> {
    if bytes.len() < RIFF_TAG.len() || &bytes[..4] != RIFF_TAG {
        return Err(VocaliftError::NotRiff);
    }

    let mut format = None;
    let mut offset = FIRST_CHUNK_OFFSET;

    while offset + CHUNK_HEADER_LEN <= bytes.len() {
        let tag = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4);
        let payload = offset + CHUNK_HEADER_LEN;

        if tag == FMT_TAG {
            format = Some(parse_fmt(bytes, offset, payload, size)?);
        } else if tag == DATA_TAG {
            let Some(format) = format else {
                return Err(VocaliftError::MissingFmtChunk);
            };
            let end = payload
                .checked_add(size as usize)
                .filter(|&end| end <= bytes.len())
                .ok_or_else(|| truncated(tag, offset))?;
            return Ok(WavInfo {
                format,
                data: payload..end,
            });
        }

        offset = match next_chunk_offset(bytes, payload, size) {
            Some(next) => next,
            None => break,
        };
    }

    Err(VocaliftError::MissingDataChunk)
}

/// Decodes a WAV buffer into its format and interleaved samples.
///
/// The payload is read as little-endian signed 16-bit words in file order,
/// without de-interleaving or resampling. A data chunk whose size is not a
/// multiple of two is rejected rather than silently truncated.
pub fn decode(bytes: &[u8]) -> Result<(AudioFormat, Vec<i16>)> {
    let info = probe(bytes)?;
    let payload = &bytes[info.data.clone()];

    if payload.len() % 2 != 0 {
        return Err(VocaliftError::OddDataSize {
            size: payload.len() as u32,
        });
    }

    let samples = payload
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok((info.format, samples))
}

/// Encodes samples as a canonical 16-bit PCM WAV file.
///
/// Sample rate and channel count come from `format`; the depth is always
/// written as 16 bits with PCM format code 1.
pub fn encode(format: &AudioFormat, samples: &[i16]) -> Result<Vec<u8>> {
    let data_len = samples
        .len()
        .checked_mul(2)
        .and_then(|len| u32::try_from(len).ok())
        .filter(|len| len.checked_add(CANONICAL_HEADER_LEN as u32 - 8).is_some())
        .ok_or_else(|| VocaliftError::InvalidFormat {
            message: format!(
                "{} samples exceed the 4 GiB RIFF size limit",
                samples.len()
            ),
        })?;

    let pcm = AudioFormat::pcm16(format.sample_rate, format.channels);
    let riff_len = data_len + (CANONICAL_HEADER_LEN as u32 - 8);

    let mut out = Vec::with_capacity(CANONICAL_HEADER_LEN + data_len as usize);
    out.extend_from_slice(RIFF_TAG);
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(WAVE_TAG);

    out.extend_from_slice(FMT_TAG);
    out.extend_from_slice(&(FMT_MIN_LEN as u32).to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT_CODE.to_le_bytes());
    out.extend_from_slice(&pcm.channels.to_le_bytes());
    out.extend_from_slice(&pcm.sample_rate.to_le_bytes());
    out.extend_from_slice(&pcm.byte_rate().to_le_bytes());
    out.extend_from_slice(&pcm.block_align().to_le_bytes());
    out.extend_from_slice(&PCM16_BITS.to_le_bytes());

    out.extend_from_slice(DATA_TAG);
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(out)
}

fn parse_fmt(bytes: &[u8], offset: usize, payload: usize, size: u32) -> Result<AudioFormat> {
    if (size as usize) < FMT_MIN_LEN || payload + FMT_MIN_LEN > bytes.len() {
        return Err(truncated(FMT_TAG, offset));
    }
    Ok(AudioFormat {
        channels: read_u16(bytes, payload + 2),
        sample_rate: read_u32(bytes, payload + 4),
        bits_per_sample: read_u16(bytes, payload + 14),
    })
}

/// Offset of the chunk following one whose payload starts at `payload`.
///
/// Steps `size` bytes. For odd sizes, one extra pad byte is taken when that
/// lands on a chunk header and the unpadded position does not.
fn next_chunk_offset(bytes: &[u8], payload: usize, size: u32) -> Option<usize> {
    let unpadded = payload.checked_add(size as usize)?;
    if size % 2 == 0 || starts_chunk(bytes, unpadded) {
        return Some(unpadded);
    }
    let padded = unpadded + 1;
    if starts_chunk(bytes, padded) {
        Some(padded)
    } else {
        Some(unpadded)
    }
}

/// Whether a full chunk header with a printable ASCII tag starts at `at`.
fn starts_chunk(bytes: &[u8], at: usize) -> bool {
    at.checked_add(CHUNK_HEADER_LEN)
        .is_some_and(|end| end <= bytes.len())
        && bytes[at..at + 4].iter().all(|b| (0x20..=0x7e).contains(b))
}

fn truncated(tag: &[u8], offset: usize) -> VocaliftError {
    VocaliftError::TruncatedChunk {
        tag: String::from_utf8_lossy(tag).into_owned(),
        offset,
    }
}

// Callers guarantee the range is in bounds.
fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
