// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Minimal RIFF/WAVE container codec (zero external dependencies).
//!
//! Reads just enough of a WAV stream to locate the raw 16-bit PCM sample
//! region, and writes a canonical 44-byte RIFF/WAVE/fmt header followed by
//! interleaved 16-bit little-endian samples.
//!
//! The decode side of the steganography pipeline reads samples straight from
//! the container bytes via [`parse_data_chunk`] + [`sample_at`] instead of
//! routing through a platform audio pipeline: decoder and resampler stages
//! may alter sample values, which destroys single-bit watermarks. The encode
//! side writes with [`serialize_wav`] so that the raw-byte read recovers the
//! embedded LSBs exactly.
//!
//! Supports:
//! - 16-bit PCM, mono or interleaved multi-channel
//! - `data` chunk at any position after the 12-byte RIFF header
//!
//! Does NOT support:
//! - Compressed or float sample formats
//! - RF64 / 64-bit chunk sizes

pub mod error;

use error::{Result, WavError};

/// Byte length of the canonical header written by [`serialize_wav`].
pub const HEADER_LEN: usize = 44;

/// Location of the PCM sample region inside a WAV stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChunk {
    /// Byte offset of the first sample, immediately after the `data` chunk header.
    pub offset: usize,
    /// Number of 16-bit samples from `offset` to the end of the stream.
    pub sample_count: usize,
}

/// Locate the `data` chunk of a RIFF/WAVE stream.
///
/// Validates the RIFF magic, then walks sub-chunks starting at offset 12
/// (4-byte chunk ID + little-endian u32 chunk size, advancing by `8 + size`)
/// until the `data` chunk is found. The sample count assumes 16-bit PCM and
/// covers everything from the data offset to the end of the stream.
///
/// # Errors
/// - [`WavError::InvalidRiff`] if the stream does not start with `RIFF`.
/// - [`WavError::MissingDataChunk`] if the stream ends before a `data` chunk.
/// - [`WavError::ChunkOverflow`] if a chunk size overflows the stream.
pub fn parse_data_chunk(bytes: &[u8]) -> Result<DataChunk> {
    if bytes.len() < 4 || &bytes[..4] != b"RIFF" {
        return Err(WavError::InvalidRiff);
    }

    let mut offset = 12usize;
    loop {
        if offset + 8 > bytes.len() {
            return Err(WavError::MissingDataChunk);
        }
        let id = &bytes[offset..offset + 4];
        let size = u32::from_le_bytes([
            bytes[offset + 4],
            bytes[offset + 5],
            bytes[offset + 6],
            bytes[offset + 7],
        ]) as usize;
        if id == b"data" {
            offset += 8;
            break;
        }
        offset = offset
            .checked_add(8 + size)
            .ok_or(WavError::ChunkOverflow)?;
    }

    Ok(DataChunk {
        offset,
        sample_count: (bytes.len() - offset) / 2,
    })
}

/// Read the `i`-th little-endian 16-bit sample of the data region.
///
/// The caller must keep `i < data.sample_count`.
pub fn sample_at(bytes: &[u8], data: &DataChunk, i: usize) -> i16 {
    let p = data.offset + i * 2;
    i16::from_le_bytes([bytes[p], bytes[p + 1]])
}

/// Quantize a float amplitude to a signed 16-bit sample.
///
/// Clamps to [-1, 1] and scales by 32767 with round-to-nearest. The scale and
/// rounding must match the embedding quantizer exactly — serialization must
/// not disturb the LSB of samples that carry payload bits.
pub fn quantize_sample(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Serialize float channels to a 16-bit PCM WAV file.
///
/// Writes the canonical 44-byte RIFF/WAVE/fmt header (PCM format tag, 16-bit
/// depth) followed by interleaved little-endian samples. `modified_channel0`
/// supplies channel 0; `other_channels` supply the remaining
/// `channel_count - 1` channels. Channels shorter than channel 0 are padded
/// with silence.
pub fn serialize_wav(
    sample_rate: u32,
    channel_count: u16,
    modified_channel0: &[f32],
    other_channels: &[Vec<f32>],
) -> Vec<u8> {
    let frames = modified_channel0.len();
    let num_chan = channel_count.max(1) as usize;
    let data_len = frames * num_chan * 2;
    let total = HEADER_LEN + data_len;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((total - 8) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM format tag
    out.extend_from_slice(&(num_chan as u16).to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * 2 * num_chan as u32).to_le_bytes()); // byte rate
    out.extend_from_slice(&((num_chan * 2) as u16).to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_len as u32).to_le_bytes());

    for i in 0..frames {
        out.extend_from_slice(&quantize_sample(modified_channel0[i]).to_le_bytes());
        for ch in 1..num_chan {
            let sample = other_channels
                .get(ch - 1)
                .and_then(|channel| channel.get(i))
                .copied()
                .unwrap_or(0.0);
            out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_parse_roundtrip() {
        let samples = vec![0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25];
        let bytes = serialize_wav(44100, 1, &samples, &[]);

        let data = parse_data_chunk(&bytes).unwrap();
        assert_eq!(data.offset, HEADER_LEN);
        assert_eq!(data.sample_count, samples.len());

        for (i, &s) in samples.iter().enumerate() {
            assert_eq!(sample_at(&bytes, &data, i), quantize_sample(s));
        }
    }

    #[test]
    fn quantizer_is_lossless_over_its_own_output() {
        // Samples of the form q/32767 must survive serialization with their
        // LSB intact, for both signs.
        for q in [-32767i16, -32000, -3, -2, -1, 0, 1, 2, 3, 32000, 32767] {
            let s = q as f32 / 32767.0;
            assert_eq!(quantize_sample(s), q, "q={q}");
        }
    }

    #[test]
    fn header_fields_canonical() {
        let bytes = serialize_wav(22050, 2, &[0.0; 10], &[vec![0.0; 10]]);
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        // fmt chunk size 16, PCM tag 1, 2 channels.
        assert_eq!(u32::from_le_bytes(bytes[16..20].try_into().unwrap()), 16);
        assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 22050);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(
            u32::from_le_bytes(bytes[40..44].try_into().unwrap()) as usize,
            10 * 2 * 2
        );
        assert_eq!(bytes.len(), HEADER_LEN + 10 * 2 * 2);
    }

    #[test]
    fn not_riff_rejected() {
        assert_eq!(parse_data_chunk(b"RIFX....WAVE"), Err(WavError::InvalidRiff));
        assert_eq!(parse_data_chunk(b"RI"), Err(WavError::InvalidRiff));
        assert_eq!(parse_data_chunk(&[]), Err(WavError::InvalidRiff));
    }

    #[test]
    fn missing_data_chunk_rejected() {
        // Valid RIFF header, one non-data chunk, then EOF.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&20u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 4]);
        assert_eq!(parse_data_chunk(&bytes), Err(WavError::MissingDataChunk));
    }

    #[test]
    fn data_chunk_after_extra_chunks() {
        // RIFF header, a LIST chunk, then the data chunk.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&0u32.to_le_bytes()); // size not validated
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&6u32.to_le_bytes());
        bytes.extend_from_slice(&[0xAA; 6]);
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&4u32.to_le_bytes());
        bytes.extend_from_slice(&0x1234i16.to_le_bytes());
        bytes.extend_from_slice(&(-77i16).to_le_bytes());

        let data = parse_data_chunk(&bytes).unwrap();
        assert_eq!(data.sample_count, 2);
        assert_eq!(sample_at(&bytes, &data, 0), 0x1234);
        assert_eq!(sample_at(&bytes, &data, 1), -77);
    }

    #[test]
    fn stereo_interleaving() {
        let left = vec![0.5f32, -0.5];
        let right = vec![vec![0.25f32, -0.25]];
        let bytes = serialize_wav(8000, 2, &left, &right);
        let data = parse_data_chunk(&bytes).unwrap();
        assert_eq!(data.sample_count, 4);
        assert_eq!(sample_at(&bytes, &data, 0), quantize_sample(0.5));
        assert_eq!(sample_at(&bytes, &data, 1), quantize_sample(0.25));
        assert_eq!(sample_at(&bytes, &data, 2), quantize_sample(-0.5));
        assert_eq!(sample_at(&bytes, &data, 3), quantize_sample(-0.25));
    }

    #[test]
    fn out_of_range_input_clamped() {
        assert_eq!(quantize_sample(1.5), 32767);
        assert_eq!(quantize_sample(-3.0), -32767);
    }
}
