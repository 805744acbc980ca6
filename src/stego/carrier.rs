// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Per-carrier bit addressing, capacity bounds and LSB embedding.
//!
//! Addressing is stateless: `address(i)` maps the logical bit index `i`
//! (header bits first, then payload bits) to a physical buffer offset, so the
//! scheme can be tested independently of encryption.
//!
//! Carrier kinds:
//!
//! - **Image**: RGBA-interleaved bytes. `address(i) = i + i/3` skips the
//!   alpha byte of every pixel, so eligible capacity is 3 of every 4 bytes.
//!   A rendered video frame is the same thing — callers pass its pixel
//!   buffer through the image entry points.
//! - **Audio, encode path**: float samples of channel 0, one bit per sample.
//!   Each written sample is quantized to 16-bit, LSB-set, and rescaled.
//! - **Audio, decode path**: raw 16-bit PCM read straight from the container
//!   bytes ([`RawPcmBits`]). The LSB is taken from the raw integer sample
//!   with no float reconstruction in between — a decoded/resampled float
//!   path would not preserve single-bit payloads.
//!
//! Extraction is shared across carrier kinds through the [`BitRead`] trait:
//! read the 32-bit header, validate the declared length against capacity,
//! then read exactly that many payload bits.

use crate::stego::error::StegoError;
use crate::stego::frame::{self, HEADER_BITS};
use crate::stego::progress;
use crate::wav::{self, DataChunk};

/// How often the embed/extract loops poll for cancellation, in bits.
const CANCEL_POLL_BITS: usize = 4096;

/// Physical byte offset of logical bit `i` in an RGBA buffer.
///
/// Skips the alpha byte of every pixel: bits 0,1,2 land on pixel 0's R,G,B
/// and bit 3 lands on pixel 1's R (offset 4).
pub const fn image_address(i: usize) -> usize {
    i + i / 3
}

/// Eligible image capacity in bits: 3 of every 4 buffer bytes.
pub const fn image_capacity_bits(buffer_len: usize) -> usize {
    buffer_len / 4 * 3
}

/// Eligible audio capacity in bits: one bit per channel-0 sample.
pub const fn audio_capacity_bits(sample_count: usize) -> usize {
    sample_count
}

/// Reject frames larger than the carrier's eligible capacity.
///
/// Called before any buffer is copied or mutated.
pub(crate) fn ensure_frame_fits(frame_bits: usize, capacity_bits: usize) -> Result<(), StegoError> {
    if frame_bits > capacity_bits {
        return Err(StegoError::CapacityExceeded);
    }
    Ok(())
}

/// LSB read access to an addressed carrier.
pub trait BitRead {
    /// Eligible capacity of this carrier in bits.
    fn capacity_bits(&self) -> usize;
    /// LSB at logical bit index `i`. The caller keeps `i` within capacity.
    fn read_bit(&self, i: usize) -> u8;
}

/// Read-only view over an RGBA pixel buffer.
pub struct PixelBits<'a> {
    pub bytes: &'a [u8],
}

impl BitRead for PixelBits<'_> {
    fn capacity_bits(&self) -> usize {
        image_capacity_bits(self.bytes.len())
    }

    fn read_bit(&self, i: usize) -> u8 {
        self.bytes[image_address(i)] & 1
    }
}

/// Read-only view over the raw PCM data region of a WAV stream.
pub struct RawPcmBits<'a> {
    bytes: &'a [u8],
    data: DataChunk,
}

impl<'a> RawPcmBits<'a> {
    pub fn new(bytes: &'a [u8], data: DataChunk) -> Self {
        Self { bytes, data }
    }
}

impl BitRead for RawPcmBits<'_> {
    fn capacity_bits(&self) -> usize {
        audio_capacity_bits(self.data.sample_count)
    }

    fn read_bit(&self, i: usize) -> u8 {
        (wav::sample_at(self.bytes, &self.data, i) & 1) as u8
    }
}

/// Write frame bits into the LSBs of an RGBA buffer.
///
/// The caller has already validated capacity; `pixels` is the output copy,
/// never the caller's original.
pub fn embed_into_pixels(pixels: &mut [u8], bits: &[u8]) -> Result<(), StegoError> {
    for (i, &bit) in bits.iter().enumerate() {
        if i % CANCEL_POLL_BITS == 0 {
            progress::check_cancelled()?;
        }
        let p = image_address(i);
        pixels[p] = (pixels[p] & 0xFE) | (bit & 1);
    }
    Ok(())
}

/// Write frame bits into the LSBs of float channel-0 samples.
///
/// Each touched sample is quantized to a signed 16-bit integer with
/// round-to-nearest ×32767, its LSB replaced, and the result rescaled to
/// float. Untouched samples keep their exact original values.
pub fn embed_into_samples(samples: &mut [f32], bits: &[u8]) -> Result<(), StegoError> {
    for (i, &bit) in bits.iter().enumerate() {
        if i % CANCEL_POLL_BITS == 0 {
            progress::check_cancelled()?;
        }
        let quantized = (samples[i].clamp(-1.0, 1.0) * 32767.0).round() as i16;
        let stego = (quantized & !1) | (bit & 1) as i16;
        samples[i] = stego as f32 / 32767.0;
    }
    Ok(())
}

/// Extract the payload bits of an embedded frame.
///
/// Reads the fixed 32-bit header through the carrier's address generator,
/// parses the declared payload bit length, and validates it before touching
/// the body: the length must be non-zero and `header + length` must fit the
/// eligible capacity, so a corrupted header can never cause an out-of-bounds
/// read.
///
/// # Errors
/// - [`StegoError::NoConcealedData`] if the carrier is too small for a
///   header, or the declared length is zero or out of range.
/// - [`StegoError::Cancelled`] if cancellation was requested.
pub fn extract_frame_bits<C: BitRead>(carrier: &C) -> Result<Vec<u8>, StegoError> {
    let capacity = carrier.capacity_bits();
    if capacity < HEADER_BITS {
        return Err(StegoError::NoConcealedData);
    }

    let mut header = [0u8; HEADER_BITS];
    for (i, bit) in header.iter_mut().enumerate() {
        *bit = carrier.read_bit(i);
    }
    let bit_length = frame::parse_header(&header);
    if bit_length == 0 || bit_length > capacity - HEADER_BITS {
        return Err(StegoError::NoConcealedData);
    }

    let mut payload = Vec::with_capacity(bit_length);
    for i in 0..bit_length {
        if i % CANCEL_POLL_BITS == 0 {
            progress::check_cancelled()?;
        }
        payload.push(carrier.read_bit(HEADER_BITS + i));
    }
    Ok(payload)
}
