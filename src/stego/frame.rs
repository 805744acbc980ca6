// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Bit framing for embedded payloads.
//!
//! The frame is the bit sequence written into a carrier:
//!
//! ```text
//! [32 bits] payload bit length (unsigned, big-endian)
//! [N bits ] payload: UTF-8 bytes of the substituted envelope, MSB first
//! ```
//!
//! Bits are represented as `Vec<u8>` holding 0/1 values. The header value
//! always equals the exact bit length of the body that follows; extraction
//! validates the header against carrier capacity before reading the body.

use crate::stego::error::StegoError;

/// Width of the frame's bit-length header.
pub const HEADER_BITS: usize = 32;

/// Convert text to its UTF-8 bit expansion (MSB first within each byte).
pub fn text_to_bits(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

/// Convert a bit vector (MSB first) back to text.
///
/// # Errors
/// [`StegoError::MalformedPayload`] if the bit count is not a multiple of 8
/// or the resulting bytes are not valid UTF-8.
pub fn bits_to_text(bits: &[u8]) -> Result<String, StegoError> {
    if bits.len() % 8 != 0 {
        return Err(StegoError::MalformedPayload);
    }
    let mut bytes = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    String::from_utf8(bytes).map_err(|_| StegoError::MalformedPayload)
}

/// Build a frame: 32-bit big-endian bit-length header followed by the body.
pub fn build_frame(body_bits: &[u8]) -> Vec<u8> {
    debug_assert!(body_bits.len() <= u32::MAX as usize, "body exceeds header range");
    let len = body_bits.len() as u32;
    let mut frame = Vec::with_capacity(HEADER_BITS + body_bits.len());
    for bit_pos in (0..HEADER_BITS).rev() {
        frame.push(((len >> bit_pos) & 1) as u8);
    }
    frame.extend_from_slice(body_bits);
    frame
}

/// Parse the 32-bit header prefix as an unsigned bit length.
///
/// The caller must supply at least [`HEADER_BITS`] bits.
pub fn parse_header(bits: &[u8]) -> usize {
    debug_assert!(bits.len() >= HEADER_BITS);
    bits[..HEADER_BITS]
        .iter()
        .fold(0usize, |acc, &bit| (acc << 1) | (bit & 1) as usize)
}
