// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Encode/decode pipelines for image and audio carriers.
//!
//! Encode: envelope encryption → glyph substitution → bit framing →
//! capacity check → LSB embedding into a copy → distortion metrics.
//! Decode runs the stages in reverse: header-validated extraction →
//! bit decoding → glyph reversal → envelope decryption.
//!
//! A video carrier never reaches this module as such — the caller renders
//! the current frame to an RGBA buffer and uses the image entry points.

use crate::stego::carrier::{self, PixelBits, RawPcmBits};
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::frame;
use crate::stego::glyphs;
use crate::stego::metrics::{self, SecurityReport};
use crate::stego::progress;
use crate::wav;

/// Progress steps reported by the encode pipelines
/// (frame build, embed, metrics/serialize).
const ENCODE_STEPS: u32 = 3;

/// Progress steps reported by the decode pipelines (extract, decrypt).
const DECODE_STEPS: u32 = 2;

/// Validate that an RGBA buffer matches its declared dimensions.
fn validate_pixel_geometry(pixels: &[u8], width: u32, height: u32) -> Result<(), StegoError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|p| p.checked_mul(4));
    match expected {
        Some(len) if len == pixels.len() => Ok(()),
        _ => Err(StegoError::CarrierMismatch),
    }
}

/// Run the forward payload stages: encrypt, substitute, frame.
fn build_payload_frame(secret_text: &str, passphrase: &str) -> Vec<u8> {
    let envelope = crypto::encrypt(secret_text, passphrase);
    let obfuscated = glyphs::to_glyphs(&envelope);
    frame::build_frame(&frame::text_to_bits(&obfuscated))
}

/// Run the reverse payload stages: decode bits, reverse-substitute, decrypt.
fn decode_payload_bits(payload_bits: &[u8], passphrase: &str) -> Result<String, StegoError> {
    let obfuscated = frame::bits_to_text(payload_bits)?;
    let envelope = glyphs::from_glyphs(&obfuscated);
    crypto::decrypt(&envelope, passphrase)
}

/// Embed an encrypted secret into the LSBs of an RGBA pixel buffer.
///
/// Returns the modified buffer copy and a [`SecurityReport`]; the input
/// buffer is never mutated.
///
/// # Errors
/// - [`StegoError::CarrierMismatch`] if `pixels.len() != width * height * 4`.
/// - [`StegoError::CapacityExceeded`] if the payload frame exceeds the
///   eligible capacity (75% of the buffer, in bits). Checked before any
///   copy is made.
/// - [`StegoError::Cancelled`] if cancellation was requested.
pub fn encode_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    secret_text: &str,
    passphrase: &str,
) -> Result<(Vec<u8>, SecurityReport), StegoError> {
    progress::init(ENCODE_STEPS);
    let result = encode_image_inner(pixels, width, height, secret_text, passphrase);
    progress::finish();
    result
}

fn encode_image_inner(
    pixels: &[u8],
    width: u32,
    height: u32,
    secret_text: &str,
    passphrase: &str,
) -> Result<(Vec<u8>, SecurityReport), StegoError> {
    validate_pixel_geometry(pixels, width, height)?;

    let frame_bits = build_payload_frame(secret_text, passphrase);
    let capacity = carrier::image_capacity_bits(pixels.len());
    carrier::ensure_frame_fits(frame_bits.len(), capacity)?;
    progress::advance();

    let mut modified = pixels.to_vec();
    carrier::embed_into_pixels(&mut modified, &frame_bits)?;
    progress::advance();

    let distortion = metrics::image_metrics(pixels, &modified);
    let report = SecurityReport::new(distortion, frame_bits.len(), capacity);
    progress::advance();

    Ok((modified, report))
}

/// Extract and decrypt a secret from an RGBA pixel buffer.
///
/// The buffer is only read, never mutated.
///
/// # Errors
/// - [`StegoError::CarrierMismatch`] if `pixels.len() != width * height * 4`.
/// - [`StegoError::NoConcealedData`] if the length header is zero or out of
///   range for this carrier.
/// - [`StegoError::MalformedPayload`] if the extracted bits do not decode.
/// - [`StegoError::DecryptionFailed`] if the passphrase is wrong or the
///   envelope is corrupted.
pub fn decode_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    passphrase: &str,
) -> Result<String, StegoError> {
    progress::init(DECODE_STEPS);
    let result = decode_image_inner(pixels, width, height, passphrase);
    progress::finish();
    result
}

fn decode_image_inner(
    pixels: &[u8],
    width: u32,
    height: u32,
    passphrase: &str,
) -> Result<String, StegoError> {
    validate_pixel_geometry(pixels, width, height)?;

    let payload_bits = carrier::extract_frame_bits(&PixelBits { bytes: pixels })?;
    progress::advance();

    let secret = decode_payload_bits(&payload_bits, passphrase)?;
    progress::advance();
    Ok(secret)
}

/// Embed an encrypted secret into channel 0 of a float sample stream and
/// serialize the result as a 16-bit PCM WAV file.
///
/// `channel0` carries the payload (one bit per sample); `other_channels`
/// pass through untouched. The output WAV has `1 + other_channels.len()`
/// interleaved channels.
///
/// # Errors
/// - [`StegoError::CapacityExceeded`] if the payload frame exceeds the
///   channel-0 sample count, in bits. Checked before any copy is made.
/// - [`StegoError::Cancelled`] if cancellation was requested.
pub fn encode_audio(
    channel0: &[f32],
    other_channels: &[Vec<f32>],
    sample_rate: u32,
    secret_text: &str,
    passphrase: &str,
) -> Result<(Vec<u8>, SecurityReport), StegoError> {
    progress::init(ENCODE_STEPS);
    let result = encode_audio_inner(channel0, other_channels, sample_rate, secret_text, passphrase);
    progress::finish();
    result
}

fn encode_audio_inner(
    channel0: &[f32],
    other_channels: &[Vec<f32>],
    sample_rate: u32,
    secret_text: &str,
    passphrase: &str,
) -> Result<(Vec<u8>, SecurityReport), StegoError> {
    let frame_bits = build_payload_frame(secret_text, passphrase);
    let capacity = carrier::audio_capacity_bits(channel0.len());
    carrier::ensure_frame_fits(frame_bits.len(), capacity)?;
    progress::advance();

    let mut modified = channel0.to_vec();
    carrier::embed_into_samples(&mut modified, &frame_bits)?;
    progress::advance();

    let distortion = metrics::audio_metrics(channel0, &modified);
    let report = SecurityReport::new(distortion, frame_bits.len(), capacity);
    let channel_count = 1 + other_channels.len() as u16;
    let wav_bytes = wav::serialize_wav(sample_rate, channel_count, &modified, other_channels);
    progress::advance();

    Ok((wav_bytes, report))
}

/// Extract and decrypt a secret from the raw bytes of a 16-bit PCM WAV file.
///
/// Reads samples directly from the container via the minimal WAV parser —
/// never through an audio decoding pipeline, whose resampling would destroy
/// the embedded LSBs. Raw samples are addressed consecutively, which lines
/// up with the embedded channel-0 bits for mono output (the format
/// [`encode_audio`] writes for single-channel input).
///
/// # Errors
/// - [`StegoError::InvalidContainer`] if the bytes are not a parseable
///   RIFF/WAVE stream with a `data` chunk.
/// - [`StegoError::NoConcealedData`] if the length header is zero or out of
///   range for this carrier.
/// - [`StegoError::MalformedPayload`] if the extracted bits do not decode.
/// - [`StegoError::DecryptionFailed`] if the passphrase is wrong or the
///   envelope is corrupted.
pub fn decode_audio_raw(wav_bytes: &[u8], passphrase: &str) -> Result<String, StegoError> {
    progress::init(DECODE_STEPS);
    let result = decode_audio_raw_inner(wav_bytes, passphrase);
    progress::finish();
    result
}

fn decode_audio_raw_inner(wav_bytes: &[u8], passphrase: &str) -> Result<String, StegoError> {
    let data = wav::parse_data_chunk(wav_bytes)?;

    let payload_bits = carrier::extract_frame_bits(&RawPcmBits::new(wav_bytes, data))?;
    progress::advance();

    let secret = decode_payload_bits(&payload_bits, passphrase)?;
    progress::advance();
    Ok(secret)
}
