// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Round-trip integration tests for audio encode/decode.
//!
//! The encode path works on float samples; the decode path reads raw 16-bit
//! PCM straight from the WAV bytes. These tests exercise that asymmetry
//! end-to-end.

use kavach_core::{
    audio_capacity_bits, decode_audio_raw, encode_audio, parse_data_chunk, StegoError, WavError,
};

/// Deterministic sample buffer with amplitudes spread over [-1, 1).
fn test_samples(count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| ((i * 37 % 200) as f32 - 100.0) / 100.0)
        .collect()
}

#[test]
fn audio_roundtrip_basic() {
    let samples = test_samples(8_000);
    let message = "Hello from the waveform";
    let passphrase = "audio-pass-1";

    let (wav, report) = encode_audio(&samples, &[], 44_100, message, passphrase).unwrap();
    assert!(report.integrity_verified);

    let decoded = decode_audio_raw(&wav, passphrase).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn audio_roundtrip_unicode() {
    let samples = test_samples(16_000);
    let message = "音声透かし test 🎵";
    let (wav, _) = encode_audio(&samples, &[], 22_050, message, "ünïcode").unwrap();
    assert_eq!(decode_audio_raw(&wav, "ünïcode").unwrap(), message);
}

#[test]
fn audio_roundtrip_various_lengths() {
    let samples = test_samples(32_000);
    let passphrase = "multi-test";

    for len in [1, 10, 100, 800] {
        let message: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let (wav, _) = encode_audio(&samples, &[], 44_100, &message, passphrase).unwrap();
        let decoded = decode_audio_raw(&wav, passphrase).unwrap();
        assert_eq!(decoded, message, "failed for message length {len}");
    }
}

#[test]
fn audio_wrong_key_fails() {
    let samples = test_samples(8_000);
    let (wav, _) = encode_audio(&samples, &[], 44_100, "secret", "correct").unwrap();
    let result = decode_audio_raw(&wav, "wrong");
    assert!(matches!(result, Err(StegoError::DecryptionFailed)));
}

#[test]
fn audio_encode_leaves_input_untouched() {
    let samples = test_samples(4_000);
    let snapshot = samples.clone();
    let _ = encode_audio(&samples, &[], 44_100, "secret", "pass").unwrap();
    assert_eq!(samples, snapshot);
}

#[test]
fn audio_message_too_large() {
    // 256 samples = 256 bits of capacity; any message frame is bigger.
    let samples = test_samples(256);
    let result = encode_audio(&samples, &[], 44_100, "too big for this", "pass");
    assert!(matches!(result, Err(StegoError::CapacityExceeded)));
}

#[test]
fn audio_capacity_boundary_is_exact() {
    let message = "boundary";
    let passphrase = "pass";

    // Recover the deterministic frame bit length from a roomy encode.
    let samples = test_samples(10_000);
    let (_, report) = encode_audio(&samples, &[], 44_100, message, passphrase).unwrap();
    let frame_bits =
        (report.capacity_used / 100.0 * audio_capacity_bits(samples.len()) as f64).round() as usize;

    // One bit per sample: a buffer of exactly frame_bits samples fits.
    let samples = test_samples(frame_bits);
    let (wav, report) = encode_audio(&samples, &[], 44_100, message, passphrase).unwrap();
    assert_eq!(report.capacity_used, 100.0);
    assert_eq!(decode_audio_raw(&wav, passphrase).unwrap(), message);

    // One sample short fails before anything is written.
    let samples = test_samples(frame_bits - 1);
    let result = encode_audio(&samples, &[], 44_100, message, passphrase);
    assert!(matches!(result, Err(StegoError::CapacityExceeded)));
}

#[test]
fn audio_not_a_wav_rejected() {
    let result = decode_audio_raw(b"definitely not a wav file", "pass");
    assert!(matches!(
        result,
        Err(StegoError::InvalidContainer(WavError::InvalidRiff))
    ));
}

#[test]
fn audio_missing_data_chunk_rejected() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    let result = decode_audio_raw(&bytes, "pass");
    assert!(matches!(
        result,
        Err(StegoError::InvalidContainer(WavError::MissingDataChunk))
    ));
}

#[test]
fn audio_silence_has_no_data() {
    // A valid WAV with all-zero samples: header parses as bit length 0.
    let silence = kavach_core::serialize_wav(44_100, 1, &vec![0.0f32; 4_096], &[]);
    let result = decode_audio_raw(&silence, "pass");
    assert!(matches!(result, Err(StegoError::NoConcealedData)));
}

#[test]
fn audio_corrupted_header_detected() {
    let samples = test_samples(4_096);
    let (mut wav, _) = encode_audio(&samples, &[], 44_100, "hidden", "pass").unwrap();

    // Force the 32 header sample LSBs to one: declared length 2^32 - 1.
    let data = parse_data_chunk(&wav).unwrap();
    for i in 0..32 {
        wav[data.offset + i * 2] |= 1;
    }
    let result = decode_audio_raw(&wav, "pass");
    assert!(matches!(result, Err(StegoError::NoConcealedData)));
}

#[test]
fn audio_stereo_output_geometry() {
    // Embedding touches channel 0 only; the second channel is passed through
    // and interleaved into the output container.
    let left = test_samples(2_048);
    let right = vec![vec![0.125f32; 2_048]];
    let (wav, _) = encode_audio(&left, &right, 48_000, "st", "pass").unwrap();

    let data = parse_data_chunk(&wav).unwrap();
    assert_eq!(data.sample_count, 2 * 2_048);
    // Channel 1 samples sit at odd raw indices and are untouched.
    let expected = (0.125f32 * 32767.0).round() as i16;
    for i in 0..8 {
        let p = data.offset + (i * 2 + 1) * 2;
        let sample = i16::from_le_bytes([wav[p], wav[p + 1]]);
        assert_eq!(sample, expected);
    }
}

#[test]
fn audio_distortion_bound() {
    let samples = test_samples(8_000);
    let (_, report) = encode_audio(&samples, &[], 44_100, "fidelity check", "pass").unwrap();
    // LSB-of-16-bit embedding distorts each touched sample by at most
    // 1.5/32767 of full scale.
    assert!(report.psnr > 80.0, "psnr {}", report.psnr);
    assert!(report.mse < 1e-8, "mse {}", report.mse);
}
