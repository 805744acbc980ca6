// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! # kavach-core
//!
//! Pure-Rust steganography engine for hiding encrypted text messages in the
//! least-significant bits of RGBA pixel buffers and 16-bit PCM audio.
//!
//! The payload pipeline is: AES-256-GCM-SIV envelope → glyph substitution →
//! length-prefixed bit frame → LSB embedding. Decoding reverses each stage
//! and reports distinct errors for a missing payload, a malformed payload
//! and a failed decryption. Encode operations return a [`SecurityReport`]
//! with the distortion (MSE/PSNR) and capacity usage they caused.
//!
//! Callers own all I/O: this crate receives decoded pixel buffers or sample
//! arrays and returns buffers, strings and reports. A video is handled by
//! rendering its current frame to a pixel buffer and using the image entry
//! points; the WAV codec (`wav` module, std only) is the one container this
//! crate parses itself, because audio extraction must read raw sample bytes
//! (see [`decode_audio_raw`]).
//!
//! # Quick start
//!
//! ```rust
//! use kavach_core::{encode_image, decode_image};
//!
//! let pixels = vec![0u8; 100 * 100 * 4]; // RGBA
//! let (stego, report) = encode_image(&pixels, 100, 100, "secret", "passphrase").unwrap();
//! assert!(report.psnr > 45.0);
//! let decoded = decode_image(&stego, 100, 100, "passphrase").unwrap();
//! assert_eq!(decoded, "secret");
//! ```

pub mod stego;
pub mod wav;

pub use stego::{
    audio_capacity_bits, decode_audio_raw, decode_image, default_security_score, encode_audio,
    encode_image, image_capacity_bits, progress, SecurityReport, StegoError,
};
pub use wav::error::WavError;
pub use wav::{parse_data_chunk, serialize_wav, DataChunk};
