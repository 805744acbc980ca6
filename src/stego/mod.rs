// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Steganographic encoding and decoding pipelines.
//!
//! Both carriers share one payload path: the secret is sealed in an
//! encryption envelope ([`crypto`]), obfuscated through the glyph table
//! ([`glyphs`]), framed as a length-prefixed bit sequence ([`frame`]) and
//! written into carrier LSBs ([`carrier`]). Encode operations additionally
//! measure the distortion they introduced ([`metrics`]).
//!
//! The public entry points:
//!
//! - [`encode_image`] / [`decode_image`] — RGBA pixel buffers (a rendered
//!   video frame is the same buffer).
//! - [`encode_audio`] — float samples in, 16-bit PCM WAV out.
//! - [`decode_audio_raw`] — raw WAV bytes in; samples are read straight from
//!   the container so no audio pipeline can disturb the embedded bits.

pub mod error;
pub mod crypto;
pub mod glyphs;
pub mod frame;
pub mod carrier;
pub mod metrics;
pub mod progress;
mod pipeline;

pub use error::StegoError;
pub use metrics::{default_security_score, Distortion, SecurityReport};
pub use pipeline::{decode_audio_raw, decode_image, encode_audio, encode_image};
pub use carrier::{audio_capacity_bits, image_capacity_bits};
