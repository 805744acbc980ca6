// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from container parsing through
//! embedding, extraction and decryption. Every error is local, deterministic
//! and non-retryable; no call mutates its input buffer on failure.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The audio carrier could not be parsed as a RIFF/WAVE PCM stream.
    InvalidContainer(crate::wav::error::WavError),
    /// The pixel buffer length does not match the declared dimensions.
    CarrierMismatch,
    /// The payload frame is larger than the carrier's eligible capacity.
    CapacityExceeded,
    /// The extracted length header is zero or exceeds the carrier capacity.
    NoConcealedData,
    /// Extracted bits are not byte-aligned or do not decode as UTF-8.
    MalformedPayload,
    /// AEAD decryption failed (wrong passphrase or corrupted envelope).
    /// Malformed envelopes report this same kind — wrong-key and
    /// corrupted-data cases are deliberately indistinguishable.
    DecryptionFailed,
    /// The operation was cancelled by the user.
    Cancelled,
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContainer(e) => write!(f, "invalid WAV container: {e}"),
            Self::CarrierMismatch => write!(f, "pixel buffer does not match declared dimensions"),
            Self::CapacityExceeded => write!(f, "payload exceeds carrier capacity"),
            Self::NoConcealedData => write!(f, "no concealed data detected or header corrupted"),
            Self::MalformedPayload => write!(f, "extracted payload is malformed"),
            Self::DecryptionFailed => write!(f, "decryption failed (wrong passphrase?)"),
            Self::Cancelled => write!(f, "operation cancelled by user"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidContainer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::wav::error::WavError> for StegoError {
    fn from(e: crate::wav::error::WavError) -> Self {
        Self::InvalidContainer(e)
    }
}
