// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Error types for WAV container parsing.

use std::fmt;

/// Errors that can occur while parsing a RIFF/WAVE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WavError {
    /// Missing RIFF magic at start of data (not a WAV file).
    InvalidRiff,
    /// Reached end of stream without finding a `data` chunk.
    MissingDataChunk,
    /// A declared chunk size runs past the end of the stream.
    ChunkOverflow,
}

impl fmt::Display for WavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRiff => write!(f, "missing RIFF magic (not a WAV file)"),
            Self::MissingDataChunk => write!(f, "no data chunk found"),
            Self::ChunkOverflow => write!(f, "chunk size exceeds stream length"),
        }
    }
}

impl std::error::Error for WavError {}

pub type Result<T> = std::result::Result<T, WavError>;
