// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Distortion metrics over before/after carrier buffers.
//!
//! Pure, deterministic, read-only passes — deliberately separate from the
//! embedding loop so capacity validation, embedding and measurement stay
//! independently testable.

use crate::stego::crypto::ENCRYPTION_STRENGTH;

/// PSNR reported when the error is exactly zero.
pub const PSNR_CAP_DB: f64 = 100.0;

/// Mean squared error and peak signal-to-noise ratio of a modified carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distortion {
    pub mse: f64,
    /// In dB, capped at [`PSNR_CAP_DB`] when `mse` is zero.
    pub psnr: f64,
}

/// Fidelity and usage report returned by the encode operations.
///
/// The derived security score is NOT part of this report — callers compute
/// it from `capacity_used` with [`default_security_score`] or their own
/// formula.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityReport {
    /// Peak signal-to-noise ratio in dB, capped at 100 when the error is zero.
    pub psnr: f64,
    /// Mean squared error over eligible samples/channels.
    pub mse: f64,
    /// Percentage of eligible carrier capacity consumed by the frame.
    pub capacity_used: f64,
    /// Fixed label describing the envelope cipher.
    pub encryption_strength: &'static str,
    /// Set after a successful embed; the AEAD tag enforces integrity at
    /// decode time.
    pub integrity_verified: bool,
}

impl SecurityReport {
    pub(crate) fn new(distortion: Distortion, frame_bits: usize, capacity_bits: usize) -> Self {
        Self {
            psnr: distortion.psnr,
            mse: distortion.mse,
            capacity_used: frame_bits as f64 / capacity_bits as f64 * 100.0,
            encryption_strength: ENCRYPTION_STRENGTH,
            integrity_verified: true,
        }
    }
}

fn psnr_from_mse(mse: f64, peak_squared: f64) -> f64 {
    if mse == 0.0 {
        PSNR_CAP_DB
    } else {
        10.0 * (peak_squared / mse).log10()
    }
}

/// Distortion over an RGBA buffer pair, eligible channels only.
///
/// Every 4th byte (alpha) is excluded from both the error sum and the sample
/// count; peak value is 255.
pub fn image_metrics(original: &[u8], modified: &[u8]) -> Distortion {
    debug_assert_eq!(original.len(), modified.len());
    let mut sum_squared_error = 0.0f64;
    let mut count = 0usize;
    for (i, (&a, &b)) in original.iter().zip(modified).enumerate() {
        if i % 4 == 3 {
            continue; // alpha
        }
        let diff = a as f64 - b as f64;
        sum_squared_error += diff * diff;
        count += 1;
    }
    let mse = if count == 0 { 0.0 } else { sum_squared_error / count as f64 };
    Distortion {
        mse,
        psnr: psnr_from_mse(mse, 255.0 * 255.0),
    }
}

/// Distortion over a float sample pair; peak amplitude is 1.
pub fn audio_metrics(original: &[f32], modified: &[f32]) -> Distortion {
    debug_assert_eq!(original.len(), modified.len());
    let mut sum_squared_error = 0.0f64;
    for (&a, &b) in original.iter().zip(modified) {
        let diff = a as f64 - b as f64;
        sum_squared_error += diff * diff;
    }
    let mse = if original.is_empty() {
        0.0
    } else {
        sum_squared_error / original.len() as f64
    };
    Distortion {
        mse,
        psnr: psnr_from_mse(mse, 1.0),
    }
}

/// Reference security score: a linear penalty on capacity usage,
/// `90 − capacity_used/2`, clamped to [0, 100].
///
/// Kept outside [`SecurityReport`] so callers can substitute their own
/// scoring formula.
pub fn default_security_score(capacity_used: f64) -> f64 {
    (90.0 - capacity_used / 2.0).clamp(0.0, 100.0)
}
