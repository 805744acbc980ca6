// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Global progress tracking and cancellation.
//!
//! Uses atomics so the flags are safe to poll from a worker thread while the
//! caller's UI thread requests cancellation. The embed/extract loops check
//! [`check_cancelled`] at fixed bit intervals; operations remain atomic —
//! a cancelled call returns an error and leaves the caller's buffers
//! untouched (embedding only ever writes to its private copy).

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::error::StegoError;

static STEP: AtomicU32 = AtomicU32::new(0);
static TOTAL: AtomicU32 = AtomicU32::new(0);
static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Reset progress to 0 and set the total step count.
/// Also resets the cancellation flag so a fresh operation starts clean.
pub fn init(total: u32) {
    CANCELLED.store(false, Ordering::Relaxed);
    STEP.store(0, Ordering::Relaxed);
    TOTAL.store(total, Ordering::Relaxed);
}

/// Request cancellation of the current operation.
///
/// The pipelines check this flag at natural loop boundaries and return
/// `Err(StegoError::Cancelled)` when set.
pub fn cancel() {
    CANCELLED.store(true, Ordering::Relaxed);
}

/// Returns `true` if cancellation has been requested.
pub fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::Relaxed)
}

/// Check for cancellation and return an error if requested.
pub fn check_cancelled() -> Result<(), StegoError> {
    if is_cancelled() {
        Err(StegoError::Cancelled)
    } else {
        Ok(())
    }
}

/// Advance progress by one step.
/// Step is capped at total-1 so the bar never hits 100% before [`finish`].
pub fn advance() {
    let total = TOTAL.load(Ordering::Relaxed);
    if total == 0 {
        STEP.fetch_add(1, Ordering::Relaxed);
    } else {
        let _ = STEP.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
            if s + 1 < total {
                Some(s + 1)
            } else {
                Some(s)
            }
        });
    }
}

/// Read the current (step, total) progress.
pub fn get() -> (u32, u32) {
    (
        STEP.load(Ordering::Relaxed),
        TOTAL.load(Ordering::Relaxed),
    )
}

/// Mark progress as complete (step = total).
pub fn finish() {
    let t = TOTAL.load(Ordering::Relaxed);
    STEP.store(t, Ordering::Relaxed);
}
