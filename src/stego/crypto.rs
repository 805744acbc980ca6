// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/kavachcore

//! Encryption envelope for the secret message.
//!
//! [`encrypt`] produces an opaque base64 envelope:
//!
//! ```text
//! base64( [12 bytes] nonce || [N + 16 bytes] AES-256-GCM-SIV ciphertext )
//! ```
//!
//! The nonce is freshly random per call and always precedes the ciphertext
//! (which carries the 16-byte authentication tag). AES-256-GCM-SIV is used
//! for its nonce-misuse resistance.
//!
//! # Key derivation — documented weak mode
//!
//! The key is the raw passphrase, right-padded with zero bytes (or truncated)
//! to exactly 32 bytes. There is no salt and no slow password hash, so the
//! effective strength is the passphrase's entropy and nothing more. Changing
//! this to a real KDF would break every existing envelope, because the
//! envelope carries no salt field.

use aes_gcm_siv::aead::Aead;
use aes_gcm_siv::{Aes256GcmSiv, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// AES-GCM-SIV nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// Fixed label reported in [`SecurityReport`](crate::stego::metrics::SecurityReport).
pub const ENCRYPTION_STRENGTH: &str = "AES-256-GCM-SIV";

/// Derive the AES-256 key from a passphrase by zero-padding or truncating
/// its UTF-8 bytes to exactly [`KEY_LEN`] bytes.
fn derive_key(passphrase: &str) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    let bytes = passphrase.as_bytes();
    let n = bytes.len().min(KEY_LEN);
    key[..n].copy_from_slice(&bytes[..n]);
    key
}

/// Encrypt plaintext into a base64 envelope.
///
/// Generates a fresh random 96-bit nonce, encrypts with AES-256-GCM-SIV and
/// returns `base64(nonce || ciphertext)`.
pub fn encrypt(plaintext: &str, passphrase: &str) -> String {
    use rand::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(passphrase);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .expect("AES-GCM-SIV encrypt should not fail");

    let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    envelope.extend_from_slice(&nonce_bytes);
    envelope.extend_from_slice(&ciphertext);
    BASE64.encode(envelope)
}

/// Decrypt a base64 envelope produced by [`encrypt`].
///
/// # Errors
/// - [`StegoError::DecryptionFailed`] if the envelope is not valid base64,
///   is shorter than the nonce, or the authentication tag does not verify.
///   All of these report the same kind; a wrong passphrase is never
///   distinguishable from corrupted data.
/// - [`StegoError::MalformedPayload`] if the authenticated plaintext is not
///   valid UTF-8.
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<String, StegoError> {
    let bytes = BASE64
        .decode(envelope)
        .map_err(|_| StegoError::DecryptionFailed)?;
    if bytes.len() < NONCE_LEN {
        return Err(StegoError::DecryptionFailed);
    }
    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);

    let key = derive_key(passphrase);
    let cipher = Aes256GcmSiv::new_from_slice(&*key).expect("valid key length");
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| StegoError::MalformedPayload)
}
