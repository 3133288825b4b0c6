// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-256-GCM Payload Encryption
//!
//! Authenticated encryption for confidential query and command payloads.
//! Every encrypted payload on the wire uses AES-256-GCM with a 12-byte
//! nonce and no additional authenticated data:
//!
//! ```text
//! ciphertext = AES-256-GCM(key, nonce, plaintext) | tag (16 bytes)
//! ```
//!
//! The nonce travels alongside the ciphertext in the envelope, so the
//! decrypting side always uses the nonce carried by the message it is
//! opening, not a locally remembered one.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, Result};

/// Nonce length required by AES-GCM as used on this wire
pub const NONCE_LEN: usize = 12;

/// Key length for AES-256
pub const KEY_LEN: usize = 32;

/// Encrypt a payload under a session key
///
/// # Arguments
///
/// * `plaintext` - Data to encrypt
/// * `key` - 32-byte session key
/// * `nonce` - 12-byte nonce
///
/// # Returns
///
/// Ciphertext with the 16-byte authentication tag appended
///
/// # Errors
///
/// Returns error if the key or nonce has the wrong size, or the cipher
/// rejects the operation.
pub fn encrypt(plaintext: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key, nonce)?;

    cipher
        .encrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad: b"",
            },
        )
        .map_err(|e| anyhow!("AES-GCM encryption failed: {}", e))
}

/// Decrypt a payload under a session key
///
/// # Arguments
///
/// * `ciphertext` - Encrypted data including the authentication tag
/// * `key` - 32-byte session key
/// * `nonce` - 12-byte nonce carried by the envelope being opened
///
/// # Returns
///
/// The decrypted plaintext
///
/// # Errors
///
/// Returns error if the key or nonce has the wrong size, or the
/// authentication tag does not verify (wrong key or tampered data).
pub fn decrypt(ciphertext: &[u8], key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let cipher = build_cipher(key, nonce)?;

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: b"",
            },
        )
        .map_err(|e| {
            anyhow!(
                "AES-GCM decryption failed (authentication error - wrong key or corrupted data): {}",
                e
            )
        })
}

fn build_cipher(key: &[u8], nonce: &[u8]) -> Result<Aes256Gcm> {
    if key.len() != KEY_LEN {
        return Err(anyhow!(
            "Invalid key size: expected {} bytes, got {}",
            KEY_LEN,
            key.len()
        ));
    }
    if nonce.len() != NONCE_LEN {
        return Err(anyhow!(
            "Invalid nonce size: expected {} bytes, got {}",
            NONCE_LEN,
            nonce.len()
        ));
    }

    Aes256Gcm::new_from_slice(key).map_err(|e| anyhow!("Failed to create AES-GCM cipher: {}", e))
}
