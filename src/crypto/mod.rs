// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session Cryptography
//!
//! Primitives for the confidential session protocol:
//!
//! - **agreement**: secp256k1 ECDH + HKDF-SHA256 session secrets
//! - **cipher**: AES-256-GCM payload encryption
//! - **keypair**: per-session ephemeral keypair
//! - **secret**: zeroized storage for derived secrets
//! - **signing**: recoverable ECDSA over encoded envelopes
//!
//! ## Security Considerations
//!
//! - Session secrets are held in memory only and wiped on drop
//! - The ephemeral private key never leaves the session object
//! - Decryption failures are surfaced, never swallowed; a failed tag
//!   check may indicate tampering or a key mismatch

use std::sync::OnceLock;

use anyhow::{anyhow, Result};

pub mod agreement;
pub mod cipher;
pub mod keypair;
pub mod secret;
pub mod signing;

pub use agreement::{derive_session_secret, parse_public_key};
pub use cipher::{decrypt, encrypt, KEY_LEN, NONCE_LEN};
pub use keypair::EphemeralKeypair;
pub use secret::SessionSecret;
pub use signing::{recover_signer, sign_message, SIGNATURE_LEN};

static READY: OnceLock<std::result::Result<(), String>> = OnceLock::new();

/// One-time cryptographic readiness check
///
/// Runs a known-answer AEAD round trip the first time a session is
/// established and caches the outcome for the life of the process. A
/// failing backend fails every subsequent establishment with the same
/// error.
pub fn ensure_ready() -> Result<()> {
    let outcome = READY.get_or_init(|| {
        let key = [0x42u8; KEY_LEN];
        let nonce = [0x24u8; NONCE_LEN];
        let plaintext = b"readiness probe";

        let ciphertext = encrypt(plaintext, &key, &nonce).map_err(|e| e.to_string())?;
        let recovered = decrypt(&ciphertext, &key, &nonce).map_err(|e| e.to_string())?;

        if recovered != plaintext {
            return Err("AEAD round trip produced wrong plaintext".to_string());
        }
        Ok(())
    });

    outcome
        .clone()
        .map_err(|e| anyhow!("crypto backend unavailable: {}", e))
}
