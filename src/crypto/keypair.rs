// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ephemeral Session Keypair
//!
//! A fresh secp256k1 keypair is generated from OS randomness for every
//! session. The private half never leaves the session object and is
//! dropped with it; the compressed public half is what travels inside
//! encrypted envelopes as the sender key.

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use rand::rngs::OsRng;

/// Compressed SEC1 public key length
pub const PUBLIC_KEY_LEN: usize = 33;

/// Per-session secp256k1 keypair
///
/// Generated once per session, never persisted. `SecretKey` zeroizes its
/// scalar on drop.
pub struct EphemeralKeypair {
    secret: SecretKey,
    public: PublicKey,
}

impl EphemeralKeypair {
    /// Generate a fresh keypair from OS randomness
    pub fn generate() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        let public = secret.public_key();
        Self { secret, public }
    }

    /// The private half, for key agreement and nothing else
    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }

    /// Compressed SEC1 encoding of the public half (33 bytes)
    pub fn public_bytes(&self) -> Vec<u8> {
        self.public.to_encoded_point(true).as_bytes().to_vec()
    }
}

impl std::fmt::Debug for EphemeralKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret scalar, even in debug output
        f.debug_struct("EphemeralKeypair")
            .field("public", &hex::encode(self.public_bytes()))
            .finish_non_exhaustive()
    }
}
