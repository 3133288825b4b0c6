// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Key Agreement
//!
//! Derives per-session shared secrets between the client's ephemeral
//! keypair and a remote public key (the runtime's session key for
//! queries, a contract's registered key for commands) using secp256k1
//! ECDH followed by HKDF-SHA256 expansion to a 32-byte key. Both sides
//! compute the same value independently, so no secret ever crosses the
//! wire.

use anyhow::{anyhow, Result};
use hkdf::Hkdf;
use k256::{elliptic_curve::sec1::FromEncodedPoint, EncodedPoint, PublicKey, SecretKey};
use sha2::Sha256;

use super::secret::SessionSecret;

/// Derive a 32-byte shared session secret via ECDH
///
/// Performs ECDH between the local private key and the remote public
/// key, then expands the shared point through HKDF-SHA256. Derivation
/// is deterministic: the same two keys always produce the same secret.
///
/// # Arguments
///
/// * `remote_pub` - Remote public key (33 bytes compressed or 65 bytes uncompressed)
/// * `local_secret` - Local secp256k1 private key
///
/// # Errors
///
/// Returns error if the remote key is not a valid curve point or HKDF
/// expansion fails.
pub fn derive_session_secret(
    remote_pub: &[u8],
    local_secret: &SecretKey,
) -> Result<SessionSecret> {
    let remote = parse_public_key(remote_pub)?;

    // ECDH: shared_point = remote_pub * local_secret
    let shared = k256::ecdh::diffie_hellman(local_secret.to_nonzero_scalar(), remote.as_affine());

    // Expand the raw shared point into a uniformly distributed 32-byte key
    let hkdf = Hkdf::<Sha256>::new(None, shared.raw_secret_bytes());
    let mut derived = [0u8; 32];
    hkdf.expand(&[], &mut derived)
        .map_err(|e| anyhow!("HKDF key derivation failed: {}", e))?;

    Ok(SessionSecret::new(derived))
}

/// Parse a SEC1-encoded secp256k1 public key
///
/// Accepts both compressed (33 bytes) and uncompressed (65 bytes)
/// encodings.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey> {
    if bytes.len() != 33 && bytes.len() != 65 {
        return Err(anyhow!(
            "Invalid public key size: expected 33 or 65 bytes, got {}",
            bytes.len()
        ));
    }

    let point = EncodedPoint::from_bytes(bytes)
        .map_err(|e| anyhow!("Failed to parse public key: {}", e))?;

    let parsed = PublicKey::from_encoded_point(&point);
    if parsed.is_some().into() {
        Ok(parsed.unwrap())
    } else {
        Err(anyhow!("Invalid public key point"))
    }
}
