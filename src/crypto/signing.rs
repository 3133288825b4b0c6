// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recoverable ECDSA Request Signing
//!
//! Outbound confidential queries are signed with the certificate's bound
//! ephemeral private key over the SHA-256 digest of the encoded
//! envelope. Signatures use the 65-byte compact form:
//!
//! - Bytes 0-31: r component (big-endian)
//! - Bytes 32-63: s component (big-endian)
//! - Byte 64: recovery ID (v), 0 or 1
//!
//! The recovery side is what the runtime runs to authenticate the
//! signer; it is exposed here so local verifiers (and the test mock
//! runtime) can check signatures the same way.

use anyhow::{anyhow, Result};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use sha2::{Digest, Sha256};

/// Compact recoverable signature length (r + s + v)
pub const SIGNATURE_LEN: usize = 65;

/// Sign message bytes with a 32-byte secp256k1 private key
///
/// Hashes the message with SHA-256 and signs the digest, returning the
/// 65-byte compact recoverable signature.
///
/// # Errors
///
/// Returns error if the private key is malformed or signing fails.
pub fn sign_message(message: &[u8], secret: &[u8]) -> Result<Vec<u8>> {
    if secret.len() != 32 {
        return Err(anyhow!(
            "Invalid signing key size: expected 32 bytes, got {}",
            secret.len()
        ));
    }

    let signing_key =
        SigningKey::from_slice(secret).map_err(|e| anyhow!("Failed to parse signing key: {}", e))?;

    let digest = Sha256::digest(message);
    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(&digest)
        .map_err(|e| anyhow!("ECDSA signing failed: {}", e))?;

    let mut compact = signature.to_bytes().to_vec();
    compact.push(recovery_id.to_byte());
    Ok(compact)
}

/// Recover the signer's compressed public key from a 65-byte signature
///
/// The message is hashed with SHA-256 exactly as `sign_message` does.
///
/// # Errors
///
/// Returns error if the signature is not 65 bytes, the recovery ID is
/// invalid, or recovery fails.
pub fn recover_signer(signature: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    if signature.len() != SIGNATURE_LEN {
        return Err(anyhow!(
            "Invalid signature size: expected {} bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        ));
    }

    let mut recovery_byte = signature[64];
    // Normalize legacy 27/28 recovery IDs to 0/1
    if recovery_byte >= 27 {
        recovery_byte -= 27;
    }
    let recovery_id = RecoveryId::try_from(recovery_byte)
        .map_err(|e| anyhow!("Invalid recovery ID: {}", e))?;

    let parsed = Signature::try_from(&signature[..64])
        .map_err(|e| anyhow!("Failed to parse signature: {}", e))?;

    let digest = Sha256::digest(message);
    let verifying_key = VerifyingKey::recover_from_prehash(&digest, &parsed, recovery_id)
        .map_err(|e| anyhow!("Failed to recover public key: {}", e))?;

    Ok(verifying_key.to_encoded_point(true).as_bytes().to_vec())
}
