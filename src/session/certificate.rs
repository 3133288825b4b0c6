// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Caller Certificates
//!
//! A certificate is a short-lived credential issued outside this crate:
//! a signed proof binding the caller's account to an ephemeral signing
//! keypair. The channel consumes it per query call: the certificate
//! body becomes the signer identity on the wire, and the bound private
//! key signs the encoded envelope. Issuance and lifetime are the
//! caller's concern.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto;

/// Certificate credential consumed by [`SecureChannel::query`]
///
/// [`SecureChannel::query`]: crate::session::SecureChannel::query
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CertificateData {
    /// Signed certificate body binding the account to `pubkey`
    pub certificate: Vec<u8>,
    /// Public half of the bound ephemeral signing keypair (33 bytes)
    pub pubkey: Vec<u8>,
    /// Private half of the bound ephemeral signing keypair (32 bytes)
    pub secret: Vec<u8>,
}

impl CertificateData {
    /// Check the credential is usable before any crypto or I/O
    ///
    /// An unusable certificate is a caller error, reported rather than
    /// silently ignored.
    pub fn validate(&self) -> Result<(), String> {
        if self.certificate.is_empty() {
            return Err("certificate body is empty".to_string());
        }
        if self.pubkey.len() != crypto::keypair::PUBLIC_KEY_LEN {
            return Err(format!(
                "certificate pubkey must be {} bytes, got {}",
                crypto::keypair::PUBLIC_KEY_LEN,
                self.pubkey.len()
            ));
        }
        if self.secret.len() != 32 {
            return Err(format!(
                "certificate secret must be 32 bytes, got {}",
                self.secret.len()
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CertificateData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The bound private key stays out of debug output
        f.debug_struct("CertificateData")
            .field("certificate", &hex::encode(&self.certificate))
            .field("pubkey", &hex::encode(&self.pubkey))
            .finish_non_exhaustive()
    }
}
