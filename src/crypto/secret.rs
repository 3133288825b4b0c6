// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Derived Session Secrets
//!
//! Wrapper for the 32-byte secrets produced by key agreement. Secrets
//! live in memory only, are wiped when the session drops, and never
//! appear in debug output or logs.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte shared secret derived once per session
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionSecret([u8; 32]);

impl SessionSecret {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw key material, for handing to the cipher
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}
