// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Contract Identifiers
//!
//! Contracts are addressed by a fixed 32-byte identifier, written as hex
//! with or without a `0x` prefix. Identifiers are normalized to
//! lowercase bare hex internally; display adds the prefix back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier length in bytes
pub const CONTRACT_ID_LEN: usize = 32;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContractIdError {
    #[error("contract id is not valid hex: {0}")]
    InvalidHex(String),

    #[error("contract id must be {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// 32-byte contract identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId([u8; CONTRACT_ID_LEN]);

impl ContractId {
    pub fn new(bytes: [u8; CONTRACT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from hex, accepting an optional `0x` prefix and mixed case
    pub fn from_hex(s: &str) -> Result<Self, ContractIdError> {
        let bare = s.strip_prefix("0x").unwrap_or(s);

        let bytes =
            hex::decode(bare).map_err(|e| ContractIdError::InvalidHex(e.to_string()))?;

        if bytes.len() != CONTRACT_ID_LEN {
            return Err(ContractIdError::InvalidLength {
                expected: CONTRACT_ID_LEN,
                actual: bytes.len(),
            });
        }

        let mut id = [0u8; CONTRACT_ID_LEN];
        id.copy_from_slice(&bytes);
        Ok(Self(id))
    }

    pub fn as_bytes(&self) -> &[u8; CONTRACT_ID_LEN] {
        &self.0
    }

    /// Lowercase bare hex, as used in message queue topics
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl FromStr for ContractId {
    type Err = ContractIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
