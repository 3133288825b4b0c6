// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chain Capabilities
//!
//! The client never talks to the chain itself; it consumes two narrow
//! capabilities from the caller's chain stack:
//!
//! - [`ChainStorage`]: read a contract's registered public key
//! - [`MqTransaction`]: an unsubmitted message-queue transaction the
//!   caller signs and submits through its own submission pipeline
//!
//! Commands never get an RPC response; inclusion and confirmation are
//! observed by the caller's chain collaborator.

use async_trait::async_trait;

pub mod contract_id;

pub use contract_id::{ContractId, ContractIdError, CONTRACT_ID_LEN};

/// Read access to on-chain contract registry state
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainStorage: Send + Sync {
    /// The contract's registered public key, or `None` if the contract
    /// has no key on chain
    async fn contract_key(
        &self,
        contract_id: &ContractId,
    ) -> Result<Option<Vec<u8>>, anyhow::Error>;
}

/// An unsubmitted message-queue transaction
///
/// `payload` is the binary-encoded command wrapper appended to `topic`.
/// The caller signs and submits it; this crate never holds submission
/// credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqTransaction {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// Derive the per-contract command topic
///
/// Deterministic: `"<namespace>/contract/<hex contract id>/command"`,
/// with the id as lowercase bare hex.
pub fn command_topic(namespace: &str, contract_id: &ContractId) -> String {
    format!("{}/contract/{}/command", namespace, contract_id.to_hex())
}
