// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Legacy Contract-Call Adapter
//!
//! Call sites written against a conventional, non-confidential contract
//! interface keep working by talking to this adapter instead: reads are
//! rerouted through [`SecureChannel::query`], writes through
//! [`SecureChannel::command`]. The adapter is an explicit type
//! constructed once and passed to call sites; nothing is patched at
//! runtime.
//!
//! Contract message schemas are contract-defined, so wrapping a raw
//! call into the contract's envelope (and unwrapping the response) goes
//! through the caller-injected [`ContractCodec`] capability. The error
//! taxonomy of the underlying channel passes through unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};

use crate::chain::{ContractId, MqTransaction};
use crate::error::ClientError;
use crate::rpc::codec::CodecError;
use crate::session::{CertificateData, SecureChannel};

/// Per-call envelope nonce length (contract schema convention)
pub const CALL_NONCE_LEN: usize = 32;

/// Caller-supplied codec for contract-defined message envelopes
///
/// Implementations own the contract's schema; the adapter only supplies
/// a fresh random call nonce and the raw message bytes.
pub trait ContractCodec: Send + Sync {
    /// Wrap a raw contract message into the contract's query envelope
    fn encode_query(
        &self,
        contract_id: &ContractId,
        call_nonce: &[u8; CALL_NONCE_LEN],
        message: &[u8],
    ) -> Result<Vec<u8>, anyhow::Error>;

    /// Unwrap the contract's response envelope into the raw return value
    fn decode_response(&self, bytes: &[u8]) -> Result<Vec<u8>, anyhow::Error>;

    /// Wrap a raw contract message into the contract's command envelope
    fn encode_command(
        &self,
        call_nonce: &[u8; CALL_NONCE_LEN],
        message: &[u8],
    ) -> Result<Vec<u8>, anyhow::Error>;
}

/// Conventional contract-call surface
///
/// The interface legacy call sites were written against: a read call
/// returning bytes and a write producing an unsubmitted transaction.
#[async_trait]
pub trait ContractCall: Send + Sync {
    async fn call(
        &self,
        contract_id: &ContractId,
        input: &[u8],
        certificate: &CertificateData,
    ) -> Result<Vec<u8>, ClientError>;

    fn transact(
        &self,
        contract_id: &ContractId,
        input: &[u8],
    ) -> Result<MqTransaction, ClientError>;
}

/// Adapter rerouting the conventional surface through a secure channel
pub struct LegacyContractClient {
    channel: Arc<SecureChannel>,
    codec: Arc<dyn ContractCodec>,
}

impl LegacyContractClient {
    pub fn new(channel: Arc<SecureChannel>, codec: Arc<dyn ContractCodec>) -> Self {
        Self { channel, codec }
    }

    fn fresh_call_nonce() -> [u8; CALL_NONCE_LEN] {
        let mut nonce = [0u8; CALL_NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

#[async_trait]
impl ContractCall for LegacyContractClient {
    async fn call(
        &self,
        contract_id: &ContractId,
        input: &[u8],
        certificate: &CertificateData,
    ) -> Result<Vec<u8>, ClientError> {
        let call_nonce = Self::fresh_call_nonce();
        let encoded = self
            .codec
            .encode_query(contract_id, &call_nonce, input)
            .map_err(|e| CodecError::Contract(e.to_string()))?;

        let response = self.channel.query(&encoded, certificate).await?;

        self.codec
            .decode_response(&response)
            .map_err(|e| CodecError::Contract(e.to_string()).into())
    }

    fn transact(
        &self,
        contract_id: &ContractId,
        input: &[u8],
    ) -> Result<MqTransaction, ClientError> {
        let call_nonce = Self::fresh_call_nonce();
        let payload = self
            .codec
            .encode_command(&call_nonce, input)
            .map_err(|e| CodecError::Contract(e.to_string()))?;

        self.channel.command(contract_id, &payload)
    }
}
