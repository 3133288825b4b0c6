// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session Establishment
//!
//! Startup orchestration for a confidential session:
//!
//! 1. One-time crypto readiness check
//! 2. Fetch and validate the runtime's published session key
//! 3. Generate the session's ephemeral keypair and nonce
//! 4. Derive the query agreement key against the runtime key
//! 5. Read the contract's registered key from chain storage and derive
//!    the command agreement key
//! 6. Hand back a [`SecureChannel`] closed over all of it
//!
//! Every `establish` call generates fresh key material; two sessions
//! against the same runtime never share an ephemeral keypair.

use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use tracing::{debug, info};

use crate::chain::ChainStorage;
use crate::config::SessionConfig;
use crate::crypto::{self, EphemeralKeypair};
use crate::error::ClientError;
use crate::rpc::codec;
use crate::rpc::transport::Transport;
use crate::session::channel::SecureChannel;

/// Establish a confidential session against a runtime
///
/// # Errors
///
/// - [`ClientError::Config`] if the configuration is rejected
/// - [`ClientError::Transport`] if the info RPC cannot be completed
/// - [`ClientError::RemoteKeyUnavailable`] if the runtime publishes no
///   session key, or the contract has no registered key on chain
/// - [`ClientError::KeyAgreement`] if either derivation fails
pub async fn establish(
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    chain: Arc<dyn ChainStorage>,
) -> Result<SecureChannel, ClientError> {
    config.validate().map_err(ClientError::Config)?;
    crypto::ensure_ready().map_err(|e| ClientError::CryptoUnavailable(e.to_string()))?;

    // Fetch the runtime's published session key
    let info_bytes = transport.post(&config.info_path(), Vec::new()).await?;
    let runtime_info = codec::decode_runtime_info(&info_bytes)?;

    if runtime_info.public_key.is_empty() {
        return Err(ClientError::RemoteKeyUnavailable {
            key: "runtime session".to_string(),
        });
    }
    debug!(
        version = %runtime_info.version,
        registered = runtime_info.registered,
        "runtime info fetched"
    );

    // Fresh key material for this session only
    let keypair = EphemeralKeypair::generate();
    let mut nonce = [0u8; crypto::NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let query_secret = crypto::derive_session_secret(&runtime_info.public_key, keypair.secret())
        .map_err(|e| ClientError::KeyAgreement(format!("query key: {}", e)))?;

    // The command key is scoped to the contract's registered on-chain key
    let contract_key = chain
        .contract_key(&config.contract_id)
        .await
        .map_err(|e| ClientError::ChainStorage(e.to_string()))?
        .ok_or_else(|| ClientError::RemoteKeyUnavailable {
            key: format!("contract {}", config.contract_id),
        })?;

    let command_secret = crypto::derive_session_secret(&contract_key, keypair.secret())
        .map_err(|e| ClientError::KeyAgreement(format!("command key: {}", e)))?;

    info!(
        endpoint = %config.endpoint,
        contract = %config.contract_id,
        "🔐 confidential session established"
    );

    Ok(SecureChannel::new(
        config,
        transport,
        runtime_info.public_key,
        keypair.public_bytes(),
        nonce,
        query_secret,
        command_secret,
    ))
}
