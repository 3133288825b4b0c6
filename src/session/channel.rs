// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure Channel
//!
//! The query/command surface of an established session. All key
//! material is derived at establishment and immutable afterwards, so a
//! channel is safe to share across tasks and calls may run
//! concurrently; ordering between commands is whatever the chain's own
//! transaction ordering provides.
//!
//! Queries are a full encrypted round trip: seal, sign, POST, open.
//! Commands produce an unsubmitted message-queue transaction and never
//! touch the RPC transport.

use std::sync::Arc;

use tracing::debug;

use crate::chain::{command_topic, ContractId, MqTransaction};
use crate::config::SessionConfig;
use crate::crypto::{self, SessionSecret};
use crate::error::ClientError;
use crate::rpc::codec::{
    self, CommandPayload, EncryptedEnvelope, QueryRequest, SignatureScheme, WireSignature,
};
use crate::rpc::transport::{Transport, TransportError};
use crate::session::certificate::CertificateData;

/// An established confidential session
///
/// Constructed by [`establish`]; holds the derived session secrets, the
/// session nonce, and the transport. Dropping the channel wipes the
/// secrets and releases the transport.
///
/// [`establish`]: crate::session::establish::establish
pub struct SecureChannel {
    config: SessionConfig,
    transport: Arc<dyn Transport>,
    remote_pubkey: Vec<u8>,
    local_pubkey: Vec<u8>,
    nonce: [u8; crypto::NONCE_LEN],
    query_secret: SessionSecret,
    command_secret: SessionSecret,
}

impl SecureChannel {
    pub(crate) fn new(
        config: SessionConfig,
        transport: Arc<dyn Transport>,
        remote_pubkey: Vec<u8>,
        local_pubkey: Vec<u8>,
        nonce: [u8; crypto::NONCE_LEN],
        query_secret: SessionSecret,
        command_secret: SessionSecret,
    ) -> Self {
        Self {
            config,
            transport,
            remote_pubkey,
            local_pubkey,
            nonce,
            query_secret,
            command_secret,
        }
    }

    /// The session's ephemeral public key (compressed SEC1)
    pub fn public_key(&self) -> &[u8] {
        &self.local_pubkey
    }

    /// The runtime's published session key this channel agreed against
    pub fn remote_public_key(&self) -> &[u8] {
        &self.remote_pubkey
    }

    /// Issue a confidential query
    ///
    /// `encoded_query` is the contract-call message, already encoded by
    /// the caller's domain codec; the returned bytes are the decrypted
    /// response for the caller to decode the same way.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Certificate`] if the credential is unusable
    /// - [`ClientError::RemoteProtocol`] if the runtime rejected the
    ///   request with a structured message
    /// - [`ClientError::Transport`] for network/HTTP failures
    /// - [`ClientError::Codec`] / [`ClientError::Decryption`] for
    ///   malformed or unauthenticatable responses
    pub async fn query(
        &self,
        encoded_query: &[u8],
        certificate: &CertificateData,
    ) -> Result<Vec<u8>, ClientError> {
        certificate.validate().map_err(ClientError::Certificate)?;

        // Seal the query under the query agreement key
        let envelope = self.seal(encoded_query, &self.query_secret)?;
        let encoded_envelope = codec::encode_envelope(&envelope)?;

        // Sign the encoded envelope with the certificate's bound key
        let signature = crypto::sign_message(&encoded_envelope, &certificate.secret)
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        let request = QueryRequest {
            encoded_encrypted_data: encoded_envelope,
            signature: WireSignature {
                signed_by: certificate.certificate.clone(),
                signature_type: SignatureScheme::EcdsaRecoverable,
                signature,
            },
        };
        let request_bytes = codec::encode_query_request(&request)?;

        debug!(
            path = %self.config.query_path(),
            request_bytes = request_bytes.len(),
            "confidential query"
        );

        let response_bytes = self
            .transport
            .post(&self.config.query_path(), request_bytes)
            .await
            .map_err(unwrap_remote_rejection)?;

        // Open the response with the nonce carried by its envelope
        let response = codec::decode_query_response(&response_bytes)?;
        let response_envelope = codec::decode_envelope(&response.encoded_encrypted_data)?;

        let plaintext = crypto::decrypt(
            &response_envelope.data,
            self.query_secret.as_bytes(),
            &response_envelope.nonce,
        )
        .map_err(|e| ClientError::Decryption(e.to_string()))?;

        debug!(response_bytes = plaintext.len(), "confidential query ok");
        Ok(plaintext)
    }

    /// Build a confidential command transaction
    ///
    /// The payload is sealed under the command agreement key and wrapped
    /// for the contract's message queue topic. No RPC round trip occurs;
    /// the caller signs and submits the returned transaction.
    pub fn command(
        &self,
        contract_id: &ContractId,
        payload: &[u8],
    ) -> Result<MqTransaction, ClientError> {
        let envelope = self.seal(payload, &self.command_secret)?;
        let wrapper = codec::encode_command_payload(&CommandPayload::Encrypted(envelope))?;

        let topic = command_topic(&self.config.mq_namespace, contract_id);
        debug!(topic = %topic, payload_bytes = wrapper.len(), "confidential command");

        Ok(MqTransaction {
            topic,
            payload: wrapper,
        })
    }

    /// Encrypt a payload into the wire envelope under a session secret
    ///
    /// Every envelope this session sends carries the session nonce and
    /// the session's ephemeral public key as the sender key.
    fn seal(
        &self,
        plaintext: &[u8],
        secret: &SessionSecret,
    ) -> Result<EncryptedEnvelope, ClientError> {
        let ciphertext = crypto::encrypt(plaintext, secret.as_bytes(), &self.nonce)
            .map_err(|e| ClientError::Encryption(e.to_string()))?;

        Ok(EncryptedEnvelope {
            nonce: self.nonce.to_vec(),
            pubkey: self.local_pubkey.clone(),
            data: ciphertext,
        })
    }
}

/// Map a transport failure, unwrapping structured runtime rejections
///
/// A non-success status whose body decodes as an `RpcError` is the
/// runtime speaking; anything else is the network failing and passes
/// through unchanged.
fn unwrap_remote_rejection(err: TransportError) -> ClientError {
    if let TransportError::Status { ref body, .. } = err {
        if let Ok(rejection) = codec::decode_rpc_error(body) {
            return ClientError::RemoteProtocol(rejection.message);
        }
    }
    ClientError::Transport(err)
}
