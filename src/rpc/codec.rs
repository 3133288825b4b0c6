// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Binary RPC Message Codec
//!
//! The runtime speaks a small fixed set of binary-framed messages,
//! bincode-encoded with normative field order:
//!
//! - `RuntimeInfo`: response to the info RPC, carries the runtime's
//!   published session public key
//! - `EncryptedEnvelope`: wire shape for any confidential payload
//! - `QueryRequest` / `QueryResponse`: the signed confidential query
//!   round trip
//! - `RpcError`: structured rejection returned instead of a response
//! - `CommandPayload`: wrapper carried on the per-contract message queue
//!
//! Domain-specific contract message schemas are NOT encoded here; those
//! are opaque bytes produced and consumed by caller-supplied codecs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Binary encode/decode failures
///
/// A decode failure after a successful transport call indicates a schema
/// mismatch between client and runtime and is fatal for that call.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        source: bincode::Error,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        source: bincode::Error,
    },

    /// Caller-supplied contract codec rejected a domain envelope
    #[error("contract codec failure: {0}")]
    Contract(String),
}

/// Runtime identity reported by the info RPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeInfo {
    /// Runtime's published session public key (compressed SEC1)
    pub public_key: Vec<u8>,
    /// Runtime software version string
    pub version: String,
    /// Whether the runtime is registered on chain
    pub registered: bool,
}

/// Wire shape for a confidential payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// 12-byte AEAD nonce used for this ciphertext
    pub nonce: Vec<u8>,
    /// Sender's compressed public key (the session's ephemeral key)
    pub pubkey: Vec<u8>,
    /// AES-256-GCM ciphertext with appended tag
    pub data: Vec<u8>,
}

/// Signature schemes understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    EcdsaRecoverable,
}

/// Signature over an encoded encrypted envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSignature {
    /// Certificate bytes identifying and authorizing the signer
    pub signed_by: Vec<u8>,
    /// Scheme of the `signature` field
    pub signature_type: SignatureScheme,
    /// 65-byte recoverable ECDSA signature
    pub signature: Vec<u8>,
}

/// Signed confidential query request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Bincode-encoded `EncryptedEnvelope`
    pub encoded_encrypted_data: Vec<u8>,
    pub signature: WireSignature,
}

/// Confidential query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Bincode-encoded `EncryptedEnvelope`
    pub encoded_encrypted_data: Vec<u8>,
}

/// Structured rejection from the runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub message: String,
}

/// Wrapper for confidential command payloads on the message queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CommandPayload {
    Encrypted(EncryptedEnvelope),
}

macro_rules! codec_fns {
    ($encode:ident, $decode:ident, $ty:ty, $name:literal) => {
        pub fn $encode(value: &$ty) -> Result<Vec<u8>, CodecError> {
            bincode::serialize(value).map_err(|source| CodecError::Encode {
                what: $name,
                source,
            })
        }

        pub fn $decode(bytes: &[u8]) -> Result<$ty, CodecError> {
            bincode::deserialize(bytes).map_err(|source| CodecError::Decode {
                what: $name,
                source,
            })
        }
    };
}

codec_fns!(encode_runtime_info, decode_runtime_info, RuntimeInfo, "RuntimeInfo");
codec_fns!(encode_envelope, decode_envelope, EncryptedEnvelope, "EncryptedEnvelope");
codec_fns!(encode_query_request, decode_query_request, QueryRequest, "QueryRequest");
codec_fns!(encode_query_response, decode_query_response, QueryResponse, "QueryResponse");
codec_fns!(encode_rpc_error, decode_rpc_error, RpcError, "RpcError");
codec_fns!(encode_command_payload, decode_command_payload, CommandPayload, "CommandPayload");
