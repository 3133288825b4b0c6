// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client Error Taxonomy
//!
//! Every fallible operation in this crate surfaces one of these variants
//! so callers can tell "the network failed" apart from "the runtime
//! rejected this":
//!
//! - **RemoteKeyUnavailable**: session cannot start (missing runtime or
//!   contract key); not retryable without a remote-side fix
//! - **Transport**: network/HTTP failure; callers may retry
//! - **RemoteProtocol**: the runtime explicitly rejected the request;
//!   not retryable without changing the request
//! - **Codec**: malformed binary data on encode/decode (schema mismatch)
//! - **Decryption**: ciphertext failed authentication; possible
//!   tampering or key mismatch, never swallowed
//! - **Certificate**: the caller supplied an unusable certificate
//!
//! Nothing here is retried internally.

use crate::rpc::codec::CodecError;
use crate::rpc::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by session establishment and the secure channel
#[derive(Error, Debug)]
pub enum ClientError {
    /// The remote side did not publish the key the session needs
    #[error("remote did not publish a {key} key")]
    RemoteKeyUnavailable { key: String },

    /// Network or HTTP failure; the request may never have reached the runtime
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The runtime decoded the request and rejected it with a message
    #[error("runtime rejected request: {0}")]
    RemoteProtocol(String),

    /// Binary encode/decode failure on a wire message
    #[error("codec failure: {0}")]
    Codec(#[from] CodecError),

    /// AEAD encryption failure on an outbound payload
    #[error("encryption failure: {0}")]
    Encryption(String),

    /// AEAD authentication or decryption failure on a response envelope
    #[error("decryption failure: {0}")]
    Decryption(String),

    /// Certificate is missing required fields or has malformed key material
    #[error("invalid certificate: {0}")]
    Certificate(String),

    /// ECDH or HKDF key derivation failed
    #[error("key agreement failure: {0}")]
    KeyAgreement(String),

    /// ECDSA signing of an outbound request failed
    #[error("signing failure: {0}")]
    Signing(String),

    /// Contract key lookup infrastructure failed (chain storage capability)
    #[error("chain storage failure: {0}")]
    ChainStorage(String),

    /// Client configuration rejected before any I/O
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The cryptographic backend failed its one-time readiness check
    #[error("crypto backend unavailable: {0}")]
    CryptoUnavailable(String),
}

impl ClientError {
    /// Whether a retry of the same call can plausibly succeed
    ///
    /// Only transport failures qualify; everything else needs the caller
    /// to change the request or the remote side to change state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
