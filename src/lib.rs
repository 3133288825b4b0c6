// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Confidential client SDK for an attested enclave runtime
//!
//! Establishes a per-session key agreement with a runtime's published
//! public key and exchanges encrypted, signed, binary-framed RPC
//! messages over it. Queries are end-to-end confidential round trips;
//! commands are sealed payloads for the contract's on-chain message
//! queue. See [`session::establish::establish`] for the entry point.

pub mod adapter;
pub mod chain;
pub mod config;
pub mod crypto;
pub mod error;
pub mod rpc;
pub mod session;

// Re-export the call surface
pub use adapter::{ContractCall, ContractCodec, LegacyContractClient};
pub use chain::{command_topic, ChainStorage, ContractId, ContractIdError, MqTransaction};
pub use config::SessionConfig;
pub use error::ClientError;
pub use rpc::{CodecError, HttpTransport, Transport, TransportError};
pub use session::{establish, CertificateData, SecureChannel};
