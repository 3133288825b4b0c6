// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Binary RPC Layer
//!
//! The wire protocol between client and runtime: fixed message shapes
//! (`codec`) carried over one-shot binary POSTs (`transport`).

pub mod codec;
pub mod transport;

pub use codec::{CodecError, EncryptedEnvelope, QueryRequest, QueryResponse, RpcError, RuntimeInfo};
pub use transport::{HttpTransport, Transport, TransportError};
