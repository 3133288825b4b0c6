// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single-Shot Binary RPC Transport
//!
//! One POST per RPC, octet-stream in both directions, no connection
//! state of our own. Non-success responses keep their raw body so the
//! channel can decide whether the runtime sent a structured rejection
//! or the network just failed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

/// Transport-layer failures
///
/// `Status` preserves the response body: the caller decides whether it
/// decodes as a structured runtime rejection.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Request never completed (connect, DNS, timeout, abort)
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("http status {status} ({} body bytes)", .body.len())]
    Status { status: u16, body: Vec<u8> },
}

/// Capability for issuing one-shot binary POSTs to the runtime
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` (relative to the endpoint) and return the
    /// raw response bytes
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}

/// HTTP transport over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a transport for an endpoint like `http://host:8000`
    ///
    /// A trailing slash on the endpoint is stripped; paths passed to
    /// [`Transport::post`] start with `/`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let url = format!("{}{}", self.endpoint, path);
        debug!(url = %url, request_bytes = body.len(), "rpc post");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?.to_vec();
        debug!(url = %url, status = status.as_u16(), response_bytes = bytes.len(), "rpc response");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: bytes,
            });
        }

        Ok(bytes)
    }
}
