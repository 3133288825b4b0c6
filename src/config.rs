// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session Configuration
//!
//! Inputs for establishing a confidential session: where the runtime
//! lives, which contract the session is scoped to, and the message
//! queue namespace commands are published under.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::chain::ContractId;

fn default_base_path() -> String {
    "/prpc".to_string()
}

fn default_mq_namespace() -> String {
    "enclave".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for one confidential session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Runtime endpoint, e.g. `http://127.0.0.1:8000`
    pub endpoint: String,

    /// Path prefix for runtime RPCs
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Contract the command agreement key is scoped to
    pub contract_id: ContractId,

    /// Namespace prefix for message queue topics
    #[serde(default = "default_mq_namespace")]
    pub mq_namespace: String,

    /// Transport timeout per RPC
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SessionConfig {
    /// Minimal configuration with defaults for everything optional
    pub fn new(endpoint: impl Into<String>, contract_id: ContractId) -> Self {
        Self {
            endpoint: endpoint.into(),
            base_path: default_base_path(),
            contract_id,
            mq_namespace: default_mq_namespace(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Validate the configuration before any I/O
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("invalid endpoint '{}': {}", self.endpoint, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "endpoint scheme must be http or https, got '{}'",
                url.scheme()
            ));
        }
        if !self.base_path.starts_with('/') {
            return Err(format!(
                "base_path must start with '/', got '{}'",
                self.base_path
            ));
        }
        if self.mq_namespace.is_empty() || self.mq_namespace.contains('/') {
            return Err(format!(
                "mq_namespace must be a non-empty single path segment, got '{}'",
                self.mq_namespace
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of the info RPC
    pub fn info_path(&self) -> String {
        format!("{}/EnclaveAPI.GetInfo", self.base_path.trim_end_matches('/'))
    }

    /// Path of the confidential query RPC
    pub fn query_path(&self) -> String {
        format!(
            "{}/EnclaveAPI.ContractQuery",
            self.base_path.trim_end_matches('/')
        )
    }
}
