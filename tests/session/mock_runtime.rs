//! In-process mock enclave runtime
//!
//! Speaks the client's wire protocol over a real HTTP listener: publishes
//! a session key via the info RPC, performs the server side of the key
//! agreement for contract queries, and answers with sealed envelopes.
//!
//! Query behavior, keyed on the decrypted plaintext:
//! - `ping`  -> sealed `pong`
//! - `fail`  -> HTTP 400 with a binary `RpcError` body
//! - `garble`-> response sealed under the wrong key
//! - anything else -> sealed `echo:<plaintext>`

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
use k256::SecretKey;
use rand::{rngs::OsRng, RngCore};

use fabstir_enclave_client::chain::{ChainStorage, ContractId};
use fabstir_enclave_client::crypto::{self, EphemeralKeypair};
use fabstir_enclave_client::rpc::codec::{
    self, EncryptedEnvelope, QueryResponse, RpcError, RuntimeInfo, SignatureScheme,
};

pub struct RuntimeState {
    secret: SecretKey,
    public: Vec<u8>,
    publish_key: bool,
}

pub struct MockRuntime {
    pub addr: SocketAddr,
    pub public_key: Vec<u8>,
}

impl MockRuntime {
    /// Spawn a runtime that publishes its session key
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawn a runtime that reports an empty session key
    pub async fn spawn_unkeyed() -> Self {
        Self::spawn_with(false).await
    }

    async fn spawn_with(publish_key: bool) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let keypair = EphemeralKeypair::generate();
        let public = keypair.public_bytes();
        let state = Arc::new(RuntimeState {
            secret: keypair.secret().clone(),
            public: public.clone(),
            publish_key,
        });

        let app = Router::new()
            .route("/prpc/EnclaveAPI.GetInfo", post(get_info))
            .route("/prpc/EnclaveAPI.ContractQuery", post(contract_query))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock runtime");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock runtime");
        });

        Self {
            addr,
            public_key: public,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn get_info(State(state): State<Arc<RuntimeState>>) -> Vec<u8> {
    let public_key = if state.publish_key {
        state.public.clone()
    } else {
        Vec::new()
    };
    codec::encode_runtime_info(&RuntimeInfo {
        public_key,
        version: "mock-1.0".to_string(),
        registered: true,
    })
    .unwrap()
}

async fn contract_query(
    State(state): State<Arc<RuntimeState>>,
    body: Bytes,
) -> (StatusCode, Vec<u8>) {
    let request = match codec::decode_query_request(&body) {
        Ok(request) => request,
        Err(e) => return rejection(StatusCode::BAD_REQUEST, &format!("bad request: {}", e)),
    };

    // Authenticate: the signature must recover over the envelope bytes
    assert_eq!(
        request.signature.signature_type,
        SignatureScheme::EcdsaRecoverable
    );
    assert!(!request.signature.signed_by.is_empty(), "missing certificate");
    if crypto::recover_signer(&request.signature.signature, &request.encoded_encrypted_data)
        .is_err()
    {
        return rejection(StatusCode::UNAUTHORIZED, "signature does not verify");
    }

    let envelope = match codec::decode_envelope(&request.encoded_encrypted_data) {
        Ok(envelope) => envelope,
        Err(e) => return rejection(StatusCode::BAD_REQUEST, &format!("bad envelope: {}", e)),
    };

    // Server side of the session key agreement
    let shared = crypto::derive_session_secret(&envelope.pubkey, &state.secret)
        .expect("server-side agreement");

    let plaintext = match crypto::decrypt(&envelope.data, shared.as_bytes(), &envelope.nonce) {
        Ok(plaintext) => plaintext,
        Err(_) => return rejection(StatusCode::BAD_REQUEST, "cannot decrypt query"),
    };

    match plaintext.as_slice() {
        b"ping" => sealed_reply(&state, shared.as_bytes(), b"pong"),
        b"fail" => rejection(StatusCode::BAD_REQUEST, "mock rejection"),
        b"garble" => sealed_reply(&state, &[0xee; 32], b"pong"),
        other => {
            let mut echoed = b"echo:".to_vec();
            echoed.extend_from_slice(other);
            sealed_reply(&state, shared.as_bytes(), &echoed)
        }
    }
}

fn sealed_reply(state: &RuntimeState, key: &[u8], plaintext: &[u8]) -> (StatusCode, Vec<u8>) {
    // Fresh response nonce; the client must use the one the envelope carries
    let mut nonce = [0u8; 12];
    OsRng.fill_bytes(&mut nonce);

    let envelope = EncryptedEnvelope {
        nonce: nonce.to_vec(),
        pubkey: state.public.clone(),
        data: crypto::encrypt(plaintext, key, &nonce).unwrap(),
    };
    let response = QueryResponse {
        encoded_encrypted_data: codec::encode_envelope(&envelope).unwrap(),
    };
    (
        StatusCode::OK,
        codec::encode_query_response(&response).unwrap(),
    )
}

fn rejection(status: StatusCode, message: &str) -> (StatusCode, Vec<u8>) {
    (
        status,
        codec::encode_rpc_error(&RpcError {
            message: message.to_string(),
        })
        .unwrap(),
    )
}

/// Chain storage stub answering with a fixed contract key
pub struct StaticChain {
    key: Option<Vec<u8>>,
}

impl StaticChain {
    pub fn with_key(key: Vec<u8>) -> Self {
        Self { key: Some(key) }
    }

    pub fn empty() -> Self {
        Self { key: None }
    }
}

#[async_trait]
impl ChainStorage for StaticChain {
    async fn contract_key(
        &self,
        _contract_id: &ContractId,
    ) -> Result<Option<Vec<u8>>, anyhow::Error> {
        Ok(self.key.clone())
    }
}
