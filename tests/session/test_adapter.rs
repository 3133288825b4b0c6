//! Legacy adapter rerouting through the secure channel

use std::sync::Arc;

use fabstir_enclave_client::adapter::CALL_NONCE_LEN;
use fabstir_enclave_client::crypto::{self, EphemeralKeypair};
use fabstir_enclave_client::rpc::codec::{self, CommandPayload};
use fabstir_enclave_client::{ContractCall, ContractCodec, ContractId, LegacyContractClient};

use super::mock_runtime::{MockRuntime, StaticChain};
use super::test_establish::connect;
use super::test_query::test_certificate;

/// Passthrough contract codec: queries go out as-is, responses come back
/// framed as `echo:<bytes>` by the mock runtime, commands carry the call
/// nonce ahead of the message
struct EchoCodec;

impl ContractCodec for EchoCodec {
    fn encode_query(
        &self,
        _contract_id: &ContractId,
        _call_nonce: &[u8; CALL_NONCE_LEN],
        message: &[u8],
    ) -> Result<Vec<u8>, anyhow::Error> {
        Ok(message.to_vec())
    }

    fn decode_response(&self, bytes: &[u8]) -> Result<Vec<u8>, anyhow::Error> {
        bytes
            .strip_prefix(b"echo:")
            .map(<[u8]>::to_vec)
            .ok_or_else(|| anyhow::anyhow!("unexpected response frame"))
    }

    fn encode_command(
        &self,
        call_nonce: &[u8; CALL_NONCE_LEN],
        message: &[u8],
    ) -> Result<Vec<u8>, anyhow::Error> {
        let mut out = call_nonce.to_vec();
        out.extend_from_slice(message);
        Ok(out)
    }
}

#[tokio::test]
async fn test_legacy_call_round_trips_through_secure_channel() {
    let runtime = MockRuntime::spawn().await;
    let contract = EphemeralKeypair::generate();
    let contract_id = ContractId::new([7u8; 32]);

    let channel = connect(&runtime, StaticChain::with_key(contract.public_bytes()))
        .await
        .unwrap();
    let adapter = LegacyContractClient::new(Arc::new(channel), Arc::new(EchoCodec));

    let result = adapter
        .call(&contract_id, b"legacy-read", &test_certificate())
        .await
        .unwrap();

    assert_eq!(result, b"legacy-read");
}

#[tokio::test]
async fn test_legacy_transact_carries_call_nonce_and_message() {
    let runtime = MockRuntime::spawn().await;
    let contract = EphemeralKeypair::generate();
    let contract_id = ContractId::new([7u8; 32]);

    let channel = connect(&runtime, StaticChain::with_key(contract.public_bytes()))
        .await
        .unwrap();
    let adapter = LegacyContractClient::new(Arc::new(channel), Arc::new(EchoCodec));

    let tx = adapter.transact(&contract_id, b"legacy-write").unwrap();

    let CommandPayload::Encrypted(envelope) =
        codec::decode_command_payload(&tx.payload).unwrap();
    let shared = crypto::derive_session_secret(&envelope.pubkey, contract.secret()).unwrap();
    let opened = crypto::decrypt(&envelope.data, shared.as_bytes(), &envelope.nonce).unwrap();

    // Call nonce prefix then the raw message
    assert_eq!(opened.len(), CALL_NONCE_LEN + b"legacy-write".len());
    assert_eq!(&opened[CALL_NONCE_LEN..], b"legacy-write");
}

#[tokio::test]
async fn test_adapter_preserves_channel_error_taxonomy() {
    use fabstir_enclave_client::ClientError;

    let runtime = MockRuntime::spawn().await;
    let contract = EphemeralKeypair::generate();
    let contract_id = ContractId::new([7u8; 32]);

    let channel = connect(&runtime, StaticChain::with_key(contract.public_bytes()))
        .await
        .unwrap();
    let adapter = LegacyContractClient::new(Arc::new(channel), Arc::new(EchoCodec));

    // The runtime's structured rejection must survive the adapter unchanged
    let result = adapter
        .call(&contract_id, b"fail", &test_certificate())
        .await;

    match result {
        Err(ClientError::RemoteProtocol(message)) => assert_eq!(message, "mock rejection"),
        other => panic!("expected RemoteProtocol, got {:?}", other.map(|_| ())),
    }
}
