//! Confidential command construction

use fabstir_enclave_client::crypto::{self, EphemeralKeypair};
use fabstir_enclave_client::rpc::codec::{self, CommandPayload};
use fabstir_enclave_client::ContractId;

use super::mock_runtime::{MockRuntime, StaticChain};
use super::test_establish::connect;

#[tokio::test]
async fn test_command_seals_payload_for_contract_queue() {
    let runtime = MockRuntime::spawn().await;
    let contract = EphemeralKeypair::generate();
    let contract_id = ContractId::new([7u8; 32]);

    let channel = connect(&runtime, StaticChain::with_key(contract.public_bytes()))
        .await
        .unwrap();

    let tx = channel.command(&contract_id, b"increment").unwrap();

    // Topic is derived deterministically from the contract id
    assert_eq!(
        tx.topic,
        format!("enclave/contract/{}/command", "07".repeat(32))
    );

    // The contract can open the payload with its own side of the agreement
    let CommandPayload::Encrypted(envelope) =
        codec::decode_command_payload(&tx.payload).unwrap();
    assert_eq!(envelope.pubkey, channel.public_key());

    let shared = crypto::derive_session_secret(&envelope.pubkey, contract.secret()).unwrap();
    let plaintext = crypto::decrypt(&envelope.data, shared.as_bytes(), &envelope.nonce).unwrap();
    assert_eq!(plaintext, b"increment");
}

#[tokio::test]
async fn test_commands_reuse_the_session_nonce() {
    let runtime = MockRuntime::spawn().await;
    let contract = EphemeralKeypair::generate();
    let contract_id = ContractId::new([7u8; 32]);

    let channel = connect(&runtime, StaticChain::with_key(contract.public_bytes()))
        .await
        .unwrap();

    let first = channel.command(&contract_id, b"a").unwrap();
    let second = channel.command(&contract_id, b"b").unwrap();

    let CommandPayload::Encrypted(first_env) =
        codec::decode_command_payload(&first.payload).unwrap();
    let CommandPayload::Encrypted(second_env) =
        codec::decode_command_payload(&second.payload).unwrap();

    assert_eq!(first_env.nonce, second_env.nonce);
}
