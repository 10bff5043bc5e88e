//! # integration-tests
//!
//! End-to-end scenarios driving the execution core through its public
//! surface: real keys, wire-encoded transactions, and the in-memory state
//! adapter standing in for the trie backend.

use k256::ecdsa::SigningKey;
use nc_transaction::{address_of, SignatureType, Transaction, TxType};
use shared_types::{Address, CoinSymbol, CHAIN_ID};

#[cfg(test)]
mod scenarios;

/// A funded test identity.
pub struct TestAccount {
    pub key: SigningKey,
    pub address: Address,
}

impl TestAccount {
    pub fn generate() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let address = address_of(key.verifying_key());
        Self { key, address }
    }
}

/// Build, sign, and wire-encode a transaction at gas price 1.
pub fn signed_tx(
    account: &TestAccount,
    nonce: u64,
    gas_coin: CoinSymbol,
    tx_type: TxType,
    payload: Vec<u8>,
) -> Vec<u8> {
    let mut tx = Transaction {
        nonce,
        chain_id: CHAIN_ID,
        gas_price: 1,
        gas_coin,
        tx_type,
        payload,
        signature_type: SignatureType::Single,
        signature: Vec::new(),
    };
    tx.sign(&account.key);
    tx.encode()
}
