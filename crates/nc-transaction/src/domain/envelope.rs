//! # Transaction Envelope
//!
//! The canonically encoded wire transaction: RLP list of
//! `[nonce, chain_id, gas_price, gas_coin, type, payload, signature_type,
//! signature]` in exactly that order. The signing digest is the Keccak-256
//! hash of the same list with both signature fields cleared, so the
//! signature covers every executable field.

use crate::domain::crypto::{self, SignatureError};
use crate::domain::rlp::{self, RlpError};
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use shared_types::{Address, CoinSymbol, Hash};
use thiserror::Error;

/// Transaction kind discriminants. Wire contract: these byte values must
/// match across the network; gaps belong to kinds handled elsewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    CreateCoin = 0x05,
    DeclareCandidacy = 0x06,
    SetCandidateOnline = 0x0A,
    SetCandidateOffline = 0x0B,
    EditCandidate = 0x0E,
}

impl TxType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x05 => Some(Self::CreateCoin),
            0x06 => Some(Self::DeclareCandidacy),
            0x0A => Some(Self::SetCandidateOnline),
            0x0B => Some(Self::SetCandidateOffline),
            0x0E => Some(Self::EditCandidate),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// How `signature` is to be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum SignatureType {
    Single = 0x01,
    Multi = 0x02,
}

impl SignatureType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Single),
            0x02 => Some(Self::Multi),
            _ => None,
        }
    }

    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// Failures turning wire bytes into a [`Transaction`] or its payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxDecodeError {
    #[error(transparent)]
    Rlp(#[from] RlpError),
    #[error("unknown transaction type 0x{0:02x}")]
    UnknownTxType(u8),
    #[error("unknown signature type 0x{0:02x}")]
    UnknownSignatureType(u8),
    #[error("coin name is not valid UTF-8")]
    InvalidNameEncoding,
}

/// A wire transaction. `payload` is the RLP encoding of the kind-specific
/// data struct, decoded separately by type code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub nonce: u64,
    pub chain_id: u8,
    pub gas_price: u64,
    /// Coin the commission is paid in.
    pub gas_coin: CoinSymbol,
    pub tx_type: TxType,
    pub payload: Vec<u8>,
    pub signature_type: SignatureType,
    /// 65-byte `r ‖ s ‖ v` for [`SignatureType::Single`]; empty until signed.
    pub signature: Vec<u8>,
}

impl Transaction {
    /// Canonical wire encoding of the full transaction.
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode_list(&[
            rlp::encode_uint(self.nonce),
            rlp::encode_uint(self.chain_id as u64),
            rlp::encode_uint(self.gas_price),
            rlp::encode_bytes(self.gas_coin.as_bytes()),
            rlp::encode_uint(self.tx_type.byte() as u64),
            rlp::encode_bytes(&self.payload),
            rlp::encode_uint(self.signature_type.byte() as u64),
            rlp::encode_bytes(&self.signature),
        ])
    }

    /// Strict decode of the full wire encoding.
    pub fn decode(raw: &[u8]) -> Result<Self, TxDecodeError> {
        let item = rlp::decode(raw)?;
        let fields = item.list(8)?;

        let type_byte = fields[4].u8()?;
        let tx_type = TxType::from_byte(type_byte).ok_or(TxDecodeError::UnknownTxType(type_byte))?;
        let sig_type_byte = fields[6].u8()?;
        let signature_type = SignatureType::from_byte(sig_type_byte)
            .ok_or(TxDecodeError::UnknownSignatureType(sig_type_byte))?;

        Ok(Self {
            nonce: fields[0].u64()?,
            chain_id: fields[1].u8()?,
            gas_price: fields[2].u64()?,
            gas_coin: CoinSymbol::from_raw(fields[3].fixed::<10>()?),
            tx_type,
            payload: fields[5].bytes()?.to_vec(),
            signature_type,
            signature: fields[7].bytes()?.to_vec(),
        })
    }

    /// Digest the signature commits to: the envelope with signature fields
    /// cleared.
    pub fn signing_hash(&self) -> Hash {
        let unsigned = rlp::encode_list(&[
            rlp::encode_uint(self.nonce),
            rlp::encode_uint(self.chain_id as u64),
            rlp::encode_uint(self.gas_price),
            rlp::encode_bytes(self.gas_coin.as_bytes()),
            rlp::encode_uint(self.tx_type.byte() as u64),
            rlp::encode_bytes(&self.payload),
        ]);
        crypto::keccak256(&unsigned)
    }

    /// Sign in place with a single secp256k1 key.
    pub fn sign(&mut self, key: &SigningKey) {
        self.signature_type = SignatureType::Single;
        self.signature = crypto::sign_prehash(key, &self.signing_hash());
    }

    /// Recover the sender address from the signature.
    pub fn recover_sender(&self) -> Result<Address, SignatureError> {
        crypto::recover_address(&self.signing_hash(), &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::BASE_COIN;

    fn sample_tx() -> Transaction {
        Transaction {
            nonce: 1,
            chain_id: shared_types::CHAIN_ID,
            gas_price: 1,
            gas_coin: BASE_COIN,
            tx_type: TxType::SetCandidateOnline,
            payload: rlp::encode_list(&[rlp::encode_bytes(&[0x11; 32])]),
            signature_type: SignatureType::Single,
            signature: Vec::new(),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut tx = sample_tx();
        tx.sign(&SigningKey::random(&mut rand::thread_rng()));

        let decoded = Transaction::decode(&tx.encode()).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn test_signing_hash_ignores_signature() {
        let mut tx = sample_tx();
        let before = tx.signing_hash();
        tx.sign(&SigningKey::random(&mut rand::thread_rng()));
        assert_eq!(tx.signing_hash(), before);
    }

    #[test]
    fn test_signing_hash_covers_every_field() {
        let tx = sample_tx();
        let mut other = tx.clone();
        other.gas_price = 2;
        assert_ne!(tx.signing_hash(), other.signing_hash());

        let mut other = tx.clone();
        other.payload = rlp::encode_list(&[rlp::encode_bytes(&[0x22; 32])]);
        assert_ne!(tx.signing_hash(), other.signing_hash());
    }

    #[test]
    fn test_sender_recovery() {
        let key = SigningKey::random(&mut rand::thread_rng());
        let mut tx = sample_tx();
        tx.sign(&key);

        let sender = tx.recover_sender().unwrap();
        assert_eq!(sender, crypto::address_of(key.verifying_key()));

        // A tampered field breaks recovery to the original sender.
        tx.nonce = 2;
        assert_ne!(tx.recover_sender().ok(), Some(sender));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let mut tx = sample_tx();
        tx.sign(&SigningKey::random(&mut rand::thread_rng()));
        let mut fields: Vec<Vec<u8>> = vec![
            rlp::encode_uint(tx.nonce),
            rlp::encode_uint(tx.chain_id as u64),
            rlp::encode_uint(tx.gas_price),
            rlp::encode_bytes(tx.gas_coin.as_bytes()),
            rlp::encode_uint(0x7Fu64),
            rlp::encode_bytes(&tx.payload),
            rlp::encode_uint(tx.signature_type.byte() as u64),
            rlp::encode_bytes(&tx.signature),
        ];
        let raw = rlp::encode_list(&fields);
        assert_eq!(
            Transaction::decode(&raw),
            Err(TxDecodeError::UnknownTxType(0x7F))
        );

        // Wrong arity is rejected outright.
        fields.pop();
        let raw = rlp::encode_list(&fields);
        assert!(matches!(
            Transaction::decode(&raw),
            Err(TxDecodeError::Rlp(RlpError::WrongArity { .. }))
        ));
    }
}
