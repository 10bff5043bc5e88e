//! # Transaction Signatures
//!
//! secp256k1 signing and sender recovery over Keccak-256 digests.
//!
//! Signatures travel as 65 bytes `r ‖ s ‖ v` with `v` the recovery id
//! (0 or 1). `s` must lie in the low half of the curve order; the high-S
//! twin of a valid signature is rejected so each transaction has exactly
//! one valid encoding.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature must be 65 bytes, got {0}")]
    WrongLength(usize),
    #[error("invalid recovery id {0}")]
    InvalidRecoveryId(u8),
    #[error("signature scalars out of range")]
    InvalidScalars,
    #[error("high-S signature rejected")]
    HighS,
    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Compute the Keccak-256 hash.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the 20-byte account address: the last 20 bytes of the Keccak-256
/// hash of the uncompressed public key (tag byte stripped).
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let digest = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

/// Sign `prehash` and serialize as `r ‖ s ‖ v`. The signature is already
/// low-S normalized by the signer.
pub fn sign_prehash(key: &SigningKey, prehash: &Hash) -> Vec<u8> {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(prehash)
        .expect("prehash is a valid 32-byte digest");
    let mut out = Vec::with_capacity(65);
    out.extend_from_slice(&signature.to_bytes());
    out.push(recovery_id.to_byte());
    out
}

/// Recover the signer's address from a 65-byte `r ‖ s ‖ v` signature.
pub fn recover_address(prehash: &Hash, raw_signature: &[u8]) -> Result<Address, SignatureError> {
    if raw_signature.len() != 65 {
        return Err(SignatureError::WrongLength(raw_signature.len()));
    }
    let v = raw_signature[64];
    let recovery_id = RecoveryId::from_byte(v).ok_or(SignatureError::InvalidRecoveryId(v))?;
    let signature = Signature::from_slice(&raw_signature[..64])
        .map_err(|_| SignatureError::InvalidScalars)?;
    if signature.normalize_s().is_some() {
        return Err(SignatureError::HighS);
    }

    let key = VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;
    Ok(address_of(&key))
}
