//! # Execution Responses
//!
//! The processor reports every outcome, success or failure, as a `Response`
//! value: a stable numeric code, a human-readable log, indexing tags, and
//! gas accounting. Errors never travel out-of-band.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Stable numeric response codes. Part of the wire contract: indexers and
/// wallets match on these values across node versions.
pub mod code {
    pub const OK: u32 = 0;

    // Envelope
    pub const WRONG_NONCE: u32 = 101;
    pub const COIN_NOT_EXISTS: u32 = 102;
    pub const COIN_RESERVE_NOT_SUFFICIENT: u32 = 103;
    pub const TX_TOO_LARGE: u32 = 105;
    pub const DECODE_ERROR: u32 = 106;
    pub const INSUFFICIENT_FUNDS: u32 = 107;
    pub const TX_PAYLOAD_TOO_LARGE: u32 = 109;
    pub const WRONG_CHAIN_ID: u32 = 115;

    // Coin creation
    pub const COIN_ALREADY_EXISTS: u32 = 201;
    pub const WRONG_CRR: u32 = 202;
    pub const INVALID_COIN_SYMBOL: u32 = 203;
    pub const INVALID_COIN_NAME: u32 = 204;
    /// Covers both a supply outside the allowed range and an insufficient
    /// initial reserve. The overload is wire-stable; do not split.
    pub const WRONG_COIN_SUPPLY: u32 = 205;

    // Candidates
    pub const CANDIDATE_EXISTS: u32 = 401;
    pub const WRONG_COMMISSION: u32 = 402;
    pub const CANDIDATE_NOT_FOUND: u32 = 403;
    pub const IS_NOT_OWNER_OF_CANDIDATE: u32 = 406;
}

/// A key/value byte-string pair emitted for the indexer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    #[serde_as(as = "serde_with::hex::Hex")]
    pub key: Vec<u8>,
    #[serde_as(as = "serde_with::hex::Hex")]
    pub value: Vec<u8>,
}

impl KvPair {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Outcome of processing one transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// `code::OK` on success, a non-zero stable code otherwise.
    pub code: u32,
    /// Human-readable context for failures; empty on success.
    pub log: String,
    /// Indexing tags; only populated on success.
    pub tags: Vec<KvPair>,
    pub gas_used: u64,
    pub gas_wanted: u64,
}

impl Response {
    /// A failure response with no tags and no gas accounted.
    pub fn error(code: u32, log: impl Into<String>) -> Self {
        Self {
            code,
            log: log.into(),
            ..Default::default()
        }
    }

    /// A success response carrying tags and gas usage.
    pub fn success(tags: Vec<KvPair>, gas: u64) -> Self {
        Self {
            code: code::OK,
            log: String::new(),
            tags,
            gas_used: gas,
            gas_wanted: gas,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == code::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_has_no_tags() {
        let resp = Response::error(code::DECODE_ERROR, "bad payload");
        assert_eq!(resp.code, code::DECODE_ERROR);
        assert_eq!(resp.log, "bad payload");
        assert!(resp.tags.is_empty());
        assert_eq!(resp.gas_used, 0);
        assert!(!resp.is_ok());
    }

    #[test]
    fn test_success_response() {
        let resp = Response::success(vec![KvPair::new(&b"tx.type"[..], &b"05"[..])], 100);
        assert!(resp.is_ok());
        assert_eq!(resp.gas_used, resp.gas_wanted);
        assert_eq!(resp.tags.len(), 1);
    }
}
