//! # Core Domain Entities
//!
//! Identity, coin, and staking records shared across subsystems.

use serde::{Deserialize, Serialize};

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte account address (last 20 bytes of keccak(pubkey)).
pub type Address = [u8; 20];

/// A 32-byte validator-candidate public key.
pub type CandidatePubKey = [u8; 32];

// =============================================================================
// COINS
// =============================================================================

/// A fixed 10-byte coin ticker: ASCII uppercase letters and digits,
/// 3 to 10 characters, unused trailing bytes zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoinSymbol([u8; 10]);

impl CoinSymbol {
    /// Build a symbol from a ticker string, zero-padding to 10 bytes.
    /// Oversized input is truncated; validity is checked separately with
    /// [`CoinSymbol::is_valid`].
    pub fn from_ticker(ticker: &str) -> Self {
        let mut raw = [0u8; 10];
        let bytes = ticker.as_bytes();
        let n = bytes.len().min(10);
        raw[..n].copy_from_slice(&bytes[..n]);
        Self(raw)
    }

    pub const fn from_raw(raw: [u8; 10]) -> Self {
        Self(raw)
    }

    pub const fn as_bytes(&self) -> &[u8; 10] {
        &self.0
    }

    /// The ticker without zero padding.
    pub fn ticker(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(10);
        // Symbols are written by from_ticker from &str input or validated on
        // the wire path, so the prefix is always ASCII.
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }

    /// Checks the `[A-Z0-9]{3,10}` shape: 3..=10 significant bytes, all
    /// uppercase letters or digits, and nothing but zeros after them.
    pub fn is_valid(&self) -> bool {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(10);
        if !(3..=10).contains(&end) {
            return false;
        }
        if !self.0[..end]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return false;
        }
        self.0[end..].iter().all(|&b| b == 0)
    }

    pub fn is_base_coin(&self) -> bool {
        *self == crate::constants::BASE_COIN
    }
}

impl std::fmt::Display for CoinSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ticker())
    }
}

impl std::fmt::Debug for CoinSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoinSymbol({})", self.ticker())
    }
}

/// A user-issued coin backed by a base-coin reserve.
///
/// Invariants: `volume >= 1 NOAH`, `reserve >= 0`, `crr` in 10..=100 and
/// immutable after creation. The base coin itself has no record; its volume
/// is tracked implicitly by balances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub symbol: CoinSymbol,
    /// Human-readable name, up to 64 bytes of arbitrary UTF-8.
    pub name: String,
    /// Total supply in qnoah-scale smallest units.
    pub volume: U256,
    /// Base-coin reserve backing the supply.
    pub reserve: U256,
    /// Constant reserve ratio, percent.
    pub crr: u32,
}

// =============================================================================
// STAKING
// =============================================================================

/// Candidate activity status. New candidates start Offline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CandidateStatus {
    Offline = 0x01,
    Online = 0x02,
}

/// An account registered as a potential validator, keyed by `pubkey`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub pubkey: CandidatePubKey,
    /// Controls candidate management operations.
    pub owner_address: Address,
    /// Receives validator rewards.
    pub reward_address: Address,
    /// Validator fee share, percent, 0..=100.
    pub commission: u32,
    /// Coin of the initial self-stake.
    pub coin: CoinSymbol,
    /// Initial self-stake amount.
    pub stake: U256,
    /// Aggregate stake across all delegators, normalized to base coin.
    pub total_base_stake: U256,
    pub status: CandidateStatus,
}

/// An active validator slot derived from a candidate. Which candidates
/// occupy slots is decided by the validator scheduler, outside this core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub reward_address: Address,
    pub pubkey: CandidatePubKey,
    pub commission: u32,
    pub coin: CoinSymbol,
    pub stake: U256,
    pub total_base_stake: U256,
}
