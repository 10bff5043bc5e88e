//! # Chain Constants
//!
//! Wire-visible parameters every node must agree on. Changing any value
//! here is a consensus break.

use crate::entities::{CoinSymbol, U256};

/// The chain's base (reserve) coin.
pub const BASE_COIN: CoinSymbol =
    CoinSymbol::from_raw([b'N', b'O', b'A', b'H', 0, 0, 0, 0, 0, 0]);

/// Network identifier carried by every transaction.
pub const CHAIN_ID: u8 = 1;

/// Decimal places of the base coin: 1 NOAH = 10^18 qnoah.
pub const DECIMALS: u32 = 18;

/// qnoah charged per gas unit at gas price 1.
/// gas 10_000 * 10^15 = 10 NOAH for a standard staking transaction.
pub const COMMISSION_MULTIPLIER: u64 = 1_000_000_000_000_000;

/// Maximum encoded transaction size in bytes.
pub const MAX_TX_SIZE: usize = 6144;

/// Maximum kind-specific payload size in bytes.
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// Maximum coin-name length in bytes.
pub const MAX_COIN_NAME_BYTES: usize = 64;

/// Convert whole NOAH into qnoah.
pub fn to_smallest(noah: u64) -> U256 {
    U256::from(noah) * U256::exp10(DECIMALS as usize)
}

/// Smallest allowed total supply for a new coin: 1 NOAH.
pub fn min_coin_supply() -> U256 {
    to_smallest(1)
}

/// Smallest allowed initial reserve for a new coin: 1000 NOAH.
pub fn min_coin_reserve() -> U256 {
    to_smallest(1000)
}

/// Largest allowed total supply for any coin: 10^15 NOAH.
pub fn max_coin_supply() -> U256 {
    U256::exp10((15 + DECIMALS) as usize)
}
