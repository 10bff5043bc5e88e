//! # shared-types
//!
//! Core domain entities shared by every Noah Chain subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`, `CandidatePubKey`
//! - **Coins**: `CoinSymbol`, `Coin`, unit conversion helpers
//! - **Staking**: `Candidate`, `CandidateStatus`
//! - **Execution results**: `Response`, `KvPair`, stable response codes
//!
//! Amounts are `U256` (re-exported from `primitive-types`) denominated in
//! qnoah, the smallest indivisible unit: 1 NOAH = 10^18 qnoah.

pub mod constants;
pub mod entities;
pub mod response;

pub use constants::*;
pub use entities::*;
pub use response::*;
