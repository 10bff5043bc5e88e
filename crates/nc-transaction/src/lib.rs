//! # nc-transaction
//!
//! The transaction-execution core: wire decoding, signature and nonce
//! checks, commission accounting, and the per-kind business logic that
//! mutates balances, coins, and candidate records.
//!
//! ## Flow
//!
//! ```text
//! raw bytes ──decode──→ Transaction ──recover──→ sender
//!     │                                             │
//!     └──── envelope checks (size/chain/nonce) ─────┤
//!                                                   ↓
//!                       TxData::run ──→ Response { code, log, tags, gas }
//! ```
//!
//! Every outcome is a [`shared_types::Response`] value; failures never
//! mutate state and never advance the nonce. Execution is synchronous and
//! single-threaded within a block (the only shared structure is the
//! optional sender cache, probed once per transaction).

pub mod domain;
pub mod service;

pub use domain::*;
pub use service::*;
