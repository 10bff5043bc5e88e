//! # nc-state
//!
//! The read/write surface transaction execution runs against.
//!
//! The [`StateView`] port is the contract: balances, nonces, coin records,
//! and candidate records. The production backend is a copy-on-write Merkle
//! trie that lives outside this core; `adapters::InMemoryState` is the
//! reference implementation used by tests and the genesis path.
//!
//! ## Invariants
//!
//! Mutating operations are infallible by contract: callers precheck every
//! debit. An underflowing `sub_*` or a skipped-nonce `set_nonce` means a
//! check/run mismatch upstream and aborts deterministically.

pub mod adapters;
pub mod ports;

pub use adapters::*;
pub use ports::*;
