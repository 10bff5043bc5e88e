//! # State View Port
//!
//! The abstract surface transaction handlers consume. Implementations back
//! it with the versioned trie store; tests use the in-memory adapter.

use shared_types::{Address, Candidate, CandidatePubKey, CandidateStatus, Coin, CoinSymbol, U256};

/// Mutable view over chain state for one block's execution.
///
/// Reads of absent entries return zero/`None`. Mutations are infallible:
/// the execution pipeline prechecks every debit, so an underflow here is a
/// bug, not an error condition, and implementations must abort rather than
/// saturate.
pub trait StateView {
    // === Balances ===

    /// Balance of `coin` held by `address`; zero if absent.
    fn get_balance(&self, address: &Address, coin: &CoinSymbol) -> U256;

    fn add_balance(&mut self, address: &Address, coin: &CoinSymbol, amount: U256);

    /// Precondition: `get_balance(address, coin) >= amount`.
    fn sub_balance(&mut self, address: &Address, coin: &CoinSymbol, amount: U256);

    // === Nonces ===

    /// Count of transactions already executed for `address`; zero if absent.
    fn get_nonce(&self, address: &Address) -> u64;

    /// Precondition: `nonce == get_nonce(address) + 1`.
    fn set_nonce(&mut self, address: &Address, nonce: u64);

    // === Coins ===

    fn coin_exists(&self, symbol: &CoinSymbol) -> bool;

    fn get_coin(&self, symbol: &CoinSymbol) -> Option<Coin>;

    /// Precondition: `!coin_exists(symbol)`.
    fn create_coin(&mut self, symbol: CoinSymbol, name: &str, volume: U256, crr: u32, reserve: U256);

    fn add_coin_reserve(&mut self, symbol: &CoinSymbol, amount: U256);

    /// Precondition: the coin's reserve covers `amount`.
    fn sub_coin_reserve(&mut self, symbol: &CoinSymbol, amount: U256);

    fn add_coin_volume(&mut self, symbol: &CoinSymbol, amount: U256);

    /// Precondition: the coin's volume covers `amount`.
    fn sub_coin_volume(&mut self, symbol: &CoinSymbol, amount: U256);

    // === Candidates & validators ===

    fn get_candidate(&self, pubkey: &CandidatePubKey) -> Option<Candidate>;

    /// Precondition: no candidate with `pubkey` exists. New candidates
    /// start [`CandidateStatus::Offline`].
    #[allow(clippy::too_many_arguments)]
    fn create_candidate(
        &mut self,
        owner_address: Address,
        reward_address: Address,
        pubkey: CandidatePubKey,
        commission: u32,
        stake: U256,
        coin: CoinSymbol,
        total_base_stake: U256,
    );

    /// Registers an active validator record for `pubkey`. Selection of the
    /// validator set happens outside this core.
    fn create_validator(
        &mut self,
        reward_address: Address,
        pubkey: CandidatePubKey,
        commission: u32,
        stake: U256,
        coin: CoinSymbol,
        total_base_stake: U256,
    );

    /// Precondition: the candidate exists.
    fn set_candidate_status(&mut self, pubkey: &CandidatePubKey, status: CandidateStatus);

    /// Rewrites owner and reward addresses; every other field is untouched.
    /// Precondition: the candidate exists.
    fn edit_candidate(
        &mut self,
        pubkey: &CandidatePubKey,
        new_owner: Address,
        new_reward: Address,
    );
}
