//! In-memory implementation of [`StateView`] for tests and genesis assembly.

use crate::ports::StateView;
use shared_types::{
    Address, Candidate, CandidatePubKey, CandidateStatus, Coin, CoinSymbol, Validator, U256,
};
use std::collections::HashMap;
use tracing::debug;

/// Plain-map state backend. No trie, no versioning; the processor prechecks
/// every mutation, so this adapter enforces invariants by aborting.
#[derive(Debug, Default)]
pub struct InMemoryState {
    balances: HashMap<(Address, CoinSymbol), U256>,
    nonces: HashMap<Address, u64>,
    coins: HashMap<CoinSymbol, Coin>,
    candidates: HashMap<CandidatePubKey, Candidate>,
    validators: Vec<Validator>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validators registered so far, in creation order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    fn coin_mut(&mut self, symbol: &CoinSymbol) -> &mut Coin {
        self.coins
            .get_mut(symbol)
            .unwrap_or_else(|| panic!("unknown coin {symbol}"))
    }

    fn candidate_mut(&mut self, pubkey: &CandidatePubKey) -> &mut Candidate {
        self.candidates
            .get_mut(pubkey)
            .unwrap_or_else(|| panic!("unknown candidate {}", hex::encode(pubkey)))
    }
}

impl StateView for InMemoryState {
    fn get_balance(&self, address: &Address, coin: &CoinSymbol) -> U256 {
        self.balances
            .get(&(*address, *coin))
            .copied()
            .unwrap_or_default()
    }

    fn add_balance(&mut self, address: &Address, coin: &CoinSymbol, amount: U256) {
        let entry = self.balances.entry((*address, *coin)).or_default();
        *entry += amount;
    }

    fn sub_balance(&mut self, address: &Address, coin: &CoinSymbol, amount: U256) {
        let balance = self.get_balance(address, coin);
        assert!(
            balance >= amount,
            "balance underflow: {} holds {balance} {coin}, debit {amount}",
            hex::encode(address),
        );
        self.balances.insert((*address, *coin), balance - amount);
    }

    fn get_nonce(&self, address: &Address) -> u64 {
        self.nonces.get(address).copied().unwrap_or_default()
    }

    fn set_nonce(&mut self, address: &Address, nonce: u64) {
        let prev = self.get_nonce(address);
        assert!(
            nonce == prev + 1,
            "nonce skip: {} at {prev}, set to {nonce}",
            hex::encode(address),
        );
        self.nonces.insert(*address, nonce);
    }

    fn coin_exists(&self, symbol: &CoinSymbol) -> bool {
        self.coins.contains_key(symbol)
    }

    fn get_coin(&self, symbol: &CoinSymbol) -> Option<Coin> {
        self.coins.get(symbol).cloned()
    }

    fn create_coin(
        &mut self,
        symbol: CoinSymbol,
        name: &str,
        volume: U256,
        crr: u32,
        reserve: U256,
    ) {
        assert!(!self.coins.contains_key(&symbol), "coin {symbol} exists");
        debug!("[nc-state] creating coin {symbol} volume={volume} reserve={reserve} crr={crr}");
        self.coins.insert(
            symbol,
            Coin {
                symbol,
                name: name.to_owned(),
                volume,
                reserve,
                crr,
            },
        );
    }

    fn add_coin_reserve(&mut self, symbol: &CoinSymbol, amount: U256) {
        let coin = self.coin_mut(symbol);
        coin.reserve += amount;
    }

    fn sub_coin_reserve(&mut self, symbol: &CoinSymbol, amount: U256) {
        let coin = self.coin_mut(symbol);
        assert!(
            coin.reserve >= amount,
            "reserve underflow on {symbol}: {} - {amount}",
            coin.reserve,
        );
        coin.reserve -= amount;
    }

    fn add_coin_volume(&mut self, symbol: &CoinSymbol, amount: U256) {
        let coin = self.coin_mut(symbol);
        coin.volume += amount;
    }

    fn sub_coin_volume(&mut self, symbol: &CoinSymbol, amount: U256) {
        let coin = self.coin_mut(symbol);
        assert!(
            coin.volume >= amount,
            "volume underflow on {symbol}: {} - {amount}",
            coin.volume,
        );
        coin.volume -= amount;
    }

    fn get_candidate(&self, pubkey: &CandidatePubKey) -> Option<Candidate> {
        self.candidates.get(pubkey).cloned()
    }

    fn create_candidate(
        &mut self,
        owner_address: Address,
        reward_address: Address,
        pubkey: CandidatePubKey,
        commission: u32,
        stake: U256,
        coin: CoinSymbol,
        total_base_stake: U256,
    ) {
        assert!(
            !self.candidates.contains_key(&pubkey),
            "candidate {} exists",
            hex::encode(pubkey),
        );
        debug!(
            "[nc-state] creating candidate {} owner={}",
            hex::encode(pubkey),
            hex::encode(owner_address),
        );
        self.candidates.insert(
            pubkey,
            Candidate {
                pubkey,
                owner_address,
                reward_address,
                commission,
                coin,
                stake,
                total_base_stake,
                status: CandidateStatus::Offline,
            },
        );
    }

    fn create_validator(
        &mut self,
        reward_address: Address,
        pubkey: CandidatePubKey,
        commission: u32,
        stake: U256,
        coin: CoinSymbol,
        total_base_stake: U256,
    ) {
        self.validators.push(Validator {
            reward_address,
            pubkey,
            commission,
            coin,
            stake,
            total_base_stake,
        });
    }

    fn set_candidate_status(&mut self, pubkey: &CandidatePubKey, status: CandidateStatus) {
        self.candidate_mut(pubkey).status = status;
    }

    fn edit_candidate(&mut self, pubkey: &CandidatePubKey, new_owner: Address, new_reward: Address) {
        let candidate = self.candidate_mut(pubkey);
        candidate.owner_address = new_owner;
        candidate.reward_address = new_reward;
    }
}
