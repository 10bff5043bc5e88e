//! # DeclareCandidacy
//!
//! Registers the sender as a validator candidate with an initial
//! self-stake. The declared `address` receives rewards; the sender stays
//! the owner.

use super::{
    common_tags, insufficient_funds, plan_commission, settle_commission, TxKind,
};
use crate::domain::envelope::{Transaction, TxDecodeError, TxType};
use crate::domain::rlp::{self, RlpItem};
use nc_state::StateView;
use serde::{Deserialize, Serialize};
use shared_types::{code, Address, CandidatePubKey, CoinSymbol, Response, U256};

const GAS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCandidacyData {
    /// Reward destination for the new candidate.
    pub address: Address,
    pub pubkey: CandidatePubKey,
    /// Validator fee share, percent.
    pub commission: u32,
    pub coin: CoinSymbol,
    pub stake: U256,
}

impl DeclareCandidacyData {
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode_list(&[
            rlp::encode_bytes(&self.address),
            rlp::encode_bytes(&self.pubkey),
            rlp::encode_uint(self.commission as u64),
            rlp::encode_bytes(self.coin.as_bytes()),
            rlp::encode_uint(self.stake),
        ])
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TxDecodeError> {
        let item = rlp::decode(payload)?;
        let fields: &[RlpItem] = item.list(5)?;
        Ok(Self {
            address: fields[0].fixed::<20>()?,
            pubkey: fields[1].fixed::<32>()?,
            commission: fields[2].u32()?,
            coin: CoinSymbol::from_raw(fields[3].fixed::<10>()?),
            stake: fields[4].u256()?,
        })
    }
}

impl TxKind for DeclareCandidacyData {
    fn basic_check(
        &self,
        _sender: &Address,
        _tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response> {
        if state.get_candidate(&self.pubkey).is_some() {
            return Some(Response::error(
                code::CANDIDATE_EXISTS,
                format!("Candidate with such public key ({}) already exists", hex::encode(self.pubkey)),
            ));
        }

        if self.commission > 100 {
            return Some(Response::error(
                code::WRONG_COMMISSION,
                "Commission should be between 0 and 100",
            ));
        }

        if !self.coin.is_base_coin() && !state.coin_exists(&self.coin) {
            return Some(Response::error(
                code::COIN_NOT_EXISTS,
                format!("Coin {} not exists", self.coin),
            ));
        }

        None
    }

    fn gas(&self) -> u64 {
        GAS
    }

    fn run(
        &self,
        sender: Address,
        tx: &Transaction,
        state: &mut dyn StateView,
        is_check: bool,
        reward_pool: &mut U256,
        _block_height: u64,
    ) -> Response {
        if let Some(response) = self.basic_check(&sender, tx, state) {
            return response;
        }

        let plan = match plan_commission(tx, self.gas(), state) {
            Ok(plan) => plan,
            Err(response) => return response,
        };

        if state.get_balance(&sender, &tx.gas_coin) < plan.in_gas_coin {
            return insufficient_funds(&sender, plan.in_gas_coin, &tx.gas_coin);
        }

        if state.get_balance(&sender, &self.coin) < self.stake {
            return insufficient_funds(&sender, self.stake, &self.coin);
        }

        if self.coin == tx.gas_coin {
            let total_cost = self.stake + plan.in_gas_coin;
            if state.get_balance(&sender, &self.coin) < total_cost {
                return insufficient_funds(&sender, total_cost, &self.coin);
            }
        }

        if !is_check {
            settle_commission(state, &sender, &tx.gas_coin, &plan, reward_pool);
            state.sub_balance(&sender, &self.coin, self.stake);
            state.create_candidate(
                sender,
                self.address,
                self.pubkey,
                self.commission,
                self.stake,
                self.coin,
                U256::zero(),
            );
            state.set_nonce(&sender, tx.nonce);
        }

        Response::success(common_tags(TxType::DeclareCandidacy, &sender), self.gas())
    }
}
