//! # CreateCoin
//!
//! Issues a new coin: the sender funds the base-coin reserve and receives
//! the whole initial supply. Short tickers are scarce, so gas scales five
//! orders of magnitude with symbol length.

use super::{
    common_tags, insufficient_funds, plan_commission, settle_commission, TxKind,
};
use crate::domain::envelope::{Transaction, TxDecodeError, TxType};
use crate::domain::rlp::{self, RlpItem};
use nc_state::StateView;
use serde::{Deserialize, Serialize};
use shared_types::{
    code, max_coin_supply, min_coin_reserve, min_coin_supply, Address, CoinSymbol, KvPair,
    Response, BASE_COIN, MAX_COIN_NAME_BYTES, U256,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCoinData {
    pub name: String,
    pub symbol: CoinSymbol,
    pub initial_amount: U256,
    pub initial_reserve: U256,
    pub crr: u32,
}

impl CreateCoinData {
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode_list(&[
            rlp::encode_bytes(self.name.as_bytes()),
            rlp::encode_bytes(self.symbol.as_bytes()),
            rlp::encode_uint(self.initial_amount),
            rlp::encode_uint(self.initial_reserve),
            rlp::encode_uint(self.crr as u64),
        ])
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TxDecodeError> {
        let item = rlp::decode(payload)?;
        let fields: &[RlpItem] = item.list(5)?;
        Ok(Self {
            name: String::from_utf8(fields[0].bytes()?.to_vec())
                .map_err(|_| TxDecodeError::InvalidNameEncoding)?,
            symbol: CoinSymbol::from_raw(fields[1].fixed::<10>()?),
            initial_amount: fields[2].u256()?,
            initial_reserve: fields[3].u256()?,
            crr: fields[4].u32()?,
        })
    }
}

impl TxKind for CreateCoinData {
    fn basic_check(
        &self,
        _sender: &Address,
        _tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response> {
        if self.name.len() > MAX_COIN_NAME_BYTES {
            return Some(Response::error(
                code::INVALID_COIN_NAME,
                format!("Coin name is invalid. Allowed up to {MAX_COIN_NAME_BYTES} bytes."),
            ));
        }

        if !self.symbol.is_valid() {
            return Some(Response::error(
                code::INVALID_COIN_SYMBOL,
                "Invalid coin symbol. Should be ^[A-Z0-9]{3,10}$",
            ));
        }

        if state.coin_exists(&self.symbol) {
            return Some(Response::error(
                code::COIN_ALREADY_EXISTS,
                "Coin already exists",
            ));
        }

        if !(10..=100).contains(&self.crr) {
            return Some(Response::error(
                code::WRONG_CRR,
                "Constant Reserve Ratio should be between 10 and 100",
            ));
        }

        if self.initial_amount < min_coin_supply() || self.initial_amount > max_coin_supply() {
            return Some(Response::error(
                code::WRONG_COIN_SUPPLY,
                format!(
                    "Coin supply should be between {} and {}",
                    min_coin_supply(),
                    max_coin_supply(),
                ),
            ));
        }

        if self.initial_reserve < min_coin_reserve() {
            return Some(Response::error(
                code::WRONG_COIN_SUPPLY,
                format!(
                    "Coin reserve should be greater than or equal to {}",
                    min_coin_reserve(),
                ),
            ));
        }

        None
    }

    fn gas(&self) -> u64 {
        match self.symbol.ticker().len() {
            3 => 1_000_000_000,
            4 => 100_000_000,
            5 => 10_000_000,
            6 => 1_000_000,
            _ => 100_000,
        }
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

        if state.get_balance(&sender, &BASE_COIN) < self.initial_reserve {
            return insufficient_funds(&sender, self.initial_reserve, &BASE_COIN);
        }

        if tx.gas_coin.is_base_coin() {
            let total_cost = self.initial_reserve + plan.in_gas_coin;
            if state.get_balance(&sender, &BASE_COIN) < total_cost {
                return insufficient_funds(&sender, total_cost, &tx.gas_coin);
            }
        }

        if !is_check {
            settle_commission(state, &sender, &tx.gas_coin, &plan, reward_pool);
            state.sub_balance(&sender, &BASE_COIN, self.initial_reserve);
            state.create_coin(
                self.symbol,
                &self.name,
                self.initial_amount,
                self.crr,
                self.initial_reserve,
            );
            state.add_balance(&sender, &self.symbol, self.initial_amount);
            state.set_nonce(&sender, tx.nonce);
        }

        let mut tags = common_tags(TxType::CreateCoin, &sender);
        tags.push(KvPair::new(&b"tx.coin"[..], self.symbol.ticker()));
        Response::success(tags, self.gas())
    }
}
