//! # SetCandidateOnline / SetCandidateOffline
//!
//! Flips a candidate's availability. Owner-only; the two kinds share one
//! payload shape (just the candidate key) and the cheapest gas tier.

use super::edit_candidate::authorize_owner;
use super::{common_tags, insufficient_funds, plan_commission, settle_commission, TxKind};
use crate::domain::envelope::{Transaction, TxDecodeError, TxType};
use crate::domain::rlp::{self, RlpItem};
use nc_state::StateView;
use serde::{Deserialize, Serialize};
use shared_types::{Address, CandidatePubKey, CandidateStatus, Response, U256};

const GAS: u64 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateOnData {
    pub pubkey: CandidatePubKey,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateOffData {
    pub pubkey: CandidatePubKey,
}

fn encode_pubkey(pubkey: &CandidatePubKey) -> Vec<u8> {
    rlp::encode_list(&[rlp::encode_bytes(pubkey)])
}

fn decode_pubkey(payload: &[u8]) -> Result<CandidatePubKey, TxDecodeError> {
    let item = rlp::decode(payload)?;
    let fields: &[RlpItem] = item.list(1)?;
    Ok(fields[0].fixed::<32>()?)
}

impl SetCandidateOnData {
    pub fn encode(&self) -> Vec<u8> {
        encode_pubkey(&self.pubkey)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TxDecodeError> {
        Ok(Self {
            pubkey: decode_pubkey(payload)?,
        })
    }
}

impl SetCandidateOffData {
    pub fn encode(&self) -> Vec<u8> {
        encode_pubkey(&self.pubkey)
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TxDecodeError> {
        Ok(Self {
            pubkey: decode_pubkey(payload)?,
        })
    }
}

/// The shared execution path; only the target status differs.
#[allow(clippy::too_many_arguments)]
fn run_switch(
    pubkey: &CandidatePubKey,
    status: CandidateStatus,
    tx_type: TxType,
    sender: Address,
    tx: &Transaction,
    state: &mut dyn StateView,
    is_check: bool,
    reward_pool: &mut U256,
) -> Response {
    if let Some(response) = authorize_owner(&sender, pubkey, state) {
        return response;
    }

    let plan = match plan_commission(tx, GAS, state) {
        Ok(plan) => plan,
        Err(response) => return response,
    };

    if state.get_balance(&sender, &tx.gas_coin) < plan.in_gas_coin {
        return insufficient_funds(&sender, plan.in_gas_coin, &tx.gas_coin);
    }

    if !is_check {
        settle_commission(state, &sender, &tx.gas_coin, &plan, reward_pool);
        state.set_candidate_status(pubkey, status);
        state.set_nonce(&sender, tx.nonce);
    }

    Response::success(common_tags(tx_type, &sender), GAS)
}

impl TxKind for SetCandidateOnData {
    fn basic_check(
        &self,
        sender: &Address,
        _tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response> {
        authorize_owner(sender, &self.pubkey, state)
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
        run_switch(
            &self.pubkey,
            CandidateStatus::Online,
            TxType::SetCandidateOnline,
            sender,
            tx,
            state,
            is_check,
            reward_pool,
        )
    }
}

impl TxKind for SetCandidateOffData {
    fn basic_check(
        &self,
        sender: &Address,
        _tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response> {
        authorize_owner(sender, &self.pubkey, state)
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
        run_switch(
            &self.pubkey,
            CandidateStatus::Offline,
            TxType::SetCandidateOffline,
            sender,
            tx,
            state,
            is_check,
            reward_pool,
        )
    }
}
