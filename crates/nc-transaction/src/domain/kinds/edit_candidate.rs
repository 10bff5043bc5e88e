//! # EditCandidate
//!
//! Rewrites a candidate's owner and reward addresses. Only the current
//! owner may edit; every other candidate field is untouched.

use super::{common_tags, insufficient_funds, plan_commission, settle_commission, TxKind};
use crate::domain::envelope::{Transaction, TxDecodeError, TxType};
use crate::domain::rlp::{self, RlpItem};
use nc_state::StateView;
use serde::{Deserialize, Serialize};
use shared_types::{code, Address, CandidatePubKey, Response, U256};

const GAS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCandidateData {
    pub pubkey: CandidatePubKey,
    pub reward_address: Address,
    pub owner_address: Address,
}

impl EditCandidateData {
    pub fn encode(&self) -> Vec<u8> {
        rlp::encode_list(&[
            rlp::encode_bytes(&self.pubkey),
            rlp::encode_bytes(&self.reward_address),
            rlp::encode_bytes(&self.owner_address),
        ])
    }

    pub fn decode(payload: &[u8]) -> Result<Self, TxDecodeError> {
        let item = rlp::decode(payload)?;
        let fields: &[RlpItem] = item.list(3)?;
        Ok(Self {
            pubkey: fields[0].fixed::<32>()?,
            reward_address: fields[1].fixed::<20>()?,
            owner_address: fields[2].fixed::<20>()?,
        })
    }
}

impl TxKind for EditCandidateData {
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

        if !is_check {
            settle_commission(state, &sender, &tx.gas_coin, &plan, reward_pool);
            state.edit_candidate(&self.pubkey, self.owner_address, self.reward_address);
            state.set_nonce(&sender, tx.nonce);
        }

        Response::success(common_tags(TxType::EditCandidate, &sender), self.gas())
    }
}

/// Candidate must exist and `sender` must be its current owner.
pub(crate) fn authorize_owner(
    sender: &Address,
    pubkey: &CandidatePubKey,
    state: &dyn StateView,
) -> Option<Response> {
    let candidate = match state.get_candidate(pubkey) {
        Some(candidate) => candidate,
        None => {
            return Some(Response::error(
                code::CANDIDATE_NOT_FOUND,
                format!("Candidate with such public key ({}) not found", hex::encode(pubkey)),
            ))
        }
    };

    if candidate.owner_address != *sender {
        return Some(Response::error(
            code::IS_NOT_OWNER_OF_CANDIDATE,
            "Sender is not an owner of candidate",
        ));
    }

    None
}
