//! # Transaction Kinds
//!
//! One handler per transaction kind, all implementing the same contract:
//! cheap validation (`basic_check`), a fixed gas cost (`gas`), and the full
//! execution pipeline (`run`). The commission leg shared by every kind —
//! pricing the fee in the gas coin via the bonding curve and settling it
//! against the reserve — lives here so the handlers only add their own
//! checks and mutations.

pub mod create_coin;
pub mod declare_candidacy;
pub mod edit_candidate;
pub mod switch_candidate_status;

pub use create_coin::*;
pub use declare_candidacy::*;
pub use edit_candidate::*;
pub use switch_candidate_status::*;

use crate::domain::envelope::{Transaction, TxDecodeError, TxType};
use nc_formula::sale_amount;
use nc_state::StateView;
use shared_types::{code, Address, CoinSymbol, KvPair, Response, COMMISSION_MULTIPLIER, U256};

/// The per-kind execution contract.
pub trait TxKind {
    /// Stateless and cheap state-dependent validation. `Some(response)`
    /// rejects the transaction before any gas accounting; no mutations.
    fn basic_check(
        &self,
        sender: &Address,
        tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response>;

    /// Kind-specific gas units.
    fn gas(&self) -> u64;

    /// Full execution: checks, then mutations unless `is_check`.
    fn run(
        &self,
        sender: Address,
        tx: &Transaction,
        state: &mut dyn StateView,
        is_check: bool,
        reward_pool: &mut U256,
        block_height: u64,
    ) -> Response;
}

/// Decoded kind-specific payload, tagged by the wire type code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxData {
    CreateCoin(CreateCoinData),
    DeclareCandidacy(DeclareCandidacyData),
    EditCandidate(EditCandidateData),
    SetCandidateOnline(SetCandidateOnData),
    SetCandidateOffline(SetCandidateOffData),
}

impl TxData {
    /// Decode the payload for the given type code.
    pub fn decode(tx_type: TxType, payload: &[u8]) -> Result<Self, TxDecodeError> {
        Ok(match tx_type {
            TxType::CreateCoin => Self::CreateCoin(CreateCoinData::decode(payload)?),
            TxType::DeclareCandidacy => {
                Self::DeclareCandidacy(DeclareCandidacyData::decode(payload)?)
            }
            TxType::EditCandidate => Self::EditCandidate(EditCandidateData::decode(payload)?),
            TxType::SetCandidateOnline => {
                Self::SetCandidateOnline(SetCandidateOnData::decode(payload)?)
            }
            TxType::SetCandidateOffline => {
                Self::SetCandidateOffline(SetCandidateOffData::decode(payload)?)
            }
        })
    }

    fn as_kind(&self) -> &dyn TxKind {
        match self {
            Self::CreateCoin(data) => data,
            Self::DeclareCandidacy(data) => data,
            Self::EditCandidate(data) => data,
            Self::SetCandidateOnline(data) => data,
            Self::SetCandidateOffline(data) => data,
        }
    }

    pub fn gas(&self) -> u64 {
        self.as_kind().gas()
    }

    pub fn basic_check(
        &self,
        sender: &Address,
        tx: &Transaction,
        state: &dyn StateView,
    ) -> Option<Response> {
        self.as_kind().basic_check(sender, tx, state)
    }

    pub fn run(
        &self,
        sender: Address,
        tx: &Transaction,
        state: &mut dyn StateView,
        is_check: bool,
        reward_pool: &mut U256,
        block_height: u64,
    ) -> Response {
        self.as_kind()
            .run(sender, tx, state, is_check, reward_pool, block_height)
    }
}

// =============================================================================
// COMMISSION PIPELINE
// =============================================================================

/// Commission priced for one transaction, before settlement.
pub(crate) struct CommissionPlan {
    /// Base-coin denomination; what the reward pool receives.
    pub base: U256,
    /// Gas-coin denomination; what the sender's balance is debited.
    pub in_gas_coin: U256,
}

/// Price the commission in the transaction's gas coin. For a non-base gas
/// coin the base-coin fee is carved out of the coin's reserve, so the
/// reserve must cover it and the burned coin amount comes off the curve.
pub(crate) fn plan_commission(
    tx: &Transaction,
    gas: u64,
    state: &dyn StateView,
) -> Result<CommissionPlan, Response> {
    let base = U256::from(tx.gas_price) * U256::from(gas) * U256::from(COMMISSION_MULTIPLIER);
    if tx.gas_coin.is_base_coin() {
        return Ok(CommissionPlan {
            base,
            in_gas_coin: base,
        });
    }

    let coin = state.get_coin(&tx.gas_coin).ok_or_else(|| {
        Response::error(
            code::COIN_NOT_EXISTS,
            format!("Coin {} not exists", tx.gas_coin),
        )
    })?;
    if coin.reserve < base {
        return Err(Response::error(
            code::COIN_RESERVE_NOT_SUFFICIENT,
            format!(
                "Gas coin reserve balance is not sufficient for transaction. Has: {}, required {}",
                coin.reserve, base,
            ),
        ));
    }

    Ok(CommissionPlan {
        base,
        in_gas_coin: sale_amount(coin.volume, coin.reserve, coin.crr, base),
    })
}

/// Settle a priced commission: feed the reward pool, shrink a non-base gas
/// coin's curve by the carved-out reserve and burned volume, and debit the
/// sender. Callers have already verified the sender's balance.
pub(crate) fn settle_commission(
    state: &mut dyn StateView,
    sender: &Address,
    gas_coin: &CoinSymbol,
    plan: &CommissionPlan,
    reward_pool: &mut U256,
) {
    *reward_pool += plan.base;
    if !gas_coin.is_base_coin() {
        state.sub_coin_reserve(gas_coin, plan.base);
        state.sub_coin_volume(gas_coin, plan.in_gas_coin);
    }
    state.sub_balance(sender, gas_coin, plan.in_gas_coin);
}

/// The failure every kind returns when the sender cannot pay `wanted` of
/// `coin`.
pub(crate) fn insufficient_funds(sender: &Address, wanted: U256, coin: &CoinSymbol) -> Response {
    Response::error(
        code::INSUFFICIENT_FUNDS,
        format!(
            "Insufficient funds for sender account: {}. Wanted {wanted} {coin}",
            hex::encode(sender),
        ),
    )
}

/// Tags shared by every successful transaction.
pub(crate) fn common_tags(tx_type: TxType, sender: &Address) -> Vec<KvPair> {
    vec![
        KvPair::new(&b"tx.type"[..], hex::encode([tx_type.byte()])),
        KvPair::new(&b"tx.from"[..], hex::encode(sender)),
    ]
}
