//! # Transaction Processor
//!
//! The single entry point consensus calls for every delivered transaction:
//! decode, envelope checks, sender recovery, nonce check, then the kind
//! handler. Mempool admission uses the same path with `is_check = true`,
//! which runs every check but leaves state untouched.

use crate::domain::envelope::Transaction;
use crate::domain::kinds::TxData;
use nc_state::StateView;
use parking_lot::RwLock;
use shared_types::{
    code, Address, Hash, Response, CHAIN_ID, MAX_PAYLOAD_SIZE, MAX_TX_SIZE, U256,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Recovered senders keyed by signing hash, shared with the surrounding
/// node so mempool threads skip repeated ECDSA recovery. Execution itself
/// only ever probes and inserts.
pub type SenderCache = Arc<RwLock<HashMap<Hash, Address>>>;

/// Execute (or check) one raw transaction against `state`.
///
/// Every outcome is a [`Response`]; non-zero codes leave state and the
/// sender's nonce untouched. On success the reward pool grows by the
/// base-coin commission.
pub fn run_tx(
    state: &mut dyn StateView,
    is_check: bool,
    raw_tx: &[u8],
    reward_pool: &mut U256,
    block_height: u64,
    sender_cache: Option<&SenderCache>,
) -> Response {
    if raw_tx.len() > MAX_TX_SIZE {
        return Response::error(
            code::TX_TOO_LARGE,
            format!("Tx length is over {MAX_TX_SIZE} bytes"),
        );
    }

    let tx = match Transaction::decode(raw_tx) {
        Ok(tx) => tx,
        Err(err) => return Response::error(code::DECODE_ERROR, err.to_string()),
    };

    if tx.payload.len() > MAX_PAYLOAD_SIZE {
        return Response::error(
            code::TX_PAYLOAD_TOO_LARGE,
            format!("Tx payload length is over {MAX_PAYLOAD_SIZE} bytes"),
        );
    }

    if tx.chain_id != CHAIN_ID {
        return Response::error(code::WRONG_CHAIN_ID, "Wrong chain id");
    }

    if tx.signature_type != crate::domain::envelope::SignatureType::Single {
        return Response::error(
            code::DECODE_ERROR,
            "Multi-signature transactions are not executable by this core",
        );
    }

    let data = match TxData::decode(tx.tx_type, &tx.payload) {
        Ok(data) => data,
        Err(err) => return Response::error(code::DECODE_ERROR, err.to_string()),
    };

    let sender = match recover_sender_cached(&tx, sender_cache) {
        Ok(sender) => sender,
        Err(err) => return Response::error(code::DECODE_ERROR, err.to_string()),
    };

    let expected_nonce = state.get_nonce(&sender) + 1;
    if tx.nonce != expected_nonce {
        return Response::error(
            code::WRONG_NONCE,
            format!("Unexpected nonce. Expected: {expected_nonce}, got {}.", tx.nonce),
        );
    }

    debug!(
        "[nc-tx] running {:?} from {} nonce={} check={}",
        tx.tx_type,
        hex::encode(sender),
        tx.nonce,
        is_check,
    );

    data.run(sender, &tx, state, is_check, reward_pool, block_height)
}

fn recover_sender_cached(
    tx: &Transaction,
    cache: Option<&SenderCache>,
) -> Result<Address, crate::domain::crypto::SignatureError> {
    let hash = tx.signing_hash();
    if let Some(cache) = cache {
        if let Some(&sender) = cache.read().get(&hash) {
            return Ok(sender);
        }
        let sender = tx.recover_sender()?;
        cache.write().insert(hash, sender);
        return Ok(sender);
    }
    tx.recover_sender()
}
