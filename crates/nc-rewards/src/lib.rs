//! # nc-rewards
//!
//! Deterministic block-reward schedule: 333 NOAH at genesis, stepping down
//! one NOAH every 200 000 blocks, floored at 1 NOAH, with a final payout of
//! 68 NOAH at the terminal block and nothing after.
//!
//! The schedule is a plain value constructed once at genesis; there is no
//! process-global state. Chains restarted from a snapshot pass the original
//! network start height so rewards keep their absolute positions.

use primitive_types::U256;
use shared_types::to_smallest;

/// Height of the final rewarded block, in absolute network coordinates.
pub const LAST_BLOCK: u64 = 43_702_611;

/// Whole-NOAH reward for block 1.
pub const FIRST_REWARD: u64 = 333;

/// Whole-NOAH reward paid exactly at `LAST_BLOCK`.
pub const LAST_REWARD: u64 = 68;

/// The reward steps down one NOAH every this many blocks.
pub const DECAY_INTERVAL: u64 = 200_000;

/// The reward schedule, fixed at genesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardSchedule {
    start_height: u64,
    before_genesis: U256,
}

impl RewardSchedule {
    /// Create a schedule anchored at `start_height` (0 for a fresh chain).
    /// The cumulative pre-genesis emission is computed here, once.
    pub fn new(start_height: u64) -> Self {
        let mut before_genesis = U256::zero();
        for h in 1..=start_height {
            before_genesis += absolute_reward(h);
        }
        Self {
            start_height,
            before_genesis,
        }
    }

    /// Base-coin emission for local block height `height`, in qnoah.
    pub fn reward_for_block(&self, height: u64) -> U256 {
        absolute_reward(height + self.start_height)
    }

    /// Total emission for absolute blocks `1..=start_height`.
    pub fn before_genesis(&self) -> U256 {
        self.before_genesis
    }

    pub fn start_height(&self) -> u64 {
        self.start_height
    }
}

fn absolute_reward(height: u64) -> U256 {
    if height > LAST_BLOCK {
        return U256::zero();
    }
    if height == LAST_BLOCK {
        return to_smallest(LAST_REWARD);
    }

    let decay = height / DECAY_INTERVAL;
    if decay >= FIRST_REWARD {
        return to_smallest(1);
    }
    to_smallest(FIRST_REWARD - decay)
}
