use anchor_lang::prelude::*;

use crate::state::MasterChefConfig;

/// Common header carried by every event: which MasterChef instance the event
/// belongs to and who signed the instruction.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct EventHeader {
    pub master_chef: Pubkey,
    pub signer: Option<Pubkey>,
}

/// Emitted once when the `MasterChef` account is created.
#[event]
#[derive(Debug, Clone)]
pub struct MasterChefInitialized {
    pub header: EventHeader,
}

/// Emitted when the admin applies a configuration update.
#[event]
#[derive(Debug, Clone)]
pub struct AdminUpdated {
    pub header: EventHeader,
    /// The config as passed in; `None` fields were left unchanged.
    pub config: MasterChefConfig,
}

/// Emitted when a new staking pool is registered.
#[event]
#[derive(Debug, Clone)]
pub struct PoolAdded {
    pub header: EventHeader,
    pub reward_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub start_slot: u64,
    pub reward_per_slot: u64,
}

/// Emitted when a pool's emission rate changes. Accrual up to the emitting
/// slot was settled at `old_reward_per_slot`.
#[event]
#[derive(Debug, Clone)]
pub struct RewardPerSlotUpdated {
    pub header: EventHeader,
    pub lp_mint: Pubkey,
    pub old_reward_per_slot: u64,
    pub new_reward_per_slot: u64,
}

/// Emitted on every `deposit`, including zero-amount settles.
#[event]
#[derive(Debug, Clone)]
pub struct TokensDeposited {
    pub header: EventHeader,
    pub lp_mint: Pubkey,
    pub amount: u64,
}

/// Emitted on every `withdraw`.
#[event]
#[derive(Debug, Clone)]
pub struct TokensWithdrawn {
    pub header: EventHeader,
    pub lp_mint: Pubkey,
    pub amount: u64,
}

/// Emitted when a user claims their accrued reward. `amount` is the whole
/// number of reward tokens paid out; any fractional remainder stays accrued.
#[event]
#[derive(Debug, Clone)]
pub struct RewardClaimed {
    pub header: EventHeader,
    pub lp_mint: Pubkey,
    pub amount: u64,
}
