//! # MasterChef Staking Program
//!
//! An Anchor program implementing the classic MasterChef staking pattern on
//! Solana. Users stake LP tokens into program-controlled vaults and accrue a
//! reward token at a per-slot rate configured by the admin.
//!
//! ## Key Concepts
//!
//! - **MasterChef account:** A single [`MasterChef`] account holds the admin
//!   key and a fixed array of [`state::PoolInfo`] slots. It is created once via
//!   [`initialize`] and administered through `set_admin`, `add_pool` and
//!   `update_reward_per_slot`.
//!
//! - **Per-pool vaults:** Each pool owns two SPL token vaults (one for the
//!   staked LP token, one for the reward token). Both vaults and their
//!   authorities are PDAs derived from the LP mint and the MasterChef key, so
//!   the program can sign outbound transfers without any private key.
//!
//! - **Reward accrual:** Rewards accrue lazily. Every balance-changing
//!   instruction first settles the pool's `acc_reward_per_share` accumulator
//!   up to the current slot and the caller's pending share into their
//!   [`state::UserInfo`] account. The accumulator uses I80F48 fixed-point math
//!   to avoid precision loss at small `reward_per_slot / lp_supply` ratios.
//!
//! - **Event-Driven:** Every instruction emits an event (e.g.
//!   [`TokensDeposited`], [`RewardClaimed`]) so off-chain services such as
//!   `masterchef-client` can follow pool state from transaction logs.
//!
//! ## Modules
//!
//! - [`instructions`]: The business logic for each on-chain instruction.
//! - [`state`]: Account data structures and the reward accrual math.
//! - [`events`]: All on-chain events emitted by the program.
//! - [`errors`]: Custom errors for specific failure modes.

#![allow(deprecated)]
#![allow(unexpected_cfgs)]
#![allow(elided_lifetimes_in_paths)]

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
use errors::*;
use events::*;
use state::*;

declare_id!("3SMsuh9WkZvecNfR5un2J4XdanzoAcuTrFQLZC4xmeLw");

/// # MasterChef Instruction Interface
///
/// Each public function in this module corresponds to a callable on-chain
/// instruction. The detailed logic lives in the [`instructions`] module.
#[program]
pub mod masterchef_program {
    use super::*;

    // --- Admin Instructions ---

    /// Creates the `MasterChef` account and records the signer as its admin.
    /// See [`instructions::initialize`] for details.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize(ctx)
    }

    /// Applies an optional-field configuration update, e.g. handing the admin
    /// role to another key. See [`instructions::set_admin`] for details.
    pub fn set_admin(ctx: Context<SetAdmin>, config: MasterChefConfig) -> Result<()> {
        instructions::set_admin(ctx, config)
    }

    /// Registers a new staking pool for an LP mint, creating both PDA vaults.
    /// See [`instructions::add_pool`] for details.
    pub fn add_pool(
        ctx: Context<AddPool>,
        reward_mint: Pubkey,
        lp_mint: Pubkey,
        reward_per_slot: u64,
        start_slot: u64,
    ) -> Result<()> {
        instructions::add_pool(ctx, reward_mint, lp_mint, reward_per_slot, start_slot)
    }

    /// Changes a pool's emission rate after settling accrual at the old rate.
    /// See [`instructions::update_reward_per_slot`] for details.
    pub fn update_reward_per_slot(
        ctx: Context<UpdateRewardPerSlot>,
        lp_mint: Pubkey,
        new_reward_per_slot: u64,
    ) -> Result<()> {
        instructions::update_reward_per_slot(ctx, lp_mint, new_reward_per_slot)
    }

    // --- User Instructions ---

    /// Stakes LP tokens into a pool's vault.
    /// See [`instructions::deposit`] for details.
    pub fn deposit(ctx: Context<Deposit>, lp_mint: Pubkey, amount: u64) -> Result<()> {
        instructions::deposit(ctx, lp_mint, amount)
    }

    /// Unstakes LP tokens back to the caller's token account.
    /// See [`instructions::withdraw`] for details.
    pub fn withdraw(ctx: Context<Withdraw>, lp_mint: Pubkey, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, lp_mint, amount)
    }

    /// Pays out all pending reward to the caller's associated token account.
    /// See [`instructions::claim_reward`] for details.
    pub fn claim_reward(ctx: Context<ClaimReward>, lp_mint: Pubkey) -> Result<()> {
        instructions::claim_reward(ctx, lp_mint)
    }
}
