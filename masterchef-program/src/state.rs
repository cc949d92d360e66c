use crate::errors::StakingError;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use fixed::types::I80F48;
use std::fmt::{Debug, Formatter};

/// The number of pool slots allocated inside the `MasterChef` account.
pub const MAX_POOLS: usize = 8;

// --- PDA Seeds ---
//
// Both vaults and their authorities are derived from the pool's LP mint and
// the MasterChef account key. These seed strings are a fixed external
// contract; off-chain clients derive the same addresses.

pub const LP_TOKEN_VAULT_SEED: &[u8] = b"lp_token_vault";
pub const LP_TOKEN_VAULT_AUTH_SEED: &[u8] = b"lp_token_vault_auth";
pub const REWARD_TOKEN_VAULT_SEED: &[u8] = b"reward_token_vault";
pub const REWARD_TOKEN_VAULT_AUTH_SEED: &[u8] = b"reward_token_vault_auth";

// --- Account Data Structs ---

/// The root account of the program. Holds the admin key and a fixed array of
/// pool slots. Created once by [`crate::instructions::initialize`] with a
/// fresh keypair; all other instructions reference it by address.
#[account(zero_copy)]
#[repr(C)]
pub struct MasterChef {
    /// The wallet allowed to call `set_admin`, `add_pool` and
    /// `update_reward_per_slot`.
    pub admin: Pubkey,
    /// Fixed pool storage. A slot is free until its `initialized` flag is set
    /// by `add_pool`; freed slots are never reused because pools cannot be
    /// removed.
    pub pools: [PoolInfo; MAX_POOLS],
}

/// One staking pool: an LP mint staked against a reward mint emitted at
/// `reward_per_slot`.
///
/// Field order keeps the struct free of implicit padding so the safe
/// zero-copy (Pod) derive holds: the 16-byte accumulator first, then the
/// 32-byte keys, the u64 counters, and the flag/bump bytes with explicit
/// tail padding.
#[zero_copy]
#[repr(C)]
#[derive(Default)]
pub struct PoolInfo {
    /// Reward accumulated per staked LP token since pool creation, as an
    /// I80F48 fixed-point number.
    pub acc_reward_per_share: WrappedI80F48,

    pub reward_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub lp_token_vault: Pubkey,
    pub reward_token_vault: Pubkey,

    /// Total LP tokens currently staked in this pool.
    pub lp_supply: u64,
    /// First slot at which rewards accrue.
    pub start_slot: u64,
    /// Reward tokens emitted to the whole pool per slot.
    pub reward_per_slot: u64,
    /// The slot up to which `acc_reward_per_share` has been settled.
    pub last_reward_slot: u64,

    /// Non-zero once the slot is claimed by `add_pool`. Kept as a `u8` so the
    /// struct stays Pod-safe.
    pub initialized: u8,
    pub lp_token_vault_bump: u8,
    pub lp_token_vault_authority_bump: u8,
    pub reward_token_vault_bump: u8,
    pub reward_token_vault_authority_bump: u8,

    pub _padding: [u8; 11],
}

impl PoolInfo {
    pub fn is_initialized(&self) -> bool {
        self.initialized != 0
    }

    /// Settles `acc_reward_per_share` up to `current_slot`.
    ///
    /// With an empty pool only `last_reward_slot` advances, so no reward is
    /// ever emitted for slots during which nothing was staked.
    pub fn accrue(&mut self, current_slot: u64) -> Result<()> {
        if current_slot <= self.last_reward_slot {
            return Ok(());
        }
        if self.lp_supply == 0 {
            self.last_reward_slot = current_slot;
            return Ok(());
        }
        let slot_delta = current_slot - self.last_reward_slot;
        let reward = slot_delta
            .checked_mul(self.reward_per_slot)
            .ok_or(StakingError::MathOverflow)?;
        let share_delta = I80F48::from_num(reward)
            .checked_div(I80F48::from_num(self.lp_supply))
            .ok_or(StakingError::MathOverflow)?;
        self.acc_reward_per_share = I80F48::from(self.acc_reward_per_share)
            .checked_add(share_delta)
            .ok_or(StakingError::MathOverflow)?
            .into();
        self.last_reward_slot = current_slot;
        Ok(())
    }

    /// Reward earned by `staked` LP tokens since `reward_debt` was last
    /// refreshed. Non-negative as long as `reward_debt` is refreshed after
    /// every balance change.
    pub fn pending_reward(&self, staked: u64, reward_debt: WrappedI80F48) -> Result<I80F48> {
        let earned = I80F48::from_num(staked)
            .checked_mul(self.acc_reward_per_share.into())
            .ok_or(StakingError::MathOverflow)?;
        let pending = earned
            .checked_sub(reward_debt.into())
            .ok_or(StakingError::MathOverflow)?;
        Ok(pending)
    }
}

impl MasterChef {
    pub fn set_initial_configuration(&mut self, admin: Pubkey) {
        self.admin = admin;
    }

    /// Applies the optional fields of a [`MasterChefConfig`].
    pub fn configure(&mut self, config: &MasterChefConfig) {
        if let Some(admin) = config.admin {
            self.admin = admin;
        }
    }

    fn first_free_slot(&self) -> Option<usize> {
        self.pools.iter().position(|p| !p.is_initialized())
    }

    pub fn find_pool(&self, lp_mint: &Pubkey) -> Result<&PoolInfo> {
        self.pools
            .iter()
            .find(|pool| pool.is_initialized() && pool.lp_mint == *lp_mint)
            .ok_or_else(|| error!(StakingError::PoolNotFound))
    }

    pub fn find_pool_mut(&mut self, lp_mint: &Pubkey) -> Result<&mut PoolInfo> {
        self.pools
            .iter_mut()
            .find(|pool| pool.is_initialized() && pool.lp_mint == *lp_mint)
            .ok_or_else(|| error!(StakingError::PoolNotFound))
    }

    /// Claims the first free pool slot for `lp_mint`. Accrual starts at
    /// `start_slot`, or at `current_slot` when the start lies in the past.
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool(
        &mut self,
        reward_mint: Pubkey,
        lp_mint: Pubkey,
        reward_per_slot: u64,
        start_slot: u64,
        current_slot: u64,
        lp_token_vault: Pubkey,
        lp_token_vault_bump: u8,
        lp_token_vault_authority_bump: u8,
        reward_token_vault: Pubkey,
        reward_token_vault_bump: u8,
        reward_token_vault_authority_bump: u8,
    ) -> Result<()> {
        require!(
            self.find_pool(&lp_mint).is_err(),
            StakingError::PoolAlreadyExists
        );
        let slot_index = self
            .first_free_slot()
            .ok_or(StakingError::PoolSlotsFull)?;
        self.pools[slot_index] = PoolInfo {
            acc_reward_per_share: WrappedI80F48::default(),
            reward_mint,
            lp_mint,
            lp_token_vault,
            reward_token_vault,
            lp_supply: 0,
            start_slot,
            reward_per_slot,
            last_reward_slot: start_slot.max(current_slot),
            initialized: 1,
            lp_token_vault_bump,
            lp_token_vault_authority_bump,
            reward_token_vault_bump,
            reward_token_vault_authority_bump,
            _padding: [0; 11],
        };
        Ok(())
    }
}

/// Per-user, per-pool staking state. PDA seeds: `[user, lp_mint, master_chef]`.
#[account]
#[derive(Default)]
pub struct UserInfo {
    /// LP tokens currently staked by this user.
    pub amount: u64,
    /// `amount * acc_reward_per_share` at the last balance change; the
    /// baseline that pending reward is measured against.
    pub reward_debt: WrappedI80F48,
    /// Reward settled but not yet paid out, carried across deposits and
    /// withdrawals until `claim_reward`.
    pub accrued_reward: WrappedI80F48,
}

impl UserInfo {
    /// Moves the user's pending pool reward into `accrued_reward`.
    pub fn settle(&mut self, pool: &PoolInfo) -> Result<()> {
        if self.amount == 0 {
            return Ok(());
        }
        let pending = pool.pending_reward(self.amount, self.reward_debt)?;
        self.accrued_reward = pending
            .checked_add(self.accrued_reward.into())
            .ok_or(StakingError::MathOverflow)?
            .into();
        Ok(())
    }

    /// Re-baselines `reward_debt` against the pool accumulator. Must run
    /// after every change to `amount`.
    pub fn refresh_reward_debt(&mut self, pool: &PoolInfo) -> Result<()> {
        self.reward_debt = I80F48::from_num(self.amount)
            .checked_mul(pool.acc_reward_per_share.into())
            .ok_or(StakingError::MathOverflow)?
            .into();
        Ok(())
    }
}

/// The argument of `set_admin`. Fields left as `None` are unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Default, Debug, Clone)]
pub struct MasterChefConfig {
    pub admin: Option<Pubkey>,
}

/// An I80F48 fixed-point value stored as its raw bit pattern so it can live
/// in both zero-copy and borsh accounts.
#[zero_copy]
#[repr(C)]
#[derive(Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct WrappedI80F48 {
    pub value: i128,
}

impl Debug for WrappedI80F48 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", I80F48::from_bits(self.value))
    }
}

impl From<I80F48> for WrappedI80F48 {
    fn from(i: I80F48) -> Self {
        Self { value: i.to_bits() }
    }
}

impl From<WrappedI80F48> for I80F48 {
    fn from(w: WrappedI80F48) -> Self {
        Self::from_bits(w.value)
    }
}

// --- Instruction Accounts Structs ---

/// Defines the accounts for the `initialize` instruction.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The `Signer` who pays for the account and becomes the admin.
    #[account(mut)]
    pub admin: Signer<'info>,
    /// The new `MasterChef` account. Created from a fresh keypair signing the
    /// same transaction, not a PDA.
    #[account(
        init,
        payer = admin,
        space = 8 + std::mem::size_of::<MasterChef>(),
    )]
    pub master_chef: AccountLoader<'info, MasterChef>,
    pub system_program: Program<'info, System>,
}

/// Defines the accounts for the `set_admin` instruction.
#[derive(Accounts)]
pub struct SetAdmin<'info> {
    /// The current admin; must match `master_chef.admin`.
    #[account(
        constraint = admin.key() == master_chef.load()?.admin @ StakingError::SignerNotAdmin,
    )]
    pub admin: Signer<'info>,
    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,
}

/// Defines the accounts for the `add_pool` instruction.
#[derive(Accounts)]
pub struct AddPool<'info> {
    /// The admin; pays rent for both new vault accounts.
    #[account(
        mut,
        constraint = admin.key() == master_chef.load()?.admin @ StakingError::SignerNotAdmin,
    )]
    pub admin: Signer<'info>,

    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,

    pub lp_mint: Box<Account<'info, Mint>>,

    pub reward_mint: Box<Account<'info, Mint>>,

    /// The PDA that will own the LP vault. Never holds data or lamports.
    /// CHECK: Verified by its seed derivation; used only as a CPI authority.
    #[account(
        seeds = [
            LP_TOKEN_VAULT_AUTH_SEED,
            lp_mint.key().as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub lp_token_vault_authority: AccountInfo<'info>,

    /// The vault holding all staked LP tokens for this pool.
    #[account(
        init,
        payer = admin,
        token::mint = lp_mint,
        token::authority = lp_token_vault_authority,
        seeds = [
            LP_TOKEN_VAULT_SEED,
            lp_mint.key().as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub lp_token_vault: Box<Account<'info, TokenAccount>>,

    /// The PDA that will own the reward vault.
    /// CHECK: Verified by its seed derivation; used only as a CPI authority.
    #[account(
        seeds = [
            REWARD_TOKEN_VAULT_AUTH_SEED,
            lp_mint.key().as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub reward_token_vault_authority: AccountInfo<'info>,

    /// The vault that reward tokens are paid out of. Funding it is the
    /// admin's responsibility; the program only ever transfers out.
    #[account(
        init,
        payer = admin,
        token::mint = reward_mint,
        token::authority = reward_token_vault_authority,
        seeds = [
            REWARD_TOKEN_VAULT_SEED,
            lp_mint.key().as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub reward_token_vault: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Defines the accounts for the `update_reward_per_slot` instruction.
#[derive(Accounts)]
pub struct UpdateRewardPerSlot<'info> {
    #[account(
        constraint = admin.key() == master_chef.load()?.admin @ StakingError::SignerNotAdmin,
    )]
    pub admin: Signer<'info>,
    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,
}

/// Defines the accounts for the `deposit` instruction.
#[derive(Accounts)]
#[instruction(lp_mint: Pubkey)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,

    /// The user's LP token account the stake is pulled from.
    /// CHECK: Mint and ownership are enforced by the SPL transfer itself.
    #[account(mut)]
    pub user_lp_token_account: AccountInfo<'info>,

    /// The user's staking state for this pool, created on first deposit.
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + std::mem::size_of::<UserInfo>(),
        seeds = [
            user.key().as_ref(),
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub user_info: Account<'info, UserInfo>,

    /// CHECK: Verified by its seed derivation against the stored bump.
    #[account(
        mut,
        seeds = [
            LP_TOKEN_VAULT_SEED,
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump = master_chef.load()?.find_pool(&lp_mint)?.lp_token_vault_bump,
    )]
    pub lp_token_vault: AccountInfo<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Defines the accounts for the `withdraw` instruction.
#[derive(Accounts)]
#[instruction(lp_mint: Pubkey)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,

    /// The user's LP token account the stake is returned to.
    /// CHECK: Mint and ownership are enforced by the SPL transfer itself.
    #[account(mut)]
    pub user_lp_token_account: AccountInfo<'info>,

    #[account(
        mut,
        seeds = [
            user.key().as_ref(),
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub user_info: Account<'info, UserInfo>,

    /// CHECK: Verified by its seed derivation against the stored bump.
    #[account(
        mut,
        seeds = [
            LP_TOKEN_VAULT_SEED,
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump = master_chef.load()?.find_pool(&lp_mint)?.lp_token_vault_bump,
    )]
    pub lp_token_vault: AccountInfo<'info>,

    /// CHECK: Verified by its seed derivation against the stored bump; signs
    /// the outbound vault transfer.
    #[account(
        seeds = [
            LP_TOKEN_VAULT_AUTH_SEED,
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump = master_chef.load()?.find_pool(&lp_mint)?.lp_token_vault_authority_bump,
    )]
    pub lp_token_vault_authority: AccountInfo<'info>,

    pub token_program: Program<'info, Token>,
}

/// Defines the accounts for the `claim_reward` instruction.
#[derive(Accounts)]
#[instruction(lp_mint: Pubkey)]
pub struct ClaimReward<'info> {
    #[account(mut)]
    pub master_chef: AccountLoader<'info, MasterChef>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub reward_mint: Box<Account<'info, Mint>>,

    /// The user's associated reward token account, created on first claim.
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = reward_mint,
        associated_token::authority = user,
    )]
    pub user_reward_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [
            user.key().as_ref(),
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump,
    )]
    pub user_info: Account<'info, UserInfo>,

    /// CHECK: Verified by its seed derivation against the stored bump.
    #[account(
        mut,
        seeds = [
            REWARD_TOKEN_VAULT_SEED,
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump = master_chef.load()?.find_pool(&lp_mint)?.reward_token_vault_bump,
    )]
    pub reward_token_vault: AccountInfo<'info>,

    /// CHECK: Verified by its seed derivation against the stored bump; signs
    /// the outbound vault transfer.
    #[account(
        seeds = [
            REWARD_TOKEN_VAULT_AUTH_SEED,
            lp_mint.as_ref(),
            master_chef.key().as_ref(),
        ],
        bump = master_chef.load()?.find_pool(&lp_mint)?.reward_token_vault_authority_bump,
    )]
    pub reward_token_vault_authority: AccountInfo<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
