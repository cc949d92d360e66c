use super::*;
use anchor_spl::token::{self, Transfer};
use fixed::types::I80F48;

// --- Admin Instructions ---

/// Creates the `MasterChef` account and records the signer as its admin.
///
/// The account is created from a fresh keypair that co-signs the transaction;
/// every later instruction addresses this instance explicitly, so several
/// independent MasterChef deployments can coexist under one program.
pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let master_chef = &mut ctx.accounts.master_chef.load_init()?;
    master_chef.set_initial_configuration(ctx.accounts.admin.key());

    emit!(MasterChefInitialized {
        header: EventHeader {
            master_chef: ctx.accounts.master_chef.key(),
            signer: Some(ctx.accounts.admin.key()),
        },
    });
    Ok(())
}

/// Applies the optional fields of a [`MasterChefConfig`], e.g. handing the
/// admin role to another wallet.
pub fn set_admin(ctx: Context<SetAdmin>, config: MasterChefConfig) -> Result<()> {
    let mut master_chef = ctx.accounts.master_chef.load_mut()?;
    master_chef.configure(&config);

    emit!(AdminUpdated {
        header: EventHeader {
            master_chef: ctx.accounts.master_chef.key(),
            signer: Some(ctx.accounts.admin.key()),
        },
        config,
    });
    Ok(())
}

/// Registers a staking pool for `lp_mint`, claiming the first free pool slot
/// and initializing both PDA vaults. The reward vault starts empty; funding
/// it is up to the admin.
pub fn add_pool(
    ctx: Context<AddPool>,
    reward_mint: Pubkey,
    lp_mint: Pubkey,
    reward_per_slot: u64,
    start_slot: u64,
) -> Result<()> {
    require_keys_eq!(
        lp_mint,
        ctx.accounts.lp_mint.key(),
        StakingError::MintMismatch
    );
    require_keys_eq!(
        reward_mint,
        ctx.accounts.reward_mint.key(),
        StakingError::MintMismatch
    );

    let mut master_chef = ctx.accounts.master_chef.load_mut()?;
    master_chef.create_pool(
        reward_mint,
        lp_mint,
        reward_per_slot,
        start_slot,
        Clock::get()?.slot,
        ctx.accounts.lp_token_vault.key(),
        ctx.bumps.lp_token_vault,
        ctx.bumps.lp_token_vault_authority,
        ctx.accounts.reward_token_vault.key(),
        ctx.bumps.reward_token_vault,
        ctx.bumps.reward_token_vault_authority,
    )?;

    emit!(PoolAdded {
        header: EventHeader {
            master_chef: ctx.accounts.master_chef.key(),
            signer: Some(ctx.accounts.admin.key()),
        },
        reward_mint,
        lp_mint,
        start_slot,
        reward_per_slot,
    });
    Ok(())
}

/// Changes a pool's emission rate. The pool is settled up to the current
/// slot at the old rate first, so past accrual is unaffected.
pub fn update_reward_per_slot(
    ctx: Context<UpdateRewardPerSlot>,
    lp_mint: Pubkey,
    new_reward_per_slot: u64,
) -> Result<()> {
    let mut master_chef = ctx.accounts.master_chef.load_mut()?;
    let pool = master_chef.find_pool_mut(&lp_mint)?;

    pool.accrue(Clock::get()?.slot)?;
    let old_reward_per_slot = pool.reward_per_slot;
    pool.reward_per_slot = new_reward_per_slot;

    emit!(RewardPerSlotUpdated {
        header: EventHeader {
            master_chef: ctx.accounts.master_chef.key(),
            signer: Some(ctx.accounts.admin.key()),
        },
        lp_mint,
        old_reward_per_slot,
        new_reward_per_slot,
    });
    Ok(())
}

// --- User Instructions ---

/// Stakes `amount` LP tokens. The user's pending reward is settled into
/// `accrued_reward` before the balance changes; a zero `amount` is therefore
/// a pure settle.
pub fn deposit(ctx: Context<Deposit>, lp_mint: Pubkey, amount: u64) -> Result<()> {
    let Deposit {
        master_chef: master_chef_loader,
        user,
        user_lp_token_account,
        user_info,
        lp_token_vault,
        token_program,
        ..
    } = ctx.accounts;

    let mut master_chef = master_chef_loader.load_mut()?;
    let pool = master_chef.find_pool_mut(&lp_mint)?;

    pool.accrue(Clock::get()?.slot)?;
    user_info.settle(pool)?;

    if amount > 0 {
        require_keys_eq!(
            lp_token_vault.key(),
            pool.lp_token_vault,
            StakingError::InvalidVaultAccount
        );
        msg!(
            "deposit: {} lp tokens from {} into vault {}",
            amount,
            user_lp_token_account.key(),
            lp_token_vault.key()
        );
        token::transfer(
            CpiContext::new(
                token_program.to_account_info(),
                Transfer {
                    from: user_lp_token_account.to_account_info(),
                    to: lp_token_vault.to_account_info(),
                    authority: user.to_account_info(),
                },
            ),
            amount,
        )?;
        user_info.amount = user_info
            .amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        pool.lp_supply = pool
            .lp_supply
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
    }
    user_info.refresh_reward_debt(pool)?;

    emit!(TokensDeposited {
        header: EventHeader {
            master_chef: master_chef_loader.key(),
            signer: Some(user.key()),
        },
        lp_mint,
        amount,
    });
    Ok(())
}

/// Unstakes `amount` LP tokens back to the user's token account, signed by
/// the LP vault authority PDA.
pub fn withdraw(ctx: Context<Withdraw>, lp_mint: Pubkey, amount: u64) -> Result<()> {
    let Withdraw {
        user,
        master_chef: master_chef_loader,
        user_lp_token_account,
        user_info,
        lp_token_vault,
        lp_token_vault_authority,
        token_program,
        ..
    } = ctx.accounts;

    let master_chef_key = master_chef_loader.key();
    let mut master_chef = master_chef_loader.load_mut()?;
    let pool = master_chef.find_pool_mut(&lp_mint)?;

    require!(user_info.amount >= amount, StakingError::InsufficientStake);

    pool.accrue(Clock::get()?.slot)?;
    user_info.settle(pool)?;

    if amount > 0 {
        let authority_bump = pool.lp_token_vault_authority_bump;
        let signer_seeds: &[&[&[u8]]] = &[&[
            LP_TOKEN_VAULT_AUTH_SEED,
            lp_mint.as_ref(),
            master_chef_key.as_ref(),
            &[authority_bump],
        ]];
        msg!(
            "withdraw: {} lp tokens from vault {} to {}",
            amount,
            lp_token_vault.key(),
            user_lp_token_account.key()
        );
        token::transfer(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                Transfer {
                    from: lp_token_vault.to_account_info(),
                    to: user_lp_token_account.to_account_info(),
                    authority: lp_token_vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
        user_info.amount -= amount;
        pool.lp_supply = pool
            .lp_supply
            .checked_sub(amount)
            .ok_or(StakingError::MathOverflow)?;
    }
    user_info.refresh_reward_debt(pool)?;

    emit!(TokensWithdrawn {
        header: EventHeader {
            master_chef: master_chef_key,
            signer: Some(user.key()),
        },
        lp_mint,
        amount,
    });
    Ok(())
}

/// Pays out the user's whole accrued reward from the reward vault to their
/// associated token account. The payout is floored to a whole token amount;
/// the fractional remainder stays in `accrued_reward` for the next claim.
pub fn claim_reward(ctx: Context<ClaimReward>, lp_mint: Pubkey) -> Result<()> {
    let ClaimReward {
        master_chef: master_chef_loader,
        user,
        user_info,
        user_reward_token_account,
        reward_token_vault,
        reward_token_vault_authority,
        token_program,
        ..
    } = ctx.accounts;

    // Nothing staked and nothing accrued: a claim is a no-op.
    if user_info.amount == 0 && I80F48::from(user_info.accrued_reward).is_zero() {
        return Ok(());
    }

    let master_chef_key = master_chef_loader.key();
    let mut master_chef = master_chef_loader.load_mut()?;
    let pool = master_chef.find_pool_mut(&lp_mint)?;

    pool.accrue(Clock::get()?.slot)?;
    user_info.settle(pool)?;
    user_info.refresh_reward_debt(pool)?;

    let total: I80F48 = user_info.accrued_reward.into();
    let reward_amount: u64 = total.checked_to_num().ok_or(StakingError::MathOverflow)?;
    user_info.accrued_reward = total
        .checked_sub(I80F48::from_num(reward_amount))
        .ok_or(StakingError::MathOverflow)?
        .into();

    if reward_amount > 0 {
        let authority_bump = pool.reward_token_vault_authority_bump;
        let signer_seeds: &[&[&[u8]]] = &[&[
            REWARD_TOKEN_VAULT_AUTH_SEED,
            lp_mint.as_ref(),
            master_chef_key.as_ref(),
            &[authority_bump],
        ]];
        msg!(
            "claim: {} reward tokens from vault {} to {}",
            reward_amount,
            reward_token_vault.key(),
            user_reward_token_account.key()
        );
        token::transfer(
            CpiContext::new_with_signer(
                token_program.to_account_info(),
                Transfer {
                    from: reward_token_vault.to_account_info(),
                    to: user_reward_token_account.to_account_info(),
                    authority: reward_token_vault_authority.to_account_info(),
                },
                signer_seeds,
            ),
            reward_amount,
        )?;
    }

    emit!(RewardClaimed {
        header: EventHeader {
            master_chef: master_chef_key,
            signer: Some(user.key()),
        },
        lp_mint,
        amount: reward_amount,
    });
    Ok(())
}
