use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    /// Used when checked fixed-point or integer arithmetic overflows.
    #[msg("Math overflow during reward accounting.")]
    MathOverflow,

    /// Used when `add_pool` is called with all pool slots already in use.
    #[msg("All MasterChef pool slots are in use.")]
    PoolSlotsFull,

    /// Used when no initialized pool exists for the given LP mint.
    #[msg("No pool exists for this LP mint.")]
    PoolNotFound,

    /// Used when `add_pool` is called for an LP mint that already has a pool.
    #[msg("A pool for this LP mint already exists.")]
    PoolAlreadyExists,

    /// Used when a passed vault account does not match the pool's vault.
    #[msg("The provided vault account does not belong to this pool.")]
    InvalidVaultAccount,

    /// Used when an instruction's mint argument does not match the mint account.
    #[msg("Mint argument does not match the provided mint account.")]
    MintMismatch,

    /// Used when a withdrawal exceeds the user's staked amount.
    #[msg("Withdrawal amount exceeds the staked LP balance.")]
    InsufficientStake,

    /// Used when an admin-only instruction is signed by another key.
    #[msg("Signer is not the MasterChef admin.")]
    SignerNotAdmin,
}
