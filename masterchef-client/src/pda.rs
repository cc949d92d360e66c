//! Derivation helpers for the program's PDAs.
//!
//! The vault and vault-authority addresses are derived from a pool's LP mint
//! and the MasterChef account key; the user-info address additionally mixes
//! in the user's wallet. These seed conventions are a fixed contract shared
//! with the on-chain program.

use masterchef_program::state::{
    LP_TOKEN_VAULT_AUTH_SEED, LP_TOKEN_VAULT_SEED, REWARD_TOKEN_VAULT_AUTH_SEED,
    REWARD_TOKEN_VAULT_SEED,
};
use solana_sdk::pubkey::Pubkey;

fn derive_vault(seed: &[u8], lp_mint: &Pubkey, master_chef: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[seed, lp_mint.as_ref(), master_chef.as_ref()],
        &masterchef_program::ID,
    )
}

/// The vault holding a pool's staked LP tokens.
pub fn lp_token_vault_address(lp_mint: &Pubkey, master_chef: &Pubkey) -> (Pubkey, u8) {
    derive_vault(LP_TOKEN_VAULT_SEED, lp_mint, master_chef)
}

/// The authority PDA signing outbound LP vault transfers.
pub fn lp_token_vault_authority_address(lp_mint: &Pubkey, master_chef: &Pubkey) -> (Pubkey, u8) {
    derive_vault(LP_TOKEN_VAULT_AUTH_SEED, lp_mint, master_chef)
}

/// The vault rewards are paid out of.
pub fn reward_token_vault_address(lp_mint: &Pubkey, master_chef: &Pubkey) -> (Pubkey, u8) {
    derive_vault(REWARD_TOKEN_VAULT_SEED, lp_mint, master_chef)
}

/// The authority PDA signing outbound reward vault transfers.
pub fn reward_token_vault_authority_address(
    lp_mint: &Pubkey,
    master_chef: &Pubkey,
) -> (Pubkey, u8) {
    derive_vault(REWARD_TOKEN_VAULT_AUTH_SEED, lp_mint, master_chef)
}

/// A user's per-pool staking state account.
pub fn user_info_address(user: &Pubkey, lp_mint: &Pubkey, master_chef: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[user.as_ref(), lp_mint.as_ref(), master_chef.as_ref()],
        &masterchef_program::ID,
    )
}
