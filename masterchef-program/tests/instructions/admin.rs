#![allow(dead_code)]

use super::*;
use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use masterchef_program::state::{
    MasterChefConfig, LP_TOKEN_VAULT_AUTH_SEED, LP_TOKEN_VAULT_SEED,
    REWARD_TOKEN_VAULT_AUTH_SEED, REWARD_TOKEN_VAULT_SEED,
};
use masterchef_program::{accounts as chef_accounts, instruction as chef_instruction};

/// The vault PDAs of one pool, derived from its LP mint and the MasterChef key.
#[derive(Debug, Clone, Copy)]
pub struct PoolVaults {
    pub lp_token_vault: Pubkey,
    pub lp_token_vault_authority: Pubkey,
    pub reward_token_vault: Pubkey,
    pub reward_token_vault_authority: Pubkey,
}

pub fn derive_pool_vaults(lp_mint: &Pubkey, master_chef: &Pubkey) -> PoolVaults {
    let derive = |seed: &[u8]| {
        Pubkey::find_program_address(
            &[seed, lp_mint.as_ref(), master_chef.as_ref()],
            &masterchef_program::ID,
        )
        .0
    };
    PoolVaults {
        lp_token_vault: derive(LP_TOKEN_VAULT_SEED),
        lp_token_vault_authority: derive(LP_TOKEN_VAULT_AUTH_SEED),
        reward_token_vault: derive(REWARD_TOKEN_VAULT_SEED),
        reward_token_vault_authority: derive(REWARD_TOKEN_VAULT_AUTH_SEED),
    }
}

pub fn initialize(svm: &mut LiteSVM, admin: &Keypair) -> Pubkey {
    let master_chef = Keypair::new();
    let ix = ix_initialize(admin, &master_chef.pubkey());
    build_and_send_tx(svm, vec![ix], admin, vec![&master_chef]);
    master_chef.pubkey()
}

pub fn set_admin(svm: &mut LiteSVM, admin: &Keypair, master_chef: Pubkey, new_admin: Pubkey) {
    let ix = ix_set_admin(admin, master_chef, MasterChefConfig {
        admin: Some(new_admin),
    });
    build_and_send_tx(svm, vec![ix], admin, vec![]);
}

pub fn add_pool(
    svm: &mut LiteSVM,
    admin: &Keypair,
    master_chef: Pubkey,
    reward_mint: Pubkey,
    lp_mint: Pubkey,
    reward_per_slot: u64,
    start_slot: u64,
) -> PoolVaults {
    let (ix, vaults) = ix_add_pool(
        admin,
        master_chef,
        reward_mint,
        lp_mint,
        reward_per_slot,
        start_slot,
    );
    build_and_send_tx(svm, vec![ix], admin, vec![]);
    vaults
}

pub fn update_reward_per_slot(
    svm: &mut LiteSVM,
    admin: &Keypair,
    master_chef: Pubkey,
    lp_mint: Pubkey,
    new_reward_per_slot: u64,
) {
    let ix = ix_update_reward_per_slot(admin, master_chef, lp_mint, new_reward_per_slot);
    build_and_send_tx(svm, vec![ix], admin, vec![]);
}

pub fn ix_initialize(admin: &Keypair, master_chef: &Pubkey) -> Instruction {
    let data = chef_instruction::Initialize {}.data();

    let accounts = chef_accounts::Initialize {
        admin: admin.pubkey(),
        master_chef: *master_chef,
        system_program: system_program::ID,
    }
    .to_account_metas(None);

    Instruction {
        program_id: masterchef_program::ID,
        accounts,
        data,
    }
}

pub fn ix_set_admin(
    admin: &Keypair,
    master_chef: Pubkey,
    config: MasterChefConfig,
) -> Instruction {
    let data = chef_instruction::SetAdmin { config }.data();

    let accounts = chef_accounts::SetAdmin {
        admin: admin.pubkey(),
        master_chef,
    }
    .to_account_metas(None);

    Instruction {
        program_id: masterchef_program::ID,
        accounts,
        data,
    }
}

pub fn ix_add_pool(
    admin: &Keypair,
    master_chef: Pubkey,
    reward_mint: Pubkey,
    lp_mint: Pubkey,
    reward_per_slot: u64,
    start_slot: u64,
) -> (Instruction, PoolVaults) {
    let vaults = derive_pool_vaults(&lp_mint, &master_chef);

    let data = chef_instruction::AddPool {
        reward_mint,
        lp_mint,
        reward_per_slot,
        start_slot,
    }
    .data();

    let accounts = chef_accounts::AddPool {
        admin: admin.pubkey(),
        master_chef,
        lp_mint,
        reward_mint,
        lp_token_vault_authority: vaults.lp_token_vault_authority,
        lp_token_vault: vaults.lp_token_vault,
        reward_token_vault_authority: vaults.reward_token_vault_authority,
        reward_token_vault: vaults.reward_token_vault,
        token_program: spl_token::id(),
        system_program: system_program::ID,
    }
    .to_account_metas(None);

    let ix = Instruction {
        program_id: masterchef_program::ID,
        accounts,
        data,
    };

    (ix, vaults)
}

pub fn ix_update_reward_per_slot(
    admin: &Keypair,
    master_chef: Pubkey,
    lp_mint: Pubkey,
    new_reward_per_slot: u64,
) -> Instruction {
    let data = chef_instruction::UpdateRewardPerSlot {
        lp_mint,
        new_reward_per_slot,
    }
    .data();

    let accounts = chef_accounts::UpdateRewardPerSlot {
        admin: admin.pubkey(),
        master_chef,
    }
    .to_account_metas(None);

    Instruction {
        program_id: masterchef_program::ID,
        accounts,
        data,
    }
}
