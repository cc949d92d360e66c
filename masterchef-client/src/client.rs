//! # Transaction Builder
//!
//! This module provides the [`TransactionBuilder`], a utility for creating
//! unsigned Solana transaction messages for the `masterchef-program`.
//!
//! ## Use Case
//!
//! The builder is a helper for off-chain Rust services (admin tooling, bots,
//! test harnesses) that construct instructions programmatically. It produces
//! bincode-encoded `Message` bytes; the caller patches in a recent blockhash,
//! signs with their own keypair, and submits. The builder never touches a
//! secret key.
//!
//! ## Features
//!
//! - **RPC Abstraction**: Uses the [`AsyncRpcClient`] trait, making it
//!   compatible with both the live `RpcClient` and the `BanksClient` used in
//!   integration tests.
//! - **Comprehensive Coverage**: One `prepare_` method per program
//!   instruction, plus a plain lamport transfer.
//! - **PDA Handling**: Vault, vault-authority and user-info addresses are
//!   derived internally from the [`crate::pda`] conventions.

use anchor_lang::{InstructionData, ToAccountMetas};
use async_trait::async_trait;
use masterchef_program::state::MasterChefConfig;
use masterchef_program::{accounts, instruction};
use solana_client::{client_error::ClientError, nonblocking::rpc_client::RpcClient};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use solana_sdk::{hash::Hash, signature::Signature};
use solana_system_interface::instruction as system_instruction;
use std::sync::Arc;

use crate::pda;

/// A trait abstracting over the asynchronous RPC client functionality.
///
/// This allows the [`TransactionBuilder`] to be generic over the RPC client,
/// so the live `RpcClient` and the `BanksClient` used in integration tests
/// are interchangeable.
#[async_trait]
pub trait AsyncRpcClient: Send + Sync {
    /// Fetches the latest blockhash from the RPC endpoint.
    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError>;
    /// Sends and confirms a transaction, waiting for it to be finalized.
    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ClientError>;
}

#[async_trait]
impl AsyncRpcClient for RpcClient {
    async fn get_latest_blockhash(&self) -> Result<Hash, ClientError> {
        self.get_latest_blockhash().await
    }

    async fn send_and_confirm_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, ClientError> {
        self.send_and_confirm_transaction(transaction).await
    }
}

/// A builder for preparing unsigned on-chain transactions.
///
/// Every `prepare_` method returns the bincode-encoded `Message` bytes of an
/// unsigned transaction. The calling service is responsible for setting a
/// recent blockhash, signing, and submitting the result.
#[derive(Clone)]
pub struct TransactionBuilder<C: AsyncRpcClient + ?Sized> {
    /// A shared, thread-safe reference to a Solana JSON RPC client.
    rpc_client: Arc<C>,
}

impl<C: AsyncRpcClient + ?Sized> TransactionBuilder<C> {
    /// Creates a new `TransactionBuilder`.
    ///
    /// # Arguments
    ///
    /// * `rpc_client` - A shared client that implements [`AsyncRpcClient`]
    ///   (e.g., `Arc<RpcClient>`).
    pub fn new(rpc_client: Arc<C>) -> Self {
        Self { rpc_client }
    }

    /// Returns the blockhash the caller should sign against.
    pub async fn latest_blockhash(&self) -> Result<Hash, ClientError> {
        self.rpc_client.get_latest_blockhash().await
    }

    /// Submits a signed transaction and waits for confirmation.
    pub async fn submit_transaction(&self, tx: &Transaction) -> Result<Signature, ClientError> {
        self.rpc_client.send_and_confirm_transaction(tx).await
    }

    /// Encodes a message from a vector of instructions with `payer` as the
    /// fee payer. Message serialization is infallible for valid instructions.
    fn create_message_with_instructions(payer: &Pubkey, instructions: Vec<Instruction>) -> Vec<u8> {
        let msg = solana_sdk::message::Message::new(&instructions, Some(payer));
        bincode::serde::encode_to_vec(&msg, bincode::config::standard()).unwrap()
    }

    // --- Admin Transaction Preparations ---

    /// Prepares an `initialize` transaction.
    ///
    /// # Arguments
    ///
    /// * `admin` - The wallet that becomes the MasterChef admin and pays rent.
    /// * `master_chef` - The public key of a **fresh keypair**; it must
    ///   co-sign the transaction because the account is created at its
    ///   address.
    pub fn prepare_initialize(&self, admin: Pubkey, master_chef: Pubkey) -> Vec<u8> {
        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::Initialize {
                admin,
                master_chef,
                system_program: solana_sdk::system_program::id(),
            }
            .to_account_metas(None),
            data: instruction::Initialize {}.data(),
        };

        Self::create_message_with_instructions(&admin, vec![ix])
    }

    /// Prepares a `set_admin` transaction.
    pub fn prepare_set_admin(
        &self,
        admin: Pubkey,
        master_chef: Pubkey,
        config: MasterChefConfig,
    ) -> Vec<u8> {
        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::SetAdmin { admin, master_chef }.to_account_metas(None),
            data: instruction::SetAdmin { config }.data(),
        };

        Self::create_message_with_instructions(&admin, vec![ix])
    }

    /// Prepares an `add_pool` transaction, deriving both vault PDAs.
    pub fn prepare_add_pool(
        &self,
        admin: Pubkey,
        master_chef: Pubkey,
        reward_mint: Pubkey,
        lp_mint: Pubkey,
        reward_per_slot: u64,
        start_slot: u64,
    ) -> Vec<u8> {
        let (lp_token_vault, _) = pda::lp_token_vault_address(&lp_mint, &master_chef);
        let (lp_token_vault_authority, _) =
            pda::lp_token_vault_authority_address(&lp_mint, &master_chef);
        let (reward_token_vault, _) = pda::reward_token_vault_address(&lp_mint, &master_chef);
        let (reward_token_vault_authority, _) =
            pda::reward_token_vault_authority_address(&lp_mint, &master_chef);

        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::AddPool {
                admin,
                master_chef,
                lp_mint,
                reward_mint,
                lp_token_vault_authority,
                lp_token_vault,
                reward_token_vault_authority,
                reward_token_vault,
                token_program: spl_token::id(),
                system_program: solana_sdk::system_program::id(),
            }
            .to_account_metas(None),
            data: instruction::AddPool {
                reward_mint,
                lp_mint,
                reward_per_slot,
                start_slot,
            }
            .data(),
        };

        Self::create_message_with_instructions(&admin, vec![ix])
    }

    /// Prepares an `update_reward_per_slot` transaction.
    pub fn prepare_update_reward_per_slot(
        &self,
        admin: Pubkey,
        master_chef: Pubkey,
        lp_mint: Pubkey,
        new_reward_per_slot: u64,
    ) -> Vec<u8> {
        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::UpdateRewardPerSlot { admin, master_chef }.to_account_metas(None),
            data: instruction::UpdateRewardPerSlot {
                lp_mint,
                new_reward_per_slot,
            }
            .data(),
        };

        Self::create_message_with_instructions(&admin, vec![ix])
    }

    // --- User Transaction Preparations ---

    /// Prepares a `deposit` transaction.
    ///
    /// # Arguments
    ///
    /// * `user` - The staker's wallet.
    /// * `user_lp_token_account` - The token account the stake is pulled from.
    pub fn prepare_deposit(
        &self,
        user: Pubkey,
        master_chef: Pubkey,
        lp_mint: Pubkey,
        user_lp_token_account: Pubkey,
        amount: u64,
    ) -> Vec<u8> {
        let (user_info, _) = pda::user_info_address(&user, &lp_mint, &master_chef);
        let (lp_token_vault, _) = pda::lp_token_vault_address(&lp_mint, &master_chef);

        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::Deposit {
                user,
                master_chef,
                user_lp_token_account,
                user_info,
                lp_token_vault,
                token_program: spl_token::id(),
                system_program: solana_sdk::system_program::id(),
            }
            .to_account_metas(None),
            data: instruction::Deposit { lp_mint, amount }.data(),
        };

        Self::create_message_with_instructions(&user, vec![ix])
    }

    /// Prepares a `withdraw` transaction.
    pub fn prepare_withdraw(
        &self,
        user: Pubkey,
        master_chef: Pubkey,
        lp_mint: Pubkey,
        user_lp_token_account: Pubkey,
        amount: u64,
    ) -> Vec<u8> {
        let (user_info, _) = pda::user_info_address(&user, &lp_mint, &master_chef);
        let (lp_token_vault, _) = pda::lp_token_vault_address(&lp_mint, &master_chef);
        let (lp_token_vault_authority, _) =
            pda::lp_token_vault_authority_address(&lp_mint, &master_chef);

        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::Withdraw {
                user,
                master_chef,
                user_lp_token_account,
                user_info,
                lp_token_vault,
                lp_token_vault_authority,
                token_program: spl_token::id(),
            }
            .to_account_metas(None),
            data: instruction::Withdraw { lp_mint, amount }.data(),
        };

        Self::create_message_with_instructions(&user, vec![ix])
    }

    /// Prepares a `claim_reward` transaction. The payout lands in the user's
    /// associated token account for the reward mint, created on first claim.
    pub fn prepare_claim_reward(
        &self,
        user: Pubkey,
        master_chef: Pubkey,
        lp_mint: Pubkey,
        reward_mint: Pubkey,
    ) -> Vec<u8> {
        let (user_info, _) = pda::user_info_address(&user, &lp_mint, &master_chef);
        let (reward_token_vault, _) = pda::reward_token_vault_address(&lp_mint, &master_chef);
        let (reward_token_vault_authority, _) =
            pda::reward_token_vault_authority_address(&lp_mint, &master_chef);
        let user_reward_token_account =
            spl_associated_token_account::get_associated_token_address(&user, &reward_mint);

        let ix = Instruction {
            program_id: masterchef_program::ID,
            accounts: accounts::ClaimReward {
                master_chef,
                user,
                reward_mint,
                user_reward_token_account,
                user_info,
                reward_token_vault,
                reward_token_vault_authority,
                token_program: spl_token::id(),
                associated_token_program: spl_associated_token_account::id(),
                system_program: solana_sdk::system_program::id(),
            }
            .to_account_metas(None),
            data: instruction::ClaimReward { lp_mint }.data(),
        };

        Self::create_message_with_instructions(&user, vec![ix])
    }

    // --- Plain Transfers ---

    /// Prepares a single system-program lamport transfer from `from` to `to`.
    pub fn prepare_transfer_lamports(&self, from: Pubkey, to: Pubkey, lamports: u64) -> Vec<u8> {
        let ix = system_instruction::transfer(&from, &to, lamports);
        Self::create_message_with_instructions(&from, vec![ix])
    }
}

/// Decodes prepared message bytes back into a `Message`, e.g. to patch in a
/// fresh blockhash before signing.
pub fn decode_message(bytes: &[u8]) -> anyhow::Result<solana_sdk::message::Message> {
    let (msg, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
    Ok(msg)
}
