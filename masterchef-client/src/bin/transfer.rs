//! Sends a plain lamport transfer through the [`TransactionBuilder`].
//!
//! The signing keypair is read from a file on disk (the standard JSON byte
//! array produced by `solana-keygen`); it is never embedded in source or
//! configuration.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Signer};
use solana_sdk::transaction::Transaction;

use masterchef_client::client::{decode_message, TransactionBuilder};
use masterchef_client::config::ClientConfig;
use masterchef_client::logging;

#[derive(Parser, Debug)]
#[command(about = "Transfer lamports between wallets", version)]
struct Args {
    /// Path to the signing keypair file.
    #[arg(long)]
    keypair: String,
    /// Recipient wallet address.
    #[arg(long)]
    to: Pubkey,
    /// Amount to send, in lamports.
    #[arg(long, default_value_t = 1)]
    lamports: u64,
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<String>,
    /// Overrides the RPC endpoint from the configuration.
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(rpc_url) = args.rpc_url {
        config.solana.rpc_url = rpc_url;
    }
    logging::init(&config.log)?;

    let payer = read_keypair_file(&args.keypair)
        .map_err(|e| anyhow!("failed to read keypair from '{}': {e}", args.keypair))?;

    let rpc_client = Arc::new(RpcClient::new_with_commitment(
        config.solana.rpc_url.clone(),
        CommitmentConfig {
            commitment: config.solana.commitment,
        },
    ));
    let builder = TransactionBuilder::new(rpc_client);

    tracing::info!(
        from = %payer.pubkey(),
        to = %args.to,
        lamports = args.lamports,
        rpc_url = %config.solana.rpc_url,
        "sending transfer"
    );

    let message_bytes = builder.prepare_transfer_lamports(payer.pubkey(), args.to, args.lamports);
    let message = decode_message(&message_bytes)?;

    let blockhash = builder
        .latest_blockhash()
        .await
        .context("failed to fetch a recent blockhash")?;
    let mut tx = Transaction::new_unsigned(message);
    tx.try_sign(&[&payer], blockhash)?;

    let signature = builder
        .submit_transaction(&tx)
        .await
        .context("transfer failed")?;
    tracing::info!(%signature, "transfer confirmed");

    Ok(())
}
