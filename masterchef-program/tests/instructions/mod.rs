#![allow(dead_code)]

pub mod admin;

use base64::{engine::general_purpose, Engine as _};
use litesvm::types::{FailedTransactionMetadata, TransactionMetadata};
use litesvm::LiteSVM;
use solana_program::clock::Clock;
use solana_program::program_pack::Pack;
use solana_program::{instruction::Instruction, pubkey::Pubkey};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, signature::Keypair, signer::Signer,
    transaction::Transaction,
};
use solana_system_interface::instruction as system_instruction;

use masterchef_program::state::{MasterChef, PoolInfo, UserInfo};

/// A constant path to the compiled on-chain program binary (`.so` file).
/// This is used by `setup_svm` to load the program into the test environment.
const PATH_SBF: &str = "../target/deploy/masterchef_program.so";

/// Initializes the `LiteSVM` test environment and loads the MasterChef
/// program into it. Every test starts from a fresh, sandboxed virtual
/// blockchain produced by this function.
pub fn setup_svm() -> LiteSVM {
    let mut svm = LiteSVM::new();
    svm.add_program_from_file(masterchef_program::ID, PATH_SBF)
        .unwrap();
    // Initialize the Clock sysvar, as reward accrual depends on the slot.
    svm.set_sysvar(&Clock::default());
    svm
}

/// A simple wrapper for `Keypair::new()` for consistency across tests.
pub fn create_keypair() -> Keypair {
    Keypair::new()
}

/// Creates a new `Keypair` and funds its on-chain account with `lamports`.
pub fn create_funded_keypair(svm: &mut LiteSVM, lamports: u64) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), lamports).unwrap();
    keypair
}

/// Advances the Clock sysvar by `slots`, simulating the passage of time
/// between transactions so that rewards accrue.
pub fn advance_slots(svm: &mut LiteSVM, slots: u64) {
    let mut clock = svm.get_sysvar::<Clock>();
    clock.slot += slots;
    svm.set_sysvar(&clock);
}

/// Constructs, signs, and sends a transaction, returning the raw result so
/// failure-case tests can inspect the error.
pub fn try_build_and_send_tx(
    svm: &mut LiteSVM,
    instructions: Vec<Instruction>,
    payer_and_signer: &Keypair,
    additional_signers: Vec<&Keypair>,
) -> Result<TransactionMetadata, FailedTransactionMetadata> {
    let mut signers = vec![payer_and_signer];
    signers.extend(additional_signers);

    let mut all_instructions = vec![ComputeBudgetInstruction::set_compute_unit_limit(400_000)];
    all_instructions.extend(instructions);

    // A fresh blockhash per transaction keeps repeated identical
    // instructions from being rejected as duplicates.
    svm.expire_blockhash();

    let mut tx = Transaction::new_with_payer(&all_instructions, Some(&payer_and_signer.pubkey()));
    tx.sign(&signers, svm.latest_blockhash());

    advance_slots(svm, 1);

    svm.send_transaction(tx)
}

/// The workhorse for executing instructions: like `try_build_and_send_tx`,
/// but panics on failure and returns the transaction logs.
pub fn build_and_send_tx(
    svm: &mut LiteSVM,
    instructions: Vec<Instruction>,
    payer_and_signer: &Keypair,
    additional_signers: Vec<&Keypair>,
) -> Vec<String> {
    let result = try_build_and_send_tx(svm, instructions, payer_and_signer, additional_signers)
        .expect("Transaction failed");
    result.logs
}

/// Decodes every `Program data:` log line that carries an event of type `E`.
pub fn parse_events<E>(logs: &[String]) -> Vec<E>
where
    E: anchor_lang::Event + anchor_lang::AnchorDeserialize + anchor_lang::Discriminator,
{
    let mut events = Vec::new();
    for log in logs {
        if let Some(data_str) = log.strip_prefix("Program data: ") {
            if let Ok(bytes) = general_purpose::STANDARD.decode(data_str.trim()) {
                if bytes.len() > E::DISCRIMINATOR.len() {
                    let (disc_bytes, event_data) = bytes.split_at(E::DISCRIMINATOR.len());
                    if disc_bytes == E::DISCRIMINATOR {
                        if let Ok(e) = E::try_from_slice(event_data) {
                            events.push(e);
                        }
                    }
                }
            }
        }
    }
    events
}

/// Extracts the custom program error code from a failed transaction.
/// Used by failure-case tests to assert that the expected error fired.
pub fn get_error_code(
    result: Result<TransactionMetadata, FailedTransactionMetadata>,
) -> Option<u32> {
    match result {
        Err(failed_meta) => match failed_meta.err {
            solana_sdk::transaction::TransactionError::InstructionError(
                _,
                solana_sdk::instruction::InstructionError::Custom(code),
            ) => Some(code),
            _ => None,
        },
        _ => {
            println!("Unexpected transaction result: {result:?}");
            None
        }
    }
}

// --- SPL token fixtures ---

/// Creates a new SPL mint with 9 decimals whose mint authority is `payer`.
pub fn create_mint(svm: &mut LiteSVM, payer: &Keypair) -> Pubkey {
    let mint = Keypair::new();
    let rent = svm.minimum_balance_for_rent_exemption(spl_token::state::Mint::LEN);
    let instructions = vec![
        system_instruction::create_account(
            &payer.pubkey(),
            &mint.pubkey(),
            rent,
            spl_token::state::Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint2(
            &spl_token::id(),
            &mint.pubkey(),
            &payer.pubkey(),
            None,
            9,
        )
        .unwrap(),
    ];
    build_and_send_tx(svm, instructions, payer, vec![&mint]);
    mint.pubkey()
}

/// Creates the associated token account of `owner` for `mint`.
pub fn create_ata(svm: &mut LiteSVM, payer: &Keypair, mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    let ix = spl_associated_token_account::instruction::create_associated_token_account(
        &payer.pubkey(),
        owner,
        mint,
        &spl_token::id(),
    );
    build_and_send_tx(svm, vec![ix], payer, vec![]);
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

/// Mints `amount` tokens to `destination`; `mint_authority` must be the
/// mint's authority (the payer that created it).
pub fn mint_tokens(
    svm: &mut LiteSVM,
    mint_authority: &Keypair,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) {
    let ix = spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        destination,
        &mint_authority.pubkey(),
        &[],
        amount,
    )
    .unwrap();
    build_and_send_tx(svm, vec![ix], mint_authority, vec![]);
}

/// Reads the token balance of an SPL token account.
pub fn token_balance(svm: &LiteSVM, token_account: &Pubkey) -> u64 {
    let account = svm.get_account(token_account).unwrap();
    spl_token::state::Account::unpack(&account.data)
        .unwrap()
        .amount
}

// --- On-chain state readers ---

/// Fetches and copies the zero-copy `MasterChef` account.
pub fn fetch_master_chef(svm: &LiteSVM, master_chef: &Pubkey) -> MasterChef {
    let account = svm.get_account(master_chef).unwrap();
    bytemuck::pod_read_unaligned::<MasterChef>(&account.data[8..])
}

/// Fetches the pool for `lp_mint` out of the `MasterChef` account.
pub fn fetch_pool(svm: &LiteSVM, master_chef: &Pubkey, lp_mint: &Pubkey) -> PoolInfo {
    let chef = fetch_master_chef(svm, master_chef);
    *chef
        .pools
        .iter()
        .find(|p| p.is_initialized() && p.lp_mint == *lp_mint)
        .expect("pool not found")
}

/// Fetches and deserializes a `UserInfo` account.
pub fn fetch_user_info(svm: &LiteSVM, user_info: &Pubkey) -> UserInfo {
    use anchor_lang::AccountDeserialize;
    let account = svm.get_account(user_info).unwrap();
    UserInfo::try_deserialize(&mut account.data.as_slice()).unwrap()
}

/// Standard two-mint scenario used by most tests: a funded admin, an
/// initialized MasterChef, and fresh reward/LP mints under the admin's
/// mint authority.
pub fn setup_master_chef(svm: &mut LiteSVM) -> (Keypair, Pubkey, Pubkey, Pubkey) {
    let admin = create_funded_keypair(svm, 10 * solana_program::native_token::LAMPORTS_PER_SOL);
    let master_chef = admin::initialize(svm, &admin);
    let reward_mint = create_mint(svm, &admin);
    let lp_mint = create_mint(svm, &admin);
    (admin, master_chef, reward_mint, lp_mint)
}
