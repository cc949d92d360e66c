//! A Rust client library for the `masterchef-program` staking contract.
//!
//! This crate provides the building blocks for off-chain services and tools
//! that drive the MasterChef program: deterministic PDA derivation, unsigned
//! transaction construction over an abstract RPC client, and typed parsing
//! of the program's event logs.
//!
//! # Key Components
//!
//! *   [`client::TransactionBuilder`]: A non-custodial helper that prepares
//!     unsigned transaction messages for every program instruction. The
//!     caller signs and submits them, so no secret key ever enters this
//!     library.
//! *   [`pda`]: Derivation of the vault, vault-authority and user-info PDAs
//!     from the program's fixed seed conventions.
//! *   [`events`]: Decoding of `Program data:` transaction log lines into a
//!     typed [`events::ChefEvent`].
//!
//! The crate also ships the `transfer` binary, a small utility that submits
//! a single lamport transfer from a file-loaded keypair.

/// Unsigned transaction construction for all program instructions.
pub mod client;
/// Configuration structures for clients and tools.
pub mod config;
/// Logic for parsing on-chain events from transaction logs.
pub mod events;
/// `tracing` subscriber setup shared by the binaries.
pub mod logging;
/// PDA derivation helpers matching the program's seed conventions.
pub mod pda;
