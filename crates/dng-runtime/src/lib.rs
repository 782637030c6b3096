//! # DNG Runtime - In-Process Ledger
//!
//! **Role:** execution layer beneath the local cluster
//!
//! ## Purpose
//!
//! Holds accounts, runs builtin programs and processes signed transactions
//! with the same rules a validator applies: signature checks, blockhash
//! expiry, durable nonces, fees, rent and the account-ownership rules that
//! keep programs from touching state they do not own.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Only the owner debits or writes an account | `domain/invariants.rs` - `verify_account_change()` |
//! | Read-only and executable accounts never change | `domain/invariants.rs` - `verify_account_change()` |
//! | Lamports are conserved per invocation | `domain/invariants.rs` - `verify_lamports_balanced()` |
//! | Data accounts stay rent exempt | `bank.rs` - `check_rent()` |
//! | A transaction lands at most once | `bank.rs` - status cache |
//! | A durable nonce is consumed exactly once | `system_program/processor.rs` - `advance_nonce()` |
//! | Invocation depth at most 4 | `invoke_context.rs` - `MAX_INVOKE_DEPTH` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Bank | `bank.rs` | Transaction pipeline, clock, blockhashes |
//! | InvokeContext | `invoke_context.rs` | Account access and cross-program invocation |
//! | System program | `system_program/` | Accounts, transfers, durable nonces |
//! | Accounts store | `adapters/memory_accounts.rs` | `AccountsDb` over a `HashMap` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use dng_runtime::prelude::*;
//!
//! let mut bank = Bank::new(BankConfig::default());
//! bank.add_builtin(Arc::new(MyProgram));
//! bank.airdrop(&payer.pubkey(), LAMPORTS_PER_SOL)?;
//! bank.process_transaction(&tx)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod bank;
pub mod domain;
pub mod errors;
pub mod invoke_context;
pub mod ports;
pub mod system_program;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::InMemoryAccounts;
    pub use crate::bank::{Bank, BankStats};
    pub use crate::domain::{
        durable_nonce_from_blockhash, BankConfig, Clock, FeeStructure, NonceData, NonceState,
        NonceVersions, Rent, SimulationResult, TransactionStatus, NONCE_ACCOUNT_LENGTH,
    };
    pub use crate::errors::{InstructionError, TransactionError};
    pub use crate::invoke_context::{InvokeContext, MAX_INVOKE_DEPTH};
    pub use crate::ports::inbound::BuiltinProgram;
    pub use crate::ports::outbound::AccountsDb;
    pub use crate::system_program::{SystemError, SystemInstruction, SystemProgram};
}

pub use bank::Bank;
pub use errors::{InstructionError, TransactionError};
pub use invoke_context::InvokeContext;
pub use ports::inbound::BuiltinProgram;

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
