//! System program instructions and their builders.

use serde::{Deserialize, Serialize};
use shared_types::{AccountMeta, Instruction, Pubkey, SYSTEM_PROGRAM_ID};

use crate::domain::NONCE_ACCOUNT_LENGTH;

/// Instructions understood by the system program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemInstruction {
    /// Create a new account.
    ///
    /// Accounts:
    /// 0. `[writable, signer]` funding account
    /// 1. `[writable, signer]` new account
    CreateAccount {
        /// Lamports to transfer to the new account.
        lamports: u64,
        /// Bytes of data to allocate.
        space: u64,
        /// Owner of the new account.
        owner: Pubkey,
    },

    /// Assign an account to a program.
    ///
    /// Accounts:
    /// 0. `[writable, signer]` assigned account
    Assign {
        /// New owner.
        owner: Pubkey,
    },

    /// Transfer lamports.
    ///
    /// Accounts:
    /// 0. `[writable, signer]` funding account
    /// 1. `[writable]` recipient
    Transfer {
        /// Amount to move.
        lamports: u64,
    },

    /// Consume the stored nonce, replacing it with one derived from the
    /// newest blockhash.
    ///
    /// Accounts:
    /// 0. `[writable]` nonce account
    /// 1. `[signer]` nonce authority
    AdvanceNonceAccount,

    /// Withdraw lamports from a nonce account.
    ///
    /// Accounts:
    /// 0. `[writable]` nonce account
    /// 1. `[writable]` recipient
    /// 2. `[signer]` nonce authority
    WithdrawNonceAccount(u64),

    /// Initialize a nonce account with the given authority.
    ///
    /// Accounts:
    /// 0. `[writable]` nonce account
    InitializeNonceAccount(Pubkey),

    /// Change a nonce account's authority.
    ///
    /// Accounts:
    /// 0. `[writable]` nonce account
    /// 1. `[signer]` current authority
    AuthorizeNonceAccount(Pubkey),
}

impl SystemInstruction {
    /// Encode as instruction data (bincode layout).
    #[must_use]
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(52);
        match self {
            Self::CreateAccount {
                lamports,
                space,
                owner,
            } => {
                out.extend_from_slice(&0u32.to_le_bytes());
                out.extend_from_slice(&lamports.to_le_bytes());
                out.extend_from_slice(&space.to_le_bytes());
                out.extend_from_slice(owner.as_bytes());
            }
            Self::Assign { owner } => {
                out.extend_from_slice(&1u32.to_le_bytes());
                out.extend_from_slice(owner.as_bytes());
            }
            Self::Transfer { lamports } => {
                out.extend_from_slice(&2u32.to_le_bytes());
                out.extend_from_slice(&lamports.to_le_bytes());
            }
            Self::AdvanceNonceAccount => out.extend_from_slice(&3u32.to_le_bytes()),
            Self::WithdrawNonceAccount(lamports) => {
                out.extend_from_slice(&4u32.to_le_bytes());
                out.extend_from_slice(&lamports.to_le_bytes());
            }
            Self::InitializeNonceAccount(authority) => {
                out.extend_from_slice(&5u32.to_le_bytes());
                out.extend_from_slice(authority.as_bytes());
            }
            Self::AuthorizeNonceAccount(authority) => {
                out.extend_from_slice(&6u32.to_le_bytes());
                out.extend_from_slice(authority.as_bytes());
            }
        }
        out
    }

    /// Decode instruction data.
    pub fn unpack(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }

    fn into_instruction(self, accounts: Vec<AccountMeta>) -> Instruction {
        Instruction::new_with_bytes(SYSTEM_PROGRAM_ID, &self.pack(), accounts)
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

/// Create `to` with `space` bytes owned by `owner`, funded by `from`.
#[must_use]
pub fn create_account(
    from: &Pubkey,
    to: &Pubkey,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Instruction {
    SystemInstruction::CreateAccount {
        lamports,
        space,
        owner: *owner,
    }
    .into_instruction(vec![AccountMeta::new(*from, true), AccountMeta::new(*to, true)])
}

/// Assign `pubkey` to `owner`.
#[must_use]
pub fn assign(pubkey: &Pubkey, owner: &Pubkey) -> Instruction {
    SystemInstruction::Assign { owner: *owner }
        .into_instruction(vec![AccountMeta::new(*pubkey, true)])
}

/// Move `lamports` from `from` to `to`.
#[must_use]
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    SystemInstruction::Transfer { lamports }
        .into_instruction(vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)])
}

/// Create and initialize a nonce account in one go.
#[must_use]
pub fn create_nonce_account(
    from: &Pubkey,
    nonce: &Pubkey,
    authority: &Pubkey,
    lamports: u64,
) -> Vec<Instruction> {
    vec![
        create_account(
            from,
            nonce,
            lamports,
            NONCE_ACCOUNT_LENGTH as u64,
            &SYSTEM_PROGRAM_ID,
        ),
        SystemInstruction::InitializeNonceAccount(*authority)
            .into_instruction(vec![AccountMeta::new(*nonce, false)]),
    ]
}

/// Advance a nonce. Must be the first instruction of a durable transaction.
#[must_use]
pub fn advance_nonce_account(nonce: &Pubkey, authority: &Pubkey) -> Instruction {
    SystemInstruction::AdvanceNonceAccount.into_instruction(vec![
        AccountMeta::new(*nonce, false),
        AccountMeta::new_readonly(*authority, true),
    ])
}

/// Withdraw `lamports` from a nonce account.
#[must_use]
pub fn withdraw_nonce_account(
    nonce: &Pubkey,
    authority: &Pubkey,
    to: &Pubkey,
    lamports: u64,
) -> Instruction {
    SystemInstruction::WithdrawNonceAccount(lamports).into_instruction(vec![
        AccountMeta::new(*nonce, false),
        AccountMeta::new(*to, false),
        AccountMeta::new_readonly(*authority, true),
    ])
}

/// Hand a nonce account to `new_authority`.
#[must_use]
pub fn authorize_nonce_account(
    nonce: &Pubkey,
    authority: &Pubkey,
    new_authority: &Pubkey,
) -> Instruction {
    SystemInstruction::AuthorizeNonceAccount(*new_authority).into_instruction(vec![
        AccountMeta::new(*nonce, false),
        AccountMeta::new_readonly(*authority, true),
    ])
}
