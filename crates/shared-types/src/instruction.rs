//! # Instructions
//!
//! A program invocation as authored by a client, plus its compiled form that
//! references accounts by index into a message's key list.

use serde::{Deserialize, Serialize};

use crate::entities::Pubkey;

/// Describes one account passed to an instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    /// Account address.
    pub pubkey: Pubkey,
    /// Whether the transaction must carry this account's signature.
    pub is_signer: bool,
    /// Whether the instruction may modify the account.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    #[must_use]
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    #[must_use]
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// A single program invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Program that processes this instruction.
    pub program_id: Pubkey,
    /// Accounts the program reads or writes, in the order it expects them.
    pub accounts: Vec<AccountMeta>,
    /// Program-specific input.
    pub data: Vec<u8>,
}

impl Instruction {
    /// Creates an instruction with raw data.
    #[must_use]
    pub fn new_with_bytes(program_id: Pubkey, data: &[u8], accounts: Vec<AccountMeta>) -> Self {
        Self {
            program_id,
            accounts,
            data: data.to_vec(),
        }
    }

    /// Creates an instruction whose data is the bincode encoding of `data`.
    pub fn new_with_bincode<T: Serialize>(
        program_id: Pubkey,
        data: &T,
        accounts: Vec<AccountMeta>,
    ) -> Result<Self, bincode::Error> {
        Ok(Self {
            program_id,
            accounts,
            data: bincode::serialize(data)?,
        })
    }
}

/// An instruction whose program and accounts are indices into a message's keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledInstruction {
    /// Index of the program id.
    pub program_id_index: u8,
    /// Indices of the accounts, in instruction order.
    pub accounts: Vec<u8>,
    /// Program-specific input.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    enum Sample {
        Ping(u32),
    }

    #[test]
    fn test_account_meta_flags() {
        let key = Pubkey::new_unique();
        let writable = AccountMeta::new(key, true);
        assert!(writable.is_signer && writable.is_writable);

        let readonly = AccountMeta::new_readonly(key, false);
        assert!(!readonly.is_signer && !readonly.is_writable);
    }

    #[test]
    fn test_new_with_bincode_encodes_data() {
        let program = Pubkey::new_unique();
        let ix = Instruction::new_with_bincode(program, &Sample::Ping(7), vec![]).unwrap();
        // u32 variant tag followed by the u32 payload.
        assert_eq!(ix.data, vec![0, 0, 0, 0, 7, 0, 0, 0]);
        assert_eq!(ix.program_id, program);
    }
}
