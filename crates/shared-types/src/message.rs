//! # Messages
//!
//! The signed portion of a transaction.
//!
//! ## Key Ordering
//!
//! Account keys are laid out in four groups so that signer and writable flags
//! can be recovered from three header counts:
//!
//! ```text
//! [ writable signers | readonly signers | writable non-signers | readonly non-signers ]
//!   ^ fee payer is always index 0
//! ```

use serde::{Deserialize, Serialize};

use crate::entities::{Hash, Pubkey};
use crate::errors::SanitizeError;
use crate::instruction::{CompiledInstruction, Instruction};

/// Header counts describing how `account_keys` is partitioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Number of leading keys that must sign.
    pub num_required_signatures: u8,
    /// Number of trailing signer keys that are read-only.
    pub num_readonly_signed_accounts: u8,
    /// Number of trailing non-signer keys that are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// A compiled, signable list of instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Signer/writable partition counts.
    pub header: MessageHeader,
    /// Every account referenced by any instruction, deduplicated.
    pub account_keys: Vec<Pubkey>,
    /// A recent blockhash, or the stored value of a durable nonce.
    pub recent_blockhash: Hash,
    /// Instructions in execution order.
    pub instructions: Vec<CompiledInstruction>,
}

#[derive(Clone, Copy)]
struct KeyFlags {
    key: Pubkey,
    is_signer: bool,
    is_writable: bool,
}

impl KeyFlags {
    fn group(&self) -> u8 {
        match (self.is_signer, self.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        }
    }
}

impl Message {
    /// Compiles instructions into a message with `payer` as fee payer.
    ///
    /// Keys referenced more than once are merged; the merged entry is a
    /// signer (or writable) if any reference required it.
    #[must_use]
    pub fn new(instructions: &[Instruction], payer: Option<&Pubkey>) -> Self {
        let mut keys: Vec<KeyFlags> = Vec::new();
        let mut upsert = |key: Pubkey, is_signer: bool, is_writable: bool| {
            if let Some(existing) = keys.iter_mut().find(|k| k.key == key) {
                existing.is_signer |= is_signer;
                existing.is_writable |= is_writable;
            } else {
                keys.push(KeyFlags {
                    key,
                    is_signer,
                    is_writable,
                });
            }
        };

        if let Some(payer) = payer {
            upsert(*payer, true, true);
        }
        for ix in instructions {
            for meta in &ix.accounts {
                upsert(meta.pubkey, meta.is_signer, meta.is_writable);
            }
        }
        for ix in instructions {
            upsert(ix.program_id, false, false);
        }

        // Stable sort keeps the payer first within the writable-signer group.
        keys.sort_by_key(KeyFlags::group);

        let count = |g: u8| keys.iter().filter(|k| k.group() == g).count();
        let header = MessageHeader {
            num_required_signatures: (count(0) + count(1)) as u8,
            num_readonly_signed_accounts: count(1) as u8,
            num_readonly_unsigned_accounts: count(3) as u8,
        };
        let account_keys: Vec<Pubkey> = keys.iter().map(|k| k.key).collect();

        let position = |key: &Pubkey| {
            account_keys
                .iter()
                .position(|k| k == key)
                .map_or(u8::MAX, |i| i as u8)
        };
        let instructions = instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: position(&ix.program_id),
                accounts: ix.accounts.iter().map(|m| position(&m.pubkey)).collect(),
                data: ix.data.clone(),
            })
            .collect();

        Self {
            header,
            account_keys,
            recent_blockhash: Hash::default(),
            instructions,
        }
    }

    /// The fee payer, if the message has any keys.
    #[must_use]
    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// Whether the key at `index` must sign.
    #[must_use]
    pub fn is_signer(&self, index: usize) -> bool {
        index < usize::from(self.header.num_required_signatures)
    }

    /// Whether the key at `index` may be modified.
    #[must_use]
    pub fn is_writable(&self, index: usize) -> bool {
        let required = usize::from(self.header.num_required_signatures);
        let readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);
        if index < required {
            index < required - readonly_signed
        } else {
            index < self.account_keys.len().saturating_sub(readonly_unsigned)
        }
    }

    /// Keys that must sign, in signature order.
    #[must_use]
    pub fn signer_keys(&self) -> &[Pubkey] {
        let required = usize::from(self.header.num_required_signatures);
        &self.account_keys[..required.min(self.account_keys.len())]
    }

    /// Checks that header counts and every index are consistent.
    pub fn sanitize(&self) -> Result<(), SanitizeError> {
        let keys = self.account_keys.len();
        let required = usize::from(self.header.num_required_signatures);
        let readonly_signed = usize::from(self.header.num_readonly_signed_accounts);
        let readonly_unsigned = usize::from(self.header.num_readonly_unsigned_accounts);

        // The fee payer must exist, sign, and be writable.
        if required == 0 || readonly_signed >= required || required + readonly_unsigned > keys {
            return Err(SanitizeError::InvalidHeader);
        }
        if self.instructions.is_empty() {
            return Err(SanitizeError::EmptyMessage);
        }
        for ix in &self.instructions {
            let program = usize::from(ix.program_id_index);
            if program == 0 || program >= keys {
                return Err(SanitizeError::IndexOutOfBounds);
            }
            if ix.accounts.iter().any(|&i| usize::from(i) >= keys) {
                return Err(SanitizeError::IndexOutOfBounds);
            }
        }
        Ok(())
    }

    /// Bincode bytes covered by signatures.
    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}
