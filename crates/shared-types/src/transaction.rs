//! # Transactions
//!
//! A message plus one signature per required signer. Signing itself lives in
//! `shared-crypto` so this crate stays free of key material.

use serde::{Deserialize, Serialize};

use crate::entities::{Hash, Pubkey, Signature};
use crate::errors::SanitizeError;
use crate::instruction::Instruction;
use crate::message::Message;

/// A signed (or partially signed) transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// One signature per required signer, ordered like `message.signer_keys()`.
    pub signatures: Vec<Signature>,
    /// The signed payload.
    pub message: Message,
}

impl Transaction {
    /// Wraps a message with placeholder signatures.
    #[must_use]
    pub fn new_unsigned(message: Message) -> Self {
        let required = usize::from(message.header.num_required_signatures);
        Self {
            signatures: vec![Signature::default(); required],
            message,
        }
    }

    /// Compiles `instructions` with `payer` and leaves signatures empty.
    #[must_use]
    pub fn new_with_payer(instructions: &[Instruction], payer: Option<&Pubkey>) -> Self {
        Self::new_unsigned(Message::new(instructions, payer))
    }

    /// Bytes that every signature covers.
    pub fn message_data(&self) -> Result<Vec<u8>, bincode::Error> {
        self.message.serialize()
    }

    /// The transaction id: its first signature.
    #[must_use]
    pub fn id(&self) -> Signature {
        self.signatures.first().copied().unwrap_or_default()
    }

    /// The blockhash or durable nonce this transaction was signed against.
    #[must_use]
    pub fn recent_blockhash(&self) -> Hash {
        self.message.recent_blockhash
    }

    /// Whether every required signature has been filled in.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        !self.signatures.is_empty() && self.signatures.iter().all(|s| !s.is_placeholder())
    }

    /// Checks the message and that the signature count matches the header.
    pub fn sanitize(&self) -> Result<(), SanitizeError> {
        self.message.sanitize()?;
        let expected = usize::from(self.message.header.num_required_signatures);
        if self.signatures.len() != expected {
            return Err(SanitizeError::SignatureCountMismatch {
                expected,
                actual: self.signatures.len(),
            });
        }
        Ok(())
    }
}
