//! # Error Types
//!
//! Errors raised while parsing or sanitizing ledger primitives.

use thiserror::Error;

/// Failure to parse a hex-encoded key, hash or signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    /// Input is not valid hex.
    #[error("invalid hex encoding")]
    Invalid,

    /// Input decoded to the wrong number of bytes.
    #[error("wrong size: expected {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },
}

/// A message or transaction is structurally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// An index points past the end of the account key list.
    #[error("index out of bounds")]
    IndexOutOfBounds,

    /// Header counts do not agree with the key list.
    #[error("invalid message header")]
    InvalidHeader,

    /// Signature count differs from the number of required signers.
    #[error("signature count mismatch: expected {expected}, got {actual}")]
    SignatureCountMismatch { expected: usize, actual: usize },

    /// Message has no instructions.
    #[error("message contains no instructions")]
    EmptyMessage,
}
