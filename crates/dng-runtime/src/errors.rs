//! # Error Types
//!
//! Errors raised while executing instructions and processing transactions.

use shared_types::SanitizeError;
use thiserror::Error;

// =============================================================================
// INSTRUCTION ERRORS
// =============================================================================

/// Errors a program (or the runtime on its behalf) returns for one instruction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstructionError {
    /// Failure with no more specific cause.
    #[error("generic instruction error")]
    GenericError,

    /// Instruction data could not be decoded.
    #[error("invalid instruction data")]
    InvalidInstructionData,

    /// An argument is out of range or inconsistent.
    #[error("invalid program argument")]
    InvalidArgument,

    /// Account data could not be decoded.
    #[error("invalid account data for instruction")]
    InvalidAccountData,

    /// Account data is shorter than required.
    #[error("account data too small for instruction")]
    AccountDataTooSmall,

    /// An account lacks the lamports the instruction needs.
    #[error("insufficient funds for instruction")]
    InsufficientFunds,

    /// A required signature is missing.
    #[error("missing required signature for instruction")]
    MissingRequiredSignature,

    /// Account was already initialized.
    #[error("instruction requires an uninitialized account")]
    AccountAlreadyInitialized,

    /// Account has not been initialized.
    #[error("instruction requires an initialized account")]
    UninitializedAccount,

    /// Fewer accounts were passed than the instruction expects.
    #[error("insufficient account keys for instruction")]
    NotEnoughAccountKeys,

    /// Account is owned by a program other than the expected one.
    #[error("instruction passed an account with the wrong owner")]
    InvalidAccountOwner,

    /// Seeds do not derive a valid program address.
    #[error("invalid seeds for program address")]
    InvalidSeeds,

    /// A cross-program invocation asked for more privilege than the caller has.
    #[error("cross-program invocation with unauthorized signer or writable account")]
    PrivilegeEscalation,

    /// A cross-program invocation referenced an account the caller was not given.
    #[error("an account required by the instruction is missing")]
    MissingAccount,

    /// Program id is not a registered builtin.
    #[error("unsupported program id")]
    UnsupportedProgramId,

    /// Cross-program invocation nesting exceeded the limit.
    #[error("cross-program invocation call depth too deep")]
    CallDepth,

    /// A read-only account's data was modified.
    #[error("instruction modified data of a read-only account")]
    ReadonlyDataModified,

    /// A read-only account's lamports changed.
    #[error("instruction changed the balance of a read-only account")]
    ReadonlyLamportChange,

    /// A program debited an account it does not own.
    #[error("instruction spent from the balance of an account it does not own")]
    ExternalAccountLamportSpend,

    /// A program modified data of an account it does not own.
    #[error("instruction modified data of an account it does not own")]
    ExternalAccountDataModified,

    /// Account owner changed illegally.
    #[error("instruction illegally modified the program id of an account")]
    ModifiedProgramId,

    /// An executable account was modified.
    #[error("instruction changed executable accounts data")]
    ExecutableModified,

    /// Lamports were created or destroyed.
    #[error("sum of account balances before and after instruction do not match")]
    UnbalancedInstruction,

    /// Arithmetic overflowed.
    #[error("program arithmetic overflowed")]
    ArithmeticOverflow,

    /// Program-specific error code.
    #[error("custom program error: {0:#x}")]
    Custom(u32),
}

// =============================================================================
// TRANSACTION ERRORS
// =============================================================================

/// Reasons a transaction is rejected or fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// Message structure is invalid.
    #[error("transaction failed to sanitize: {0}")]
    SanitizeFailure(#[from] SanitizeError),

    /// A transaction with this signature was already processed.
    #[error("this transaction has already been processed")]
    AlreadyProcessed,

    /// A signature did not verify.
    #[error("transaction did not pass signature verification")]
    SignatureFailure,

    /// Neither a recent blockhash nor a valid durable nonce.
    #[error("blockhash not found")]
    BlockhashNotFound,

    /// The fee payer does not exist.
    #[error("attempt to debit an account but found no record of a prior credit")]
    AccountNotFound,

    /// The fee payer cannot cover the fee.
    #[error("insufficient funds for fee")]
    InsufficientFundsForFee,

    /// The fee payer is not a system-owned account.
    #[error("this account may not be used to pay transaction fees")]
    InvalidAccountForFee,

    /// An instruction failed; the index is the instruction's position.
    #[error("error processing instruction {0}: {1}")]
    InstructionError(u8, InstructionError),

    /// An account with data would be left below the rent-exempt minimum.
    #[error("transaction results in account {account_index} with insufficient funds for rent")]
    InsufficientFundsForRent { account_index: u8 },
}

impl TransactionError {
    /// Returns true if the fee was charged despite the failure.
    #[must_use]
    pub fn fee_charged(&self) -> bool {
        matches!(
            self,
            Self::InstructionError(..) | Self::InsufficientFundsForRent { .. }
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
