//! Client error types.

use dng_runtime::TransactionError;
use shared_crypto::CryptoError;
use shared_types::{Pubkey, Signature};
use thiserror::Error;

/// Invalid environment configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Only the in-process local cluster can be reached.
    #[error("unsupported cluster '{0}' (expected localnet)")]
    UnsupportedCluster(String),

    /// Commitment is not one of processed, confirmed or finalized.
    #[error("invalid commitment '{0}'")]
    InvalidCommitment(String),

    /// A numeric variable did not parse.
    #[error("invalid value '{value}' for {var}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Errors surfaced by the provider, workspace and request builders.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Environment configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Key handling or signing failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// No program with this name in the workspace.
    #[error("program '{0}' not found in workspace")]
    ProgramNotFound(String),

    /// The program id has no executable account on the cluster.
    #[error("program '{name}' ({program_id}) is not deployed")]
    ProgramNotDeployed {
        /// Workspace name.
        name: String,
        /// Expected program id.
        program_id: Pubkey,
    },

    /// An account the request needs does not exist.
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    /// Account data could not be decoded as the expected type.
    #[error("account {pubkey} could not be decoded: {reason}")]
    AccountDecode {
        /// Account address.
        pubkey: Pubkey,
        /// What went wrong.
        reason: String,
    },

    /// The cluster refused the transaction before executing it.
    #[error("transaction rejected: {0}")]
    Rejected(#[from] TransactionError),

    /// The transaction landed but failed.
    #[error("transaction {signature} failed: {err}")]
    Transaction {
        /// Transaction id.
        signature: Signature,
        /// Failure reason.
        err: TransactionError,
        /// Program logs up to the failure.
        logs: Vec<String>,
    },

    /// No status at the requested commitment after polling.
    #[error("transaction {0} was not confirmed")]
    Unconfirmed(Signature),
}

impl ClientError {
    /// Program logs for a failed transaction, if any.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        match self {
            Self::Transaction { logs, .. } => logs,
            _ => &[],
        }
    }

    /// The transaction error behind a rejection or failure.
    #[must_use]
    pub fn transaction_error(&self) -> Option<&TransactionError> {
        match self {
            Self::Rejected(err) | Self::Transaction { err, .. } => Some(err),
            _ => None,
        }
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
