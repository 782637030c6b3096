//! Crypto error types.

use shared_types::Pubkey;
use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Keypair bytes do not describe a consistent keypair
    #[error("Invalid keypair bytes")]
    InvalidKeypair,

    /// A signer was supplied whose key the message does not require
    #[error("Keypair {0} is not a required signer")]
    KeypairPubkeyMismatch(Pubkey),

    /// A required signer did not sign
    #[error("Not enough signers: missing {0}")]
    NotEnoughSigners(Pubkey),

    /// Seeds are too many, too long, or derive an on-curve address
    #[error("Invalid seeds for program address")]
    InvalidSeeds,

    /// No bump in 0..=255 yields an off-curve address
    #[error("Unable to find a viable program address bump seed")]
    NoViableBump,

    /// Keypair file could not be read or written
    #[error("Keypair file error: {0}")]
    KeypairFile(#[from] std::io::Error),

    /// Message could not be encoded for signing
    #[error("Message serialization failed: {0}")]
    Serialization(#[from] bincode::Error),

    /// Keypair file is not a JSON byte array
    #[error("Keypair file is malformed: {0}")]
    KeypairFormat(#[from] serde_json::Error),
}
