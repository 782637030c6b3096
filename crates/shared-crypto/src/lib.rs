//! # Shared Crypto - Keys, Hashes and Derived Addresses
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Wallet keys, transaction signatures |
//! | `hashing` | SHA-256 | Blockhashes, durable nonces, discriminators |
//! | `pda` | SHA-256 + curve check | Program-derived addresses |
//! | `signing` | Ed25519 over `Message::serialize` | Transaction signing |
//! | `keypair_file` | JSON byte array | Wallet files on disk |
//!
//! ## Security Properties
//!
//! - **Ed25519**: deterministic nonces, no RNG dependency when signing
//! - **PDAs**: guaranteed off-curve, so no private key can sign for them
//! - Secret key bytes are zeroized when a `Keypair` is dropped

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod keypair_file;
pub mod pda;
pub mod signatures;
pub mod signing;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{hash, hashv};
pub use keypair_file::{read_keypair_file, write_keypair_file};
pub use pda::{create_program_address, find_program_address, MAX_SEEDS, MAX_SEED_LEN};
pub use signatures::{verify_signature, Keypair, Signer};
pub use signing::{sign_transaction, verify_transaction};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
