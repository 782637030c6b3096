//! # Shared Types Crate
//!
//! Ledger primitives shared by the runtime, the game program and the client.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: keys, accounts, instructions and transactions
//!   are defined once here and used by every other crate.
//! - **Deterministic Encoding**: `Message::serialize` is the exact byte string
//!   that signers sign and the runtime verifies.
//! - **No Crypto**: signing and address derivation live in `shared-crypto`.

pub mod entities;
pub mod errors;
pub mod instruction;
pub mod message;
pub mod transaction;

pub use entities::*;
pub use errors::*;
pub use instruction::*;
pub use message::*;
pub use transaction::*;
