//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger rules: time, rent, fees, blockhash expiry, durable nonces and
//! the account-change invariants.
//! NO I/O, NO async.

pub mod blockhash_queue;
pub mod entities;
pub mod invariants;
pub mod nonce;

pub use blockhash_queue::*;
pub use entities::*;
pub use invariants::*;
pub use nonce::*;
