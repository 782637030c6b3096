//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the runtime's driven ports.

pub mod memory_accounts;

pub use memory_accounts::*;
