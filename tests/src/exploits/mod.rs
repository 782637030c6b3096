//! # Attack Simulations
//!
//! Attempts to move stakes or game state without the right signatures.
//!
//! ## Test Categories
//!
//! 1. **Replay** - resubmitting and tampering with signed moves
//! 2. **Vault Drain** - third parties settling, playing or spoofing accounts

pub mod replay;
pub mod vault_drain;
