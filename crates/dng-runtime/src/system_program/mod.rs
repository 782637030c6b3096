//! # System Program
//!
//! The builtin that owns every wallet: creates accounts, moves lamports,
//! assigns owners and manages durable nonce accounts.

pub mod instruction;
pub mod processor;

pub use instruction::*;
pub use processor::{SystemError, SystemProgram};
