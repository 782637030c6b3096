//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions at the runtime's seams.
//!
//! - **Driving Port (Inbound)**: `BuiltinProgram`, implemented by every
//!   program the bank can execute
//! - **Driven Port (Outbound)**: `AccountsDb`, the account store
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
