//! # Domain Layer (Inner Hexagon)
//!
//! The game itself: board rules, the state machine and the account layout.
//! NO I/O, NO runtime access. Handlers in `processor.rs` feed in the signer
//! and the clock and carry out the payouts the state machine decides on.

pub mod game;
pub mod rules;

pub use game::*;
pub use rules::*;
