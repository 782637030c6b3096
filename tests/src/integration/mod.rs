//! # Integration Tests
//!
//! Client-driven flows against an in-process cluster: the smoke test,
//! complete games, and moves signed against durable nonces.

pub mod durable_nonce;
pub mod game_flow;
pub mod smoke;
