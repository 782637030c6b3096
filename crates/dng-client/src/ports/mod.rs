//! Ports for the client.
//!
//! The provider depends only on the outbound `RpcClient` port; the local
//! cluster in `adapters` is one implementation.

pub mod outbound;

pub use outbound::*;
