//! # Durable Nonce Game Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # Local cluster, funded players, error helpers
//! │
//! ├── integration/      # Client-driven flows against a local cluster
//! │   ├── smoke.rs      # "Is initialized!"
//! │   ├── game_flow.rs
//! │   └── durable_nonce.rs
//! │
//! └── exploits/         # Attack simulations
//!     ├── replay.rs
//!     └── vault_drain.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p dng-tests
//!
//! # By category
//! cargo test -p dng-tests integration::
//! cargo test -p dng-tests exploits::
//!
//! # Verbose logs from the smoke test
//! DNG_LOG_LEVEL=debug cargo test -p dng-tests is_initialized -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p dng-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod exploits;
pub mod harness;
pub mod integration;
