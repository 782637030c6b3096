//! Adapters Layer (Driven Adapters)
//!
//! ## Adapters
//!
//! - `LocalCluster` - in-process bank with the game program deployed

pub mod local_cluster;

pub use local_cluster::LocalCluster;
