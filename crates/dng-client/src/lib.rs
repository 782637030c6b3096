//! # DNG Client - Provider, Workspace and Requests
//!
//! **Role:** everything a test or tool needs to talk to the durable nonce game
//!
//! ## Purpose
//!
//! Reads the environment into a [`Provider`] (cluster connection plus paying
//! wallet), resolves programs by name through a [`Workspace`], and builds,
//! signs and confirms requests. Requests can be signed against a durable
//! nonce and submitted later.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Config | `config.rs` | `DNG_*` environment variables |
//! | RpcClient | `ports/outbound.rs` | Async cluster access |
//! | LocalCluster | `adapters/local_cluster.rs` | In-process cluster |
//! | Provider | `provider.rs` | Sign, send, confirm |
//! | Workspace | `workspace.rs` | Program lookup by name |
//! | RequestBuilder | `request.rs` | One program request |
//! | Game client | `game.rs` | Typed game instructions and account readers |
//! | Nonces | `nonce.rs` | Create, advance and read nonce accounts |
//! | Telemetry | `telemetry.rs` | `tracing` subscriber setup |
//!
//! ## Usage Example
//!
//! ```ignore
//! use dng_client::prelude::*;
//!
//! let provider = Provider::env().await?;
//! let program = Workspace::new(provider).program("DurableNonceGame").await?;
//! let signature = program.methods().initialize().rpc().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod game;
pub mod nonce;
pub mod ports;
pub mod provider;
pub mod request;
pub mod telemetry;
pub mod workspace;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::LocalCluster;
    pub use crate::config::{Cluster, Commitment, LogConfig, ProviderConfig};
    pub use crate::errors::{ClientError, ClientResult, ConfigError};
    pub use crate::game::{DurableNonceGameClient, Methods};
    pub use crate::nonce::{advance_nonce, create_nonce_account, fetch_nonce};
    pub use crate::ports::{RpcClient, SignatureStatus};
    pub use crate::provider::{Provider, SignerRef};
    pub use crate::request::RequestBuilder;
    pub use crate::telemetry::init_tracing;
    pub use crate::workspace::{ProgramHandle, Workspace};
}

pub use errors::{ClientError, ConfigError};
pub use provider::Provider;
pub use workspace::{ProgramHandle, Workspace};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
