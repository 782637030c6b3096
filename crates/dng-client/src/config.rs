//! Provider and logging configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Cluster the provider talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cluster {
    /// In-process ledger with the game program preloaded.
    #[default]
    Localnet,
}

impl FromStr for Cluster {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "localnet" | "local" => Ok(Self::Localnet),
            _ => Err(ConfigError::UnsupportedCluster(s.to_string())),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localnet => f.write_str("localnet"),
        }
    }
}

/// How settled a transaction must be before a request returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Commitment {
    /// Executed by the cluster.
    Processed,
    /// Voted on by a supermajority.
    #[default]
    Confirmed,
    /// Rooted.
    Finalized,
}

impl FromStr for Commitment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            _ => Err(ConfigError::InvalidCommitment(s.to_string())),
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Target cluster.
    pub cluster: Cluster,

    /// Wallet keypair file; `None` means an ephemeral wallet.
    pub wallet: Option<PathBuf>,

    /// Commitment awaited by `rpc()`.
    pub commitment: Commitment,

    /// SOL airdropped to the wallet on a local cluster.
    pub airdrop_sol: u64,

    /// Status polls before giving up on confirmation.
    pub confirm_attempts: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::Localnet,
            wallet: None,
            commitment: Commitment::Confirmed,
            airdrop_sol: 10,
            confirm_attempts: 30,
        }
    }
}

impl ProviderConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DNG_CLUSTER`: `localnet` or `local` (default: localnet)
    /// - `DNG_WALLET`: keypair JSON file (default: ephemeral keypair)
    /// - `DNG_COMMITMENT`: processed, confirmed or finalized (default: confirmed)
    /// - `DNG_AIRDROP_SOL`: wallet funding on localnet (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`ProviderConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            cluster: non_empty("DNG_CLUSTER")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.cluster),

            wallet: non_empty("DNG_WALLET").map(PathBuf::from),

            commitment: non_empty("DNG_COMMITMENT")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(defaults.commitment),

            airdrop_sol: match non_empty("DNG_AIRDROP_SOL") {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: "DNG_AIRDROP_SOL",
                        value: value.clone(),
                    })?,
                None => defaults.airdrop_sol,
            },

            confirm_attempts: defaults.confirm_attempts,
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (trace, debug, info, warn, error or a full `EnvFilter`).
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl LogConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DNG_LOG_LEVEL` or `RUST_LOG`: filter (default: info)
    /// - `DNG_JSON_LOGS`: `true`/`1` for JSON output (default: false)
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`LogConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_level: lookup("DNG_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            json_logs: lookup("DNG_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
