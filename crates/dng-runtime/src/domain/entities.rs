//! # Core Domain Entities
//!
//! Clock, rent and fee parameters plus the per-transaction status record.

use serde::{Deserialize, Serialize};
use shared_types::Pubkey;

use crate::errors::TransactionError;

/// Slots per epoch.
pub const DEFAULT_SLOTS_PER_EPOCH: u64 = 432_000;

/// Target slot duration in milliseconds.
pub const DEFAULT_SLOT_DURATION_MS: u64 = 400;

/// Fee charged per required signature.
pub const DEFAULT_LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Number of recent blockhashes a transaction may reference.
pub const MAX_RECENT_BLOCKHASHES: usize = 150;

/// Largest account the system program will allocate (10 MiB).
pub const MAX_PERMITTED_DATA_LENGTH: u64 = 10 * 1024 * 1024;

// =============================================================================
// CLOCK
// =============================================================================

/// Ledger time as seen by programs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Current slot.
    pub slot: u64,
    /// Current epoch.
    pub epoch: u64,
    /// Estimated wall-clock time of the slot, in unix seconds.
    pub unix_timestamp: i64,
}

// =============================================================================
// RENT
// =============================================================================

/// Rent-exemption parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rent {
    /// Lamports per byte-year.
    pub lamports_per_byte_year: u64,
    /// Years of rent an account must hold to be exempt.
    pub exemption_threshold_years: u64,
}

impl Rent {
    /// Fixed per-account overhead counted as storage.
    pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

    /// Minimum lamports for an account holding `data_len` bytes to be rent exempt.
    #[must_use]
    pub fn minimum_balance(&self, data_len: usize) -> u64 {
        (Self::ACCOUNT_STORAGE_OVERHEAD + data_len as u64)
            * self.lamports_per_byte_year
            * self.exemption_threshold_years
    }

    /// Whether `lamports` exempts an account of `data_len` bytes.
    #[must_use]
    pub fn is_exempt(&self, lamports: u64, data_len: usize) -> bool {
        lamports >= self.minimum_balance(data_len)
    }
}

impl Default for Rent {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3_480,
            exemption_threshold_years: 2,
        }
    }
}

// =============================================================================
// FEES
// =============================================================================

/// Transaction fee schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeStructure {
    /// Lamports charged per required signature.
    pub lamports_per_signature: u64,
}

impl FeeStructure {
    /// Fee for a transaction with `num_signatures` required signatures.
    #[must_use]
    pub fn calculate_fee(&self, num_signatures: usize) -> u64 {
        self.lamports_per_signature
            .saturating_mul(num_signatures as u64)
    }
}

impl Default for FeeStructure {
    fn default() -> Self {
        Self {
            lamports_per_signature: DEFAULT_LAMPORTS_PER_SIGNATURE,
        }
    }
}

// =============================================================================
// BANK CONFIG
// =============================================================================

/// Bank configuration.
#[derive(Debug, Clone)]
pub struct BankConfig {
    /// Unix timestamp of slot 0.
    pub genesis_unix_timestamp: i64,
    /// Milliseconds per slot.
    pub slot_duration_ms: u64,
    /// Slots per epoch.
    pub slots_per_epoch: u64,
    /// Fee schedule.
    pub fees: FeeStructure,
    /// Rent parameters.
    pub rent: Rent,
    /// Lamports minted to the faucet at genesis.
    pub faucet_lamports: u64,
}

impl Default for BankConfig {
    fn default() -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);
        Self {
            genesis_unix_timestamp: now,
            slot_duration_ms: DEFAULT_SLOT_DURATION_MS,
            slots_per_epoch: DEFAULT_SLOTS_PER_EPOCH,
            fees: FeeStructure::default(),
            rent: Rent::default(),
            faucet_lamports: 500_000_000 * shared_types::LAMPORTS_PER_SOL,
        }
    }
}

// =============================================================================
// TRANSACTION STATUS
// =============================================================================

/// Outcome of a processed transaction, kept in the status cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatus {
    /// Slot the transaction was processed in.
    pub slot: u64,
    /// `None` on success.
    pub err: Option<TransactionError>,
    /// Fee charged to the payer.
    pub fee: u64,
    /// Program log lines.
    pub logs: Vec<String>,
}

impl TransactionStatus {
    /// Whether the transaction succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.err.is_none()
    }
}

/// Result of running a transaction without committing it.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// `None` if the transaction would succeed.
    pub err: Option<TransactionError>,
    /// Program log lines.
    pub logs: Vec<String>,
    /// Post-execution accounts, in message key order.
    pub accounts: Vec<(Pubkey, shared_types::Account)>,
}
