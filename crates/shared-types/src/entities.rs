//! # Core Domain Entities
//!
//! Fixed-size identifiers and the account record stored by the ledger.
//!
//! ## Clusters
//!
//! - **Identity**: `Pubkey`, `Signature`
//! - **Chain**: `Hash` (blockhashes, durable nonces)
//! - **State**: `Account`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::ParseKeyError;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Owner of the builtin programs' executable accounts.
pub const NATIVE_LOADER_ID: Pubkey = Pubkey::new_from_array([
    5, 135, 132, 191, 20, 139, 164, 40, 47, 176, 18, 87, 72, 136, 169, 241, 83, 160, 125, 173,
    247, 101, 192, 69, 92, 154, 151, 3, 128, 0, 0, 0,
]);

/// The system program owns every plain wallet and every nonce account.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0u8; 32]);

// =============================================================================
// PUBKEY (32 bytes)
// =============================================================================

/// A 32-byte account address (an Ed25519 public key or a program-derived address).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Pubkey([u8; 32]);

static UNIQUE_COUNTER: AtomicU64 = AtomicU64::new(1);

impl Pubkey {
    /// Creates a pubkey from a 32-byte array.
    #[must_use]
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a pubkey from a slice. Returns `None` if the length is wrong.
    #[must_use]
    pub fn try_from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(slice).ok().map(Self)
    }

    /// Returns a process-unique pubkey. Intended for tests and fixtures.
    #[must_use]
    pub fn new_unique() -> Self {
        let n = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_be_bytes());
        bytes[31] = 0xEE;
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Returns the underlying bytes by reference.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Pubkey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| ParseKeyError::Invalid)?;
        Self::try_from_slice(&bytes).ok_or(ParseKeyError::WrongSize {
            expected: 32,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte SHA-256 digest: blockhashes and durable nonce values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash([u8; 32]);

impl Hash {
    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Returns the underlying bytes by reference.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| ParseKeyError::Invalid)?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| ParseKeyError::WrongSize {
                expected: 32,
                actual: bytes.len(),
            })
    }
}

// =============================================================================
// SIGNATURE (64 bytes)
// =============================================================================

/// A 64-byte Ed25519 signature.
///
/// The first signature of a transaction is its identifier. The all-zero
/// default is a placeholder for a signature that has not been produced yet.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] [u8; 64]);

impl Signature {
    /// Creates a signature from 64 raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Returns true for the all-zero placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.0 == [0u8; 64]
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self([0u8; 64])
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Signature {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| ParseKeyError::Invalid)?;
        <[u8; 64]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| ParseKeyError::WrongSize {
                expected: 64,
                actual: bytes.len(),
            })
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// An account as stored in the ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Balance in lamports.
    pub lamports: u64,
    /// Opaque data, interpreted by the owning program.
    pub data: Vec<u8>,
    /// Program allowed to debit the account and modify its data.
    pub owner: Pubkey,
    /// Whether this account holds a loadable program.
    pub executable: bool,
}

impl Account {
    /// Creates an account with zeroed data of the given length.
    #[must_use]
    pub fn new(lamports: u64, space: usize, owner: &Pubkey) -> Self {
        Self {
            lamports,
            data: vec![0u8; space],
            owner: *owner,
            executable: false,
        }
    }

    /// A system-owned account with no data, i.e. a plain wallet.
    #[must_use]
    pub fn is_wallet(&self) -> bool {
        self.owner == SYSTEM_PROGRAM_ID && self.data.is_empty()
    }
}
