//! # Durable Nonces
//!
//! A nonce account stores a value derived from a past blockhash. A transaction
//! that uses that value as its `recent_blockhash` stays valid for as long as the
//! stored value is unchanged, instead of expiring with the blockhash queue.
//! Every such transaction must advance the nonce first, so each stored value
//! can be consumed exactly once.

use serde::{Deserialize, Serialize};
use shared_crypto::hashv;
use shared_types::{Hash, Pubkey};

/// Size of a nonce account's data.
pub const NONCE_ACCOUNT_LENGTH: usize = 80;

const DURABLE_NONCE_DOMAIN: &[u8] = b"DURABLE_NONCE";

/// Nonce value derived from `blockhash`.
///
/// Domain-separated so a durable nonce can never equal a live blockhash.
#[must_use]
pub fn durable_nonce_from_blockhash(blockhash: &Hash) -> Hash {
    hashv(&[DURABLE_NONCE_DOMAIN, blockhash.as_ref()])
}

/// Initialized nonce contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceData {
    /// Key allowed to advance, withdraw and re-authorize.
    pub authority: Pubkey,
    /// Value a transaction must carry as `recent_blockhash`.
    pub durable_nonce: Hash,
    /// Fee rate captured when the nonce was last advanced.
    pub lamports_per_signature: u64,
}

/// Nonce account state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonceState {
    /// Allocated but not yet initialized.
    #[default]
    Uninitialized,
    /// Ready for use.
    Initialized(NonceData),
}

/// Versioned envelope stored in the account data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NonceVersions {
    /// Current layout.
    Current(NonceState),
}

impl NonceVersions {
    /// Decode from account data. All-zero data reads as uninitialized.
    #[must_use]
    pub fn from_account_data(data: &[u8]) -> Option<NonceState> {
        if data.len() < NONCE_ACCOUNT_LENGTH {
            return None;
        }
        if data.iter().all(|b| *b == 0) {
            return Some(NonceState::Uninitialized);
        }
        match bincode::deserialize::<NonceVersions>(data).ok()? {
            NonceVersions::Current(state) => Some(state),
        }
    }

    /// Encode `state` into `data`, which must be `NONCE_ACCOUNT_LENGTH` long.
    pub fn write_account_data(state: NonceState, data: &mut [u8]) -> Result<(), bincode::Error> {
        let bytes = bincode::serialize(&NonceVersions::Current(state))?;
        data.fill(0);
        let len = bytes.len().min(data.len());
        data[..len].copy_from_slice(&bytes[..len]);
        Ok(())
    }
}
