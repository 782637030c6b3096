//! # SHA-256 Hashing
//!
//! One-shot and multi-part hashing producing ledger `Hash` values.

use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Hash data with SHA-256 (one-shot).
pub fn hash(data: &[u8]) -> Hash {
    hashv(&[data])
}

/// Hash the concatenation of several inputs.
pub fn hashv(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    Hash::new_from_array(hasher.finalize().into())
}
