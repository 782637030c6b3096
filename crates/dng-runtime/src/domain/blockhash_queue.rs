//! # Blockhash Queue
//!
//! Bounded FIFO of recent blockhashes. A transaction referencing a hash that
//! has fallen off the back has expired.

use std::collections::VecDeque;

use shared_types::Hash;

use crate::domain::entities::MAX_RECENT_BLOCKHASHES;

/// Recent blockhashes, newest last.
#[derive(Debug, Clone)]
pub struct BlockhashQueue {
    hashes: VecDeque<(Hash, u64)>,
    max_age: usize,
}

impl BlockhashQueue {
    /// Create a queue keeping `max_age` hashes.
    #[must_use]
    pub fn new(max_age: usize) -> Self {
        Self {
            hashes: VecDeque::with_capacity(max_age + 1),
            max_age: max_age.max(1),
        }
    }

    /// Record the blockhash of `slot`, evicting the oldest if full.
    pub fn register(&mut self, hash: Hash, slot: u64) {
        self.hashes.push_back((hash, slot));
        while self.hashes.len() > self.max_age {
            self.hashes.pop_front();
        }
    }

    /// Whether `hash` is still recent enough.
    #[must_use]
    pub fn is_valid(&self, hash: &Hash) -> bool {
        self.hashes.iter().any(|(h, _)| h == hash)
    }

    /// The newest blockhash.
    #[must_use]
    pub fn last(&self) -> Option<Hash> {
        self.hashes.back().map(|(h, _)| *h)
    }

    /// Slot the given hash was registered in.
    #[must_use]
    pub fn slot_of(&self, hash: &Hash) -> Option<u64> {
        self.hashes.iter().find(|(h, _)| h == hash).map(|(_, s)| *s)
    }

    /// Number of hashes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl Default for BlockhashQueue {
    fn default() -> Self {
        Self::new(MAX_RECENT_BLOCKHASHES)
    }
}
