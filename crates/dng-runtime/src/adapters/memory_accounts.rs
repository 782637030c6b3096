//! # In-Memory Accounts
//!
//! `HashMap`-backed account store used by the local cluster and in tests.

use std::collections::HashMap;

use shared_types::{Account, Pubkey};

use crate::ports::outbound::AccountsDb;

/// In-memory account store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccounts {
    accounts: HashMap<Pubkey, Account>,
}

impl InMemoryAccounts {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lamports held by every account.
    #[must_use]
    pub fn capitalization(&self) -> u128 {
        self.accounts.values().map(|a| u128::from(a.lamports)).sum()
    }
}

impl AccountsDb for InMemoryAccounts {
    fn get_account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.accounts.get(pubkey).cloned()
    }

    fn store_accounts(&mut self, accounts: &[(Pubkey, Account)]) {
        for (pubkey, account) in accounts {
            if account.lamports == 0 {
                self.accounts.remove(pubkey);
            } else {
                self.accounts.insert(*pubkey, account.clone());
            }
        }
    }

    fn len(&self) -> usize {
        self.accounts.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
