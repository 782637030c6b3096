//! # Driven Ports (SPI - Outbound)
//!
//! The account store the bank reads from and commits to.

use shared_types::{Account, Pubkey};

/// Interface for persisting accounts.
///
/// ## Implementation Notes
///
/// Stores never see partial transactions: the bank commits the full set of
/// post-execution accounts with a single `store_accounts` call.
pub trait AccountsDb: Send + Sync {
    /// Get an account.
    ///
    /// # Returns
    ///
    /// * `Some(Account)` - If the account exists
    /// * `None` - If the account was never funded or has been drained
    fn get_account(&self, pubkey: &Pubkey) -> Option<Account>;

    /// Store a batch of accounts.
    ///
    /// Accounts with zero lamports are removed instead of stored.
    fn store_accounts(&mut self, accounts: &[(Pubkey, Account)]);

    /// Number of live accounts.
    fn len(&self) -> usize;

    /// Whether the store holds no accounts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Balance of an account, zero if it does not exist.
    fn get_balance(&self, pubkey: &Pubkey) -> u64 {
        self.get_account(pubkey).map_or(0, |a| a.lamports)
    }
}
