//! # Domain Invariants
//!
//! Rules checked after every program invocation. A program may only spend
//! from, write to, or reassign accounts it owns; read-only and executable
//! accounts never change; lamports are neither created nor destroyed.
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Read-only accounts are untouched | `verify_account_change` |
//! | Only the owner debits an account | `verify_account_change` |
//! | Only the owner modifies data | `verify_account_change` |
//! | Only the owner reassigns, and only zeroed data | `verify_account_change` |
//! | Executable accounts are immutable | `verify_account_change` |
//! | Lamports are conserved | `verify_lamports_balanced` |
//! | Data accounts stay rent exempt | `is_rent_state_valid` |

use shared_types::{Account, Pubkey};

use crate::domain::entities::Rent;
use crate::errors::InstructionError;

/// Check one account's transition from `pre` to `post` under `program_id`.
pub fn verify_account_change(
    program_id: &Pubkey,
    pre: &Account,
    post: &Account,
    is_writable: bool,
) -> Result<(), InstructionError> {
    if pre.executable && pre != post {
        return Err(InstructionError::ExecutableModified);
    }
    if pre.executable != post.executable {
        return Err(InstructionError::ExecutableModified);
    }

    if pre.lamports != post.lamports {
        if !is_writable {
            return Err(InstructionError::ReadonlyLamportChange);
        }
        if post.lamports < pre.lamports && pre.owner != *program_id {
            return Err(InstructionError::ExternalAccountLamportSpend);
        }
    }

    if pre.data != post.data {
        if !is_writable {
            return Err(InstructionError::ReadonlyDataModified);
        }
        if pre.owner != *program_id {
            return Err(InstructionError::ExternalAccountDataModified);
        }
    }

    if pre.owner != post.owner
        && (!is_writable || pre.owner != *program_id || post.data.iter().any(|b| *b != 0))
    {
        return Err(InstructionError::ModifiedProgramId);
    }

    Ok(())
}

/// Lamports summed over an instruction's accounts must not change.
pub fn verify_lamports_balanced(pre_sum: u128, post_sum: u128) -> Result<(), InstructionError> {
    if pre_sum == post_sum {
        Ok(())
    } else {
        Err(InstructionError::UnbalancedInstruction)
    }
}

/// A data-bearing account must be either drained or rent exempt.
#[must_use]
pub fn is_rent_state_valid(rent: &Rent, account: &Account) -> bool {
    account.lamports == 0
        || account.data.is_empty()
        || account.executable
        || rent.is_exempt(account.lamports, account.data.len())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn account(lamports: u64, data: Vec<u8>, owner: Pubkey) -> Account {
        Account {
            lamports,
            data,
            owner,
            executable: false,
        }
    }

    #[test]
    fn test_owner_may_debit() {
        let program = Pubkey::new_unique();
        let pre = account(100, vec![], program);
        let post = account(50, vec![], program);
        assert!(verify_account_change(&program, &pre, &post, true).is_ok());
    }

    #[test]
    fn test_non_owner_may_credit_but_not_debit() {
        let program = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let pre = account(100, vec![], other);

        let credited = account(150, vec![], other);
        assert!(verify_account_change(&program, &pre, &credited, true).is_ok());

        let debited = account(50, vec![], other);
        assert_eq!(
            verify_account_change(&program, &pre, &debited, true),
            Err(InstructionError::ExternalAccountLamportSpend)
        );
    }

    #[test]
    fn test_readonly_untouchable() {
        let program = Pubkey::new_unique();
        let pre = account(100, vec![1], program);

        let credited = account(101, vec![1], program);
        assert_eq!(
            verify_account_change(&program, &pre, &credited, false),
            Err(InstructionError::ReadonlyLamportChange)
        );

        let written = account(100, vec![2], program);
        assert_eq!(
            verify_account_change(&program, &pre, &written, false),
            Err(InstructionError::ReadonlyDataModified)
        );
    }

    #[test]
    fn test_non_owner_cannot_write_data() {
        let program = Pubkey::new_unique();
        let pre = account(100, vec![1], Pubkey::new_unique());
        let post = account(100, vec![2], pre.owner);
        assert_eq!(
            verify_account_change(&program, &pre, &post, true),
            Err(InstructionError::ExternalAccountDataModified)
        );
    }

    #[test]
    fn test_reassign_requires_zeroed_data() {
        let program = Pubkey::new_unique();
        let new_owner = Pubkey::new_unique();
        let pre = account(100, vec![0; 4], program);

        let zeroed = account(100, vec![0; 4], new_owner);
        assert!(verify_account_change(&program, &pre, &zeroed, true).is_ok());

        let dirty = account(100, vec![1; 4], new_owner);
        assert_eq!(
            verify_account_change(&program, &pre, &dirty, true),
            Err(InstructionError::ModifiedProgramId)
        );
    }

    #[test]
    fn test_executable_is_immutable() {
        let program = Pubkey::new_unique();
        let mut pre = account(1, vec![1], program);
        pre.executable = true;
        let mut post = pre.clone();
        post.lamports = 2;
        assert_eq!(
            verify_account_change(&program, &pre, &post, true),
            Err(InstructionError::ExecutableModified)
        );
    }

    #[test]
    fn test_lamport_balance() {
        assert!(verify_lamports_balanced(10, 10).is_ok());
        assert_eq!(
            verify_lamports_balanced(10, 11),
            Err(InstructionError::UnbalancedInstruction)
        );
    }

    #[test]
    fn test_rent_state() {
        let rent = Rent::default();
        let owner = Pubkey::new_unique();
        assert!(is_rent_state_valid(&rent, &account(1, vec![], owner)));
        assert!(is_rent_state_valid(&rent, &account(0, vec![1; 10], owner)));
        assert!(!is_rent_state_valid(&rent, &account(1, vec![1; 10], owner)));
        let min = rent.minimum_balance(10);
        assert!(is_rent_state_valid(&rent, &account(min, vec![1; 10], owner)));
    }
}
