//! # Invoke Context
//!
//! Execution state shared by every program invoked while processing one
//! transaction: the loaded accounts, the sysvars, the program log and the
//! stack of active invocations.
//!
//! Each invocation runs inside a frame that records which transaction
//! accounts it may touch and a checkpoint of those accounts taken on entry.
//! When a program returns (and before it invokes another program) the
//! frame's accounts are checked against the checkpoint with
//! [`verify_account_change`] and [`verify_lamports_balanced`].

use std::collections::HashMap;
use std::sync::Arc;

use shared_crypto::create_program_address;
use shared_types::{Account, Hash, Instruction, Pubkey};
use tracing::trace;

use crate::domain::{verify_account_change, verify_lamports_balanced, Clock, Rent};
use crate::errors::InstructionError;
use crate::ports::inbound::BuiltinProgram;

/// Maximum nesting of invocations, the top-level instruction included.
pub const MAX_INVOKE_DEPTH: usize = 4;

/// Registered programs, keyed by program id.
pub type ProgramRegistry = HashMap<Pubkey, Arc<dyn BuiltinProgram>>;

/// An account loaded for a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionAccount {
    /// Account address.
    pub key: Pubkey,
    /// Account state, mutated in place while executing.
    pub account: Account,
}

/// Read-only ledger values visible to programs.
#[derive(Clone, Copy, Debug)]
pub struct Sysvars {
    /// Ledger time.
    pub clock: Clock,
    /// Rent parameters.
    pub rent: Rent,
    /// Newest blockhash, used when advancing durable nonces.
    pub blockhash: Hash,
    /// Current fee rate.
    pub lamports_per_signature: u64,
}

/// One instruction account: an index into the transaction's accounts plus the
/// privileges the instruction grants it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionAccount {
    /// Index into the transaction's account list.
    pub index: usize,
    /// Whether the account signed.
    pub is_signer: bool,
    /// Whether the account may be modified.
    pub is_writable: bool,
}

#[derive(Debug)]
struct Frame {
    program_id: Pubkey,
    accounts: Vec<InstructionAccount>,
    checkpoint: Vec<(usize, Account)>,
}

/// Execution state for one transaction.
pub struct InvokeContext<'a> {
    accounts: Vec<TransactionAccount>,
    programs: &'a ProgramRegistry,
    sysvars: Sysvars,
    logs: Vec<String>,
    frames: Vec<Frame>,
}

impl<'a> InvokeContext<'a> {
    /// Create a context over the loaded transaction accounts.
    #[must_use]
    pub fn new(
        accounts: Vec<TransactionAccount>,
        programs: &'a ProgramRegistry,
        sysvars: Sysvars,
    ) -> Self {
        Self {
            accounts,
            programs,
            sysvars,
            logs: Vec::new(),
            frames: Vec::new(),
        }
    }

    // =========================================================================
    // EXECUTION
    // =========================================================================

    /// Run a top-level instruction.
    pub fn process_instruction(
        &mut self,
        program_id: Pubkey,
        accounts: Vec<InstructionAccount>,
        data: &[u8],
    ) -> Result<(), InstructionError> {
        if accounts.iter().any(|a| a.index >= self.accounts.len()) {
            return Err(InstructionError::NotEnoughAccountKeys);
        }
        self.push_and_run(program_id, accounts, data)
    }

    /// Invoke another program from the running one.
    pub fn invoke(&mut self, instruction: &Instruction) -> Result<(), InstructionError> {
        self.invoke_signed(instruction, &[])
    }

    /// Invoke another program, signing for program-derived addresses.
    ///
    /// Each entry of `signer_seeds` derives one address under the calling
    /// program's id; those addresses count as signers for the callee.
    /// Every account of `instruction` must be one the caller was given, and
    /// the callee may not be granted more privilege than the caller holds.
    pub fn invoke_signed(
        &mut self,
        instruction: &Instruction,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<(), InstructionError> {
        let caller = self.frames.last().ok_or(InstructionError::GenericError)?;

        let pda_signers = signer_seeds
            .iter()
            .map(|seeds| {
                create_program_address(seeds, &caller.program_id)
                    .map_err(|_| InstructionError::InvalidSeeds)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut callee_accounts = Vec::with_capacity(instruction.accounts.len());
        for meta in &instruction.accounts {
            // Duplicates in the caller's list merge their privileges.
            let mut found: Option<InstructionAccount> = None;
            for granted in caller
                .accounts
                .iter()
                .filter(|a| self.accounts[a.index].key == meta.pubkey)
            {
                found = Some(match found {
                    Some(prev) => InstructionAccount {
                        index: prev.index,
                        is_signer: prev.is_signer || granted.is_signer,
                        is_writable: prev.is_writable || granted.is_writable,
                    },
                    None => *granted,
                });
            }
            let InstructionAccount {
                index,
                is_signer: caller_signer,
                is_writable: caller_writable,
            } = found.ok_or(InstructionError::MissingAccount)?;

            if meta.is_signer && !caller_signer && !pda_signers.contains(&meta.pubkey) {
                return Err(InstructionError::PrivilegeEscalation);
            }
            if meta.is_writable && !caller_writable {
                return Err(InstructionError::PrivilegeEscalation);
            }
            callee_accounts.push(InstructionAccount {
                index,
                is_signer: meta.is_signer,
                is_writable: meta.is_writable,
            });
        }

        self.verify_frame()?;
        self.push_and_run(instruction.program_id, callee_accounts, &instruction.data)?;

        let checkpoint = {
            let frame = self.frames.last().ok_or(InstructionError::GenericError)?;
            self.checkpoint(&frame.accounts)
        };
        if let Some(frame) = self.frames.last_mut() {
            frame.checkpoint = checkpoint;
        }
        Ok(())
    }

    fn push_and_run(
        &mut self,
        program_id: Pubkey,
        accounts: Vec<InstructionAccount>,
        data: &[u8],
    ) -> Result<(), InstructionError> {
        if self.frames.len() >= MAX_INVOKE_DEPTH {
            return Err(InstructionError::CallDepth);
        }
        let program = self
            .programs
            .get(&program_id)
            .cloned()
            .ok_or(InstructionError::UnsupportedProgramId)?;

        let checkpoint = self.checkpoint(&accounts);
        self.frames.push(Frame {
            program_id,
            accounts,
            checkpoint,
        });
        let depth = self.frames.len();
        self.logs.push(format!("Program {program_id} invoke [{depth}]"));
        trace!(program = program.name(), depth, "invoke");

        let result = program
            .process(self, data)
            .and_then(|()| self.verify_frame());

        match &result {
            Ok(()) => self.logs.push(format!("Program {program_id} success")),
            Err(err) => self.logs.push(format!("Program {program_id} failed: {err}")),
        }
        self.frames.pop();
        result
    }

    fn checkpoint(&self, accounts: &[InstructionAccount]) -> Vec<(usize, Account)> {
        let mut checkpoint: Vec<(usize, Account)> = Vec::with_capacity(accounts.len());
        for ia in accounts {
            if !checkpoint.iter().any(|(index, _)| *index == ia.index) {
                checkpoint.push((ia.index, self.accounts[ia.index].account.clone()));
            }
        }
        checkpoint
    }

    /// Check the running frame's accounts against its checkpoint.
    fn verify_frame(&self) -> Result<(), InstructionError> {
        let frame = self.frames.last().ok_or(InstructionError::GenericError)?;
        let mut pre_sum = 0u128;
        let mut post_sum = 0u128;
        for (index, pre) in &frame.checkpoint {
            let post = &self.accounts[*index].account;
            let is_writable = frame
                .accounts
                .iter()
                .any(|a| a.index == *index && a.is_writable);
            verify_account_change(&frame.program_id, pre, post, is_writable)?;
            pre_sum += u128::from(pre.lamports);
            post_sum += u128::from(post.lamports);
        }
        verify_lamports_balanced(pre_sum, post_sum)
    }

    // =========================================================================
    // PROGRAM-FACING ACCESSORS
    // =========================================================================

    fn frame(&self) -> Result<&Frame, InstructionError> {
        self.frames.last().ok_or(InstructionError::GenericError)
    }

    fn instruction_account(&self, i: usize) -> Result<InstructionAccount, InstructionError> {
        self.frame()?
            .accounts
            .get(i)
            .copied()
            .ok_or(InstructionError::NotEnoughAccountKeys)
    }

    /// Id of the running program.
    pub fn program_id(&self) -> Result<Pubkey, InstructionError> {
        Ok(self.frame()?.program_id)
    }

    /// Number of accounts passed to the running instruction.
    #[must_use]
    pub fn num_accounts(&self) -> usize {
        self.frames.last().map_or(0, |f| f.accounts.len())
    }

    /// Address of instruction account `i`.
    pub fn key(&self, i: usize) -> Result<Pubkey, InstructionError> {
        let ia = self.instruction_account(i)?;
        Ok(self.accounts[ia.index].key)
    }

    /// Whether instruction account `i` signed.
    pub fn is_signer(&self, i: usize) -> Result<bool, InstructionError> {
        Ok(self.instruction_account(i)?.is_signer)
    }

    /// Whether instruction account `i` is writable.
    pub fn is_writable(&self, i: usize) -> Result<bool, InstructionError> {
        Ok(self.instruction_account(i)?.is_writable)
    }

    /// Instruction account `i`.
    pub fn account(&self, i: usize) -> Result<&Account, InstructionError> {
        let ia = self.instruction_account(i)?;
        Ok(&self.accounts[ia.index].account)
    }

    /// Mutable instruction account `i`. Changes are checked when the
    /// program returns.
    pub fn account_mut(&mut self, i: usize) -> Result<&mut Account, InstructionError> {
        let ia = self.instruction_account(i)?;
        Ok(&mut self.accounts[ia.index].account)
    }

    /// Move lamports between two instruction accounts.
    pub fn transfer_lamports(
        &mut self,
        from: usize,
        to: usize,
        lamports: u64,
    ) -> Result<(), InstructionError> {
        let source = self.account_mut(from)?;
        source.lamports = source
            .lamports
            .checked_sub(lamports)
            .ok_or(InstructionError::InsufficientFunds)?;
        let destination = self.account_mut(to)?;
        destination.lamports = destination
            .lamports
            .checked_add(lamports)
            .ok_or(InstructionError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Ledger time.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.sysvars.clock
    }

    /// Rent parameters.
    #[must_use]
    pub fn rent(&self) -> &Rent {
        &self.sysvars.rent
    }

    /// Newest blockhash.
    #[must_use]
    pub fn blockhash(&self) -> Hash {
        self.sysvars.blockhash
    }

    /// Current fee rate.
    #[must_use]
    pub fn lamports_per_signature(&self) -> u64 {
        self.sysvars.lamports_per_signature
    }

    /// Append a program log line.
    pub fn log(&mut self, message: impl AsRef<str>) {
        self.logs.push(format!("Program log: {}", message.as_ref()));
    }

    /// Log lines so far.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Consume the context, returning the post-execution accounts and logs.
    #[must_use]
    pub fn into_parts(self) -> (Vec<TransactionAccount>, Vec<String>) {
        (self.accounts, self.logs)
    }
}

// =============================================================================
// TESTS
// =============================================================================
