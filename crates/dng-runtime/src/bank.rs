//! # Bank
//!
//! The ledger: accounts, registered programs, the clock and the recent
//! blockhash queue. Transactions are checked, charged, executed through an
//! [`InvokeContext`] and committed atomically.
//!
//! ## Processing Pipeline
//!
//! ```text
//! sanitize → dedupe → verify signatures → check age → charge fee
//!          → load accounts → execute → rent check → commit
//! ```
//!
//! A transaction rejected before the fee step leaves no trace. Once the fee is
//! charged the transaction is recorded in the status cache, and on failure
//! only the fee debit and (for durable-nonce transactions) the nonce advance
//! are committed.

use std::collections::HashMap;
use std::sync::Arc;

use shared_crypto::{hashv, verify_transaction, Keypair, Signer};
use shared_types::{
    Account, Hash, Message, Pubkey, Signature, Transaction, NATIVE_LOADER_ID, SYSTEM_PROGRAM_ID,
};
use tracing::{debug, info, instrument, warn};

use crate::adapters::InMemoryAccounts;
use crate::domain::{
    durable_nonce_from_blockhash, is_rent_state_valid, BankConfig, BlockhashQueue, Clock, NonceData,
    NonceState, NonceVersions, SimulationResult, TransactionStatus,
};
use crate::errors::TransactionError;
use crate::invoke_context::{
    InstructionAccount, InvokeContext, ProgramRegistry, Sysvars, TransactionAccount,
};
use crate::ports::inbound::BuiltinProgram;
use crate::ports::outbound::AccountsDb;
use crate::system_program::{self, SystemInstruction, SystemProgram};

/// Bank statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BankStats {
    /// Transactions that executed successfully.
    pub successful_transactions: u64,
    /// Transactions that were charged but failed.
    pub failed_transactions: u64,
    /// Transactions rejected before the fee was charged.
    pub rejected_transactions: u64,
    /// Total fees collected.
    pub fees_collected: u64,
}

/// A durable-nonce transaction's nonce account, already advanced.
struct NonceInfo {
    key: Pubkey,
    advanced: Account,
}

/// Everything a loaded, fee-charged transaction needs to execute.
struct LoadedTransaction {
    accounts: Vec<TransactionAccount>,
    fee: u64,
    nonce: Option<NonceInfo>,
}

/// The in-process ledger.
pub struct Bank<D: AccountsDb = InMemoryAccounts> {
    config: BankConfig,
    accounts: D,
    programs: ProgramRegistry,
    blockhash_queue: BlockhashQueue,
    slot: u64,
    warp_offset_secs: i64,
    status_cache: HashMap<Signature, TransactionStatus>,
    faucet: Keypair,
    stats: BankStats,
}

impl Bank<InMemoryAccounts> {
    /// Create a bank backed by an in-memory account store.
    #[must_use]
    pub fn new(config: BankConfig) -> Self {
        Self::with_accounts_db(config, InMemoryAccounts::new())
    }
}

impl Default for Bank<InMemoryAccounts> {
    fn default() -> Self {
        Self::new(BankConfig::default())
    }
}

impl<D: AccountsDb> Bank<D> {
    /// Create a bank over `accounts`, funding a fresh faucet and registering
    /// the system program.
    pub fn with_accounts_db(config: BankConfig, accounts: D) -> Self {
        let faucet = Keypair::new();
        let genesis_hash = hashv(&[b"genesis", &config.genesis_unix_timestamp.to_le_bytes()]);
        let mut blockhash_queue = BlockhashQueue::default();
        blockhash_queue.register(genesis_hash, 0);

        let mut bank = Self {
            config,
            accounts,
            programs: ProgramRegistry::new(),
            blockhash_queue,
            slot: 0,
            warp_offset_secs: 0,
            status_cache: HashMap::new(),
            faucet,
            stats: BankStats::default(),
        };
        let faucet_account = Account::new(bank.config.faucet_lamports, 0, &SYSTEM_PROGRAM_ID);
        bank.accounts
            .store_accounts(&[(bank.faucet.pubkey(), faucet_account)]);
        bank.add_builtin(Arc::new(SystemProgram));
        info!(faucet = %bank.faucet.pubkey(), "Bank created");
        bank
    }

    /// Register a builtin program and its executable account.
    pub fn add_builtin(&mut self, program: Arc<dyn BuiltinProgram>) {
        let id = program.id();
        let account = Account {
            lamports: 1,
            data: program.name().as_bytes().to_vec(),
            owner: NATIVE_LOADER_ID,
            executable: true,
        };
        self.accounts.store_accounts(&[(id, account)]);
        info!(program = program.name(), %id, "Builtin registered");
        self.programs.insert(id, program);
    }

    /// Whether a program is registered at `id`.
    #[must_use]
    pub fn has_program(&self, id: &Pubkey) -> bool {
        self.programs.contains_key(id)
    }

    // =========================================================================
    // LEDGER STATE
    // =========================================================================

    /// Current slot.
    #[must_use]
    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Ledger time at the current slot.
    #[must_use]
    pub fn clock(&self) -> Clock {
        let elapsed_ms = self.slot.saturating_mul(self.config.slot_duration_ms);
        Clock {
            slot: self.slot,
            epoch: self.slot / self.config.slots_per_epoch.max(1),
            unix_timestamp: self.config.genesis_unix_timestamp
                + (elapsed_ms / 1_000) as i64
                + self.warp_offset_secs,
        }
    }

    /// Newest blockhash.
    #[must_use]
    pub fn latest_blockhash(&self) -> Hash {
        self.blockhash_queue.last().unwrap_or_default()
    }

    /// Move to the next slot, registering a new blockhash.
    pub fn advance_slot(&mut self) -> Hash {
        self.slot += 1;
        let hash = hashv(&[
            b"blockhash",
            self.latest_blockhash().as_ref(),
            &self.slot.to_le_bytes(),
        ]);
        self.blockhash_queue.register(hash, self.slot);
        debug!(slot = self.slot, %hash, "Slot advanced");
        hash
    }

    /// Shift ledger time forward by `seconds`, then advance one slot.
    pub fn warp_clock(&mut self, seconds: i64) -> Clock {
        self.warp_offset_secs = self.warp_offset_secs.saturating_add(seconds);
        self.advance_slot();
        let clock = self.clock();
        info!(seconds, unix_timestamp = clock.unix_timestamp, "Clock warped");
        clock
    }

    /// Account at `pubkey`.
    #[must_use]
    pub fn get_account(&self, pubkey: &Pubkey) -> Option<Account> {
        self.accounts.get_account(pubkey)
    }

    /// Balance of `pubkey`, zero if absent.
    #[must_use]
    pub fn get_balance(&self, pubkey: &Pubkey) -> u64 {
        self.accounts.get_balance(pubkey)
    }

    /// Rent-exempt minimum for `data_len` bytes.
    #[must_use]
    pub fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> u64 {
        self.config.rent.minimum_balance(data_len)
    }

    /// Current fee rate.
    #[must_use]
    pub fn lamports_per_signature(&self) -> u64 {
        self.config.fees.lamports_per_signature
    }

    /// Fee `message` would be charged.
    #[must_use]
    pub fn fee_for_message(&self, message: &Message) -> u64 {
        self.config
            .fees
            .calculate_fee(usize::from(message.header.num_required_signatures))
    }

    /// Status of a processed transaction.
    #[must_use]
    pub fn get_signature_status(&self, signature: &Signature) -> Option<&TransactionStatus> {
        self.status_cache.get(signature)
    }

    /// Processing statistics.
    #[must_use]
    pub fn stats(&self) -> &BankStats {
        &self.stats
    }

    /// Faucet address.
    #[must_use]
    pub fn faucet(&self) -> Pubkey {
        self.faucet.pubkey()
    }

    /// Read-only account store.
    pub fn accounts_db(&self) -> &D {
        &self.accounts
    }

    // =========================================================================
    // TRANSACTIONS
    // =========================================================================

    /// Fund `to` from the faucet with a regular transfer transaction.
    #[instrument(skip(self))]
    pub fn airdrop(&mut self, to: &Pubkey, lamports: u64) -> Result<Signature, TransactionError> {
        let ix = system_program::transfer(&self.faucet.pubkey(), to, lamports);
        let mut tx = self.faucet_transaction(&ix)?;
        if self.status_cache.contains_key(&tx.id()) {
            // identical airdrop already landed in this slot
            self.advance_slot();
            tx = self.faucet_transaction(&ix)?;
        }
        self.process_transaction(&tx)?;
        Ok(tx.id())
    }

    fn faucet_transaction(
        &self,
        ix: &shared_types::Instruction,
    ) -> Result<Transaction, TransactionError> {
        let payer = self.faucet.pubkey();
        let mut tx = Transaction::new_with_payer(std::slice::from_ref(ix), Some(&payer));
        let signer: &dyn Signer = &self.faucet;
        shared_crypto::sign_transaction(&mut tx, &[signer], self.latest_blockhash())
            .map_err(|_| TransactionError::SignatureFailure)?;
        Ok(tx)
    }

    /// Process and commit a transaction.
    ///
    /// # Errors
    ///
    /// Returns the reason the transaction was rejected or failed. Failures
    /// after the fee was charged are also recorded in the status cache.
    #[instrument(skip_all, fields(signature = %tx.id()))]
    pub fn process_transaction(&mut self, tx: &Transaction) -> Result<(), TransactionError> {
        let signature = tx.id();
        let loaded = match self.load_transaction(tx) {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(%err, "Transaction rejected");
                self.stats.rejected_transactions += 1;
                return Err(err);
            }
        };

        let fee = loaded.fee;
        let (result, accounts, logs) = self.execute(tx, loaded.accounts.clone());
        match &result {
            Ok(()) => {
                let writable: Vec<(Pubkey, Account)> = accounts
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| tx.message.is_writable(*i))
                    .map(|(_, ta)| (ta.key, ta.account))
                    .collect();
                self.accounts.store_accounts(&writable);
                self.stats.successful_transactions += 1;
                info!(fee, "Transaction succeeded");
            }
            Err(err) => {
                let mut committed = Vec::with_capacity(2);
                if let Some(payer) = loaded.accounts.first() {
                    committed.push((payer.key, payer.account.clone()));
                }
                if let Some(nonce) = loaded.nonce {
                    match committed.iter_mut().find(|(key, _)| *key == nonce.key) {
                        Some(entry) => entry.1.data = nonce.advanced.data,
                        None => committed.push((nonce.key, nonce.advanced)),
                    }
                }
                self.accounts.store_accounts(&committed);
                self.stats.failed_transactions += 1;
                warn!(%err, fee, "Transaction failed");
            }
        }
        self.stats.fees_collected += fee;

        self.status_cache.insert(
            signature,
            TransactionStatus {
                slot: self.slot,
                err: result.clone().err(),
                fee,
                logs,
            },
        );
        result
    }

    /// Run a transaction without committing anything.
    ///
    /// The duplicate check is skipped, so an already processed transaction
    /// can still be simulated.
    #[must_use]
    pub fn simulate_transaction(&self, tx: &Transaction) -> SimulationResult {
        match self.check_and_load(tx, false) {
            Ok(loaded) => {
                let (result, accounts, logs) = self.execute(tx, loaded.accounts);
                SimulationResult {
                    err: result.err(),
                    logs,
                    accounts: accounts.into_iter().map(|ta| (ta.key, ta.account)).collect(),
                }
            }
            Err(err) => SimulationResult {
                err: Some(err),
                logs: Vec::new(),
                accounts: Vec::new(),
            },
        }
    }

    fn load_transaction(&self, tx: &Transaction) -> Result<LoadedTransaction, TransactionError> {
        self.check_and_load(tx, true)
    }

    fn check_and_load(
        &self,
        tx: &Transaction,
        check_duplicate: bool,
    ) -> Result<LoadedTransaction, TransactionError> {
        tx.sanitize()?;
        if check_duplicate && self.status_cache.contains_key(&tx.id()) {
            return Err(TransactionError::AlreadyProcessed);
        }
        verify_transaction(tx).map_err(|_| TransactionError::SignatureFailure)?;

        let message = &tx.message;
        let nonce = if self.blockhash_queue.is_valid(&message.recent_blockhash) {
            None
        } else {
            Some(
                self.check_durable_nonce(message)
                    .ok_or(TransactionError::BlockhashNotFound)?,
            )
        };

        let fee = self.fee_for_message(message);
        let mut accounts: Vec<TransactionAccount> = message
            .account_keys
            .iter()
            .map(|key| TransactionAccount {
                key: *key,
                account: self.accounts.get_account(key).unwrap_or_default(),
            })
            .collect();

        let payer = accounts
            .first_mut()
            .ok_or(TransactionError::AccountNotFound)?;
        if payer.account.lamports == 0 {
            return Err(TransactionError::AccountNotFound);
        }
        if payer.account.owner != SYSTEM_PROGRAM_ID || !payer.account.data.is_empty() {
            return Err(TransactionError::InvalidAccountForFee);
        }
        payer.account.lamports = payer
            .account
            .lamports
            .checked_sub(fee)
            .ok_or(TransactionError::InsufficientFundsForFee)?;

        Ok(LoadedTransaction {
            accounts,
            fee,
            nonce,
        })
    }

    /// A message not referencing a recent blockhash must advance a nonce
    /// account whose stored value matches it. Returns the advanced account.
    fn check_durable_nonce(&self, message: &Message) -> Option<NonceInfo> {
        let ix = message.instructions.first()?;
        let program_id = message.account_keys.get(usize::from(ix.program_id_index))?;
        if *program_id != SYSTEM_PROGRAM_ID {
            return None;
        }
        if SystemInstruction::unpack(&ix.data).ok()? != SystemInstruction::AdvanceNonceAccount {
            return None;
        }

        let nonce_index = usize::from(*ix.accounts.first()?);
        if !message.is_writable(nonce_index) {
            return None;
        }
        let key = message.account_keys[nonce_index];
        let mut account = self.accounts.get_account(&key)?;
        if account.owner != SYSTEM_PROGRAM_ID {
            return None;
        }
        let data = match NonceVersions::from_account_data(&account.data)? {
            NonceState::Initialized(data) => data,
            NonceState::Uninitialized => return None,
        };
        if data.durable_nonce != message.recent_blockhash {
            return None;
        }
        let authority_signed = ix.accounts.iter().any(|&i| {
            let i = usize::from(i);
            message.is_signer(i) && message.account_keys[i] == data.authority
        });
        if !authority_signed {
            return None;
        }

        let next = durable_nonce_from_blockhash(&self.latest_blockhash());
        if next == data.durable_nonce {
            return None;
        }
        let advanced = NonceState::Initialized(NonceData {
            durable_nonce: next,
            lamports_per_signature: self.lamports_per_signature(),
            ..data
        });
        NonceVersions::write_account_data(advanced, &mut account.data).ok()?;
        Some(NonceInfo {
            key,
            advanced: account,
        })
    }

    fn sysvars(&self) -> Sysvars {
        Sysvars {
            clock: self.clock(),
            rent: self.config.rent,
            blockhash: self.latest_blockhash(),
            lamports_per_signature: self.lamports_per_signature(),
        }
    }

    /// Execute every instruction, then apply the rent check.
    fn execute(
        &self,
        tx: &Transaction,
        accounts: Vec<TransactionAccount>,
    ) -> (Result<(), TransactionError>, Vec<TransactionAccount>, Vec<String>) {
        let message = &tx.message;
        let pre_accounts = accounts.clone();
        let mut ctx = InvokeContext::new(accounts, &self.programs, self.sysvars());

        let mut result = Ok(());
        for (position, ix) in message.instructions.iter().enumerate() {
            let program_id = message.account_keys[usize::from(ix.program_id_index)];
            let instruction_accounts = ix
                .accounts
                .iter()
                .map(|&i| {
                    let index = usize::from(i);
                    InstructionAccount {
                        index,
                        is_signer: message.is_signer(index),
                        is_writable: message.is_writable(index),
                    }
                })
                .collect();
            if let Err(err) = ctx.process_instruction(program_id, instruction_accounts, &ix.data) {
                result = Err(TransactionError::InstructionError(position as u8, err));
                break;
            }
        }

        let (accounts, logs) = ctx.into_parts();
        if result.is_ok() {
            result = self.check_rent(message, &pre_accounts, &accounts);
        }
        (result, accounts, logs)
    }

    fn check_rent(
        &self,
        message: &Message,
        pre: &[TransactionAccount],
        post: &[TransactionAccount],
    ) -> Result<(), TransactionError> {
        let rent = &self.config.rent;
        for (index, (before, after)) in pre.iter().zip(post).enumerate() {
            if !message.is_writable(index) || is_rent_state_valid(rent, &after.account) {
                continue;
            }
            let resized = before.account.data.len() != after.account.data.len();
            if resized || is_rent_state_valid(rent, &before.account) {
                return Err(TransactionError::InsufficientFundsForRent {
                    account_index: index as u8,
                });
            }
        }
        Ok(())
    }
}

impl<D: AccountsDb> std::fmt::Debug for Bank<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bank")
            .field("slot", &self.slot)
            .field("accounts", &self.accounts.len())
            .field("programs", &self.programs.len())
            .field("stats", &self.stats)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
