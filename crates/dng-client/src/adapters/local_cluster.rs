//! # Local Cluster
//!
//! An in-process validator: one [`Bank`] behind a `tokio` lock, with the
//! durable nonce game deployed at genesis.
//!
//! Every accepted transaction seals its slot. The cluster has a single
//! validator, so a sealed slot is rooted and its transactions report
//! `Finalized`; transactions in the open slot report `Processed`.

use std::sync::Arc;

use async_trait::async_trait;
use dng_runtime::domain::{BankConfig, Clock, SimulationResult};
use dng_runtime::Bank;
use durable_nonce_game::DurableNonceGame;
use shared_types::{Account, Hash, Pubkey, Signature, Transaction};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::config::Commitment;
use crate::errors::{ClientError, ClientResult};
use crate::ports::{RpcClient, SignatureStatus};

/// In-process cluster implementing [`RpcClient`].
pub struct LocalCluster {
    bank: RwLock<Bank>,
}

impl LocalCluster {
    /// Start a cluster with default genesis settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    /// Start a cluster from `config` and deploy the game program.
    #[must_use]
    pub fn with_config(config: BankConfig) -> Self {
        let mut bank = Bank::new(config);
        bank.add_builtin(Arc::new(DurableNonceGame));
        info!(
            program_id = %durable_nonce_game::ID,
            "Local cluster started"
        );
        Self::with_bank(bank)
    }

    /// Wrap an existing bank as is.
    #[must_use]
    pub fn with_bank(bank: Bank) -> Self {
        Self {
            bank: RwLock::new(bank),
        }
    }

    /// Move the clock forward by `seconds`, sealing the current slot.
    pub async fn warp_clock(&self, seconds: i64) -> Clock {
        let clock = self.bank.write().await.warp_clock(seconds);
        debug!(seconds, unix_timestamp = clock.unix_timestamp, "Clock warped");
        clock
    }

    /// Seal `slots` slots. Blockhashes older than the queue depth expire.
    pub async fn advance_slots(&self, slots: u64) -> Hash {
        let mut bank = self.bank.write().await;
        let mut hash = bank.latest_blockhash();
        for _ in 0..slots {
            hash = bank.advance_slot();
        }
        hash
    }

    /// Current slot.
    pub async fn slot(&self) -> u64 {
        self.bank.read().await.slot()
    }

    /// Execute without committing.
    pub async fn simulate_transaction(&self, tx: &Transaction) -> SimulationResult {
        self.bank.read().await.simulate_transaction(tx)
    }
}

impl Default for LocalCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LocalCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCluster").finish_non_exhaustive()
    }
}

#[async_trait]
impl RpcClient for LocalCluster {
    async fn get_latest_blockhash(&self) -> ClientResult<Hash> {
        Ok(self.bank.read().await.latest_blockhash())
    }

    #[instrument(skip_all, fields(signature = %tx.id()))]
    async fn send_transaction(&self, tx: &Transaction) -> ClientResult<Signature> {
        let signature = tx.id();
        let mut bank = self.bank.write().await;
        match bank.process_transaction(tx) {
            Ok(()) => debug!("Transaction landed"),
            Err(err) if err.fee_charged() => debug!(%err, "Transaction landed with an error"),
            Err(err) => {
                warn!(%err, "Transaction rejected");
                return Err(ClientError::Rejected(err));
            }
        }
        bank.advance_slot();
        Ok(signature)
    }

    async fn get_signature_status(
        &self,
        signature: &Signature,
    ) -> ClientResult<Option<SignatureStatus>> {
        let bank = self.bank.read().await;
        let current = bank.slot();
        Ok(bank
            .get_signature_status(signature)
            .map(|status| SignatureStatus {
                slot: status.slot,
                err: status.err.clone(),
                logs: status.logs.clone(),
                confirmation_status: if status.slot < current {
                    Commitment::Finalized
                } else {
                    Commitment::Processed
                },
            }))
    }

    async fn get_account(&self, pubkey: &Pubkey) -> ClientResult<Option<Account>> {
        Ok(self.bank.read().await.get_account(pubkey))
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> ClientResult<u64> {
        Ok(self.bank.read().await.get_balance(pubkey))
    }

    #[instrument(skip(self))]
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> ClientResult<Signature> {
        let mut bank = self.bank.write().await;
        let signature = bank.airdrop(to, lamports)?;
        bank.advance_slot();
        Ok(signature)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> ClientResult<u64> {
        Ok(self
            .bank
            .read()
            .await
            .minimum_balance_for_rent_exemption(data_len))
    }

    async fn get_clock(&self) -> ClientResult<Clock> {
        Ok(self.bank.read().await.clock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dng_runtime::system_program;
    use shared_crypto::{sign_transaction, Keypair, Signer};
    use shared_types::LAMPORTS_PER_SOL;

    async fn transfer(
        cluster: &LocalCluster,
        from: &Keypair,
        to: &Pubkey,
        lamports: u64,
    ) -> ClientResult<Signature> {
        let ix = system_program::transfer(&from.pubkey(), to, lamports);
        let mut tx = Transaction::new_with_payer(&[ix], Some(&from.pubkey()));
        sign_transaction(&mut tx, &[from], cluster.get_latest_blockhash().await?)?;
        cluster.send_transaction(&tx).await
    }

    #[tokio::test]
    async fn test_game_program_is_deployed() {
        let cluster = LocalCluster::new();
        let account = cluster
            .get_account(&durable_nonce_game::ID)
            .await
            .unwrap()
            .unwrap();
        assert!(account.executable);
    }

    #[tokio::test]
    async fn test_airdrop_and_transfer_seal_slots() {
        let cluster = LocalCluster::new();
        let alice = Keypair::new();
        let bob = Pubkey::new_unique();

        let start = cluster.slot().await;
        cluster
            .request_airdrop(&alice.pubkey(), LAMPORTS_PER_SOL)
            .await
            .unwrap();
        let signature = transfer(&cluster, &alice, &bob, 1_000).await.unwrap();

        assert_eq!(cluster.slot().await, start + 2);
        assert_eq!(cluster.get_balance(&bob).await.unwrap(), 1_000);

        let status = cluster
            .get_signature_status(&signature)
            .await
            .unwrap()
            .unwrap();
        assert!(status.err.is_none());
        assert!(status.satisfies(Commitment::Finalized));
    }

    #[tokio::test]
    async fn test_rejected_transaction_has_no_status() {
        let cluster = LocalCluster::new();
        let broke = Keypair::new();
        let err = transfer(&cluster, &broke, &Pubkey::new_unique(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_failed_transaction_is_accepted_with_error() {
        let cluster = LocalCluster::new();
        let alice = Keypair::new();
        cluster.request_airdrop(&alice.pubkey(), 10_000).await.unwrap();

        let signature = transfer(&cluster, &alice, &Pubkey::new_unique(), LAMPORTS_PER_SOL)
            .await
            .unwrap();
        let status = cluster
            .get_signature_status(&signature)
            .await
            .unwrap()
            .unwrap();
        assert!(status.err.is_some());
        assert_eq!(cluster.get_balance(&alice.pubkey()).await.unwrap(), 5_000);
    }

    #[tokio::test]
    async fn test_warp_and_advance() {
        let cluster = LocalCluster::new();
        let before = cluster.get_clock().await.unwrap();
        let after = cluster.warp_clock(3_600).await;
        assert!(after.unix_timestamp >= before.unix_timestamp + 3_600);

        let old = cluster.get_latest_blockhash().await.unwrap();
        let new = cluster.advance_slots(5).await;
        assert_ne!(old, new);
        assert_eq!(cluster.get_latest_blockhash().await.unwrap(), new);
    }
}
