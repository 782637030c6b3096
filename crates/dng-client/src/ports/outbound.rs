//! Driven ports (Outbound dependencies)

use async_trait::async_trait;
use dng_runtime::domain::Clock;
use dng_runtime::TransactionError;
use shared_types::{Account, Hash, Pubkey, Signature, Transaction};

use crate::config::Commitment;
use crate::errors::ClientResult;

/// Status of a landed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Slot the transaction landed in.
    pub slot: u64,
    /// Failure reason, `None` on success.
    pub err: Option<TransactionError>,
    /// Program logs.
    pub logs: Vec<String>,
    /// Commitment reached so far.
    pub confirmation_status: Commitment,
}

impl SignatureStatus {
    /// Has the transaction reached `commitment`?
    #[must_use]
    pub fn satisfies(&self, commitment: Commitment) -> bool {
        self.confirmation_status >= commitment
    }
}

/// JSON-RPC style access to a cluster.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Blockhash to sign new transactions against.
    async fn get_latest_blockhash(&self) -> ClientResult<Hash>;

    /// Submit a signed transaction.
    ///
    /// Returns the signature once the cluster has accepted it. A transaction
    /// that lands and then fails is still accepted; its error shows up in
    /// [`RpcClient::get_signature_status`].
    async fn send_transaction(&self, tx: &Transaction) -> ClientResult<Signature>;

    /// Status of a previously sent transaction, if known.
    async fn get_signature_status(&self, signature: &Signature)
        -> ClientResult<Option<SignatureStatus>>;

    /// Account at `pubkey`, if it exists.
    async fn get_account(&self, pubkey: &Pubkey) -> ClientResult<Option<Account>>;

    /// Lamports held by `pubkey`; zero if the account does not exist.
    async fn get_balance(&self, pubkey: &Pubkey) -> ClientResult<u64>;

    /// Fund `to` from the cluster faucet.
    async fn request_airdrop(&self, to: &Pubkey, lamports: u64) -> ClientResult<Signature>;

    /// Lamports needed to keep `data_len` bytes rent exempt.
    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> ClientResult<u64>;

    /// Current clock sysvar.
    async fn get_clock(&self) -> ClientResult<Clock>;
}
