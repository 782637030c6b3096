//! # Provider
//!
//! A connection to a cluster plus the wallet that pays for and signs every
//! request.

use std::sync::Arc;
use std::time::Duration;

use shared_crypto::{read_keypair_file, sign_transaction, Keypair, Signer};
use shared_types::{Hash, Instruction, Pubkey, Signature, Transaction, LAMPORTS_PER_SOL};
use tracing::{debug, info, instrument, warn};

use crate::adapters::LocalCluster;
use crate::config::{Cluster, Commitment, ProviderConfig};
use crate::errors::{ClientError, ClientResult};
use crate::ports::RpcClient;

/// A signer that can be held across `.await` points.
pub type SignerRef<'a> = &'a (dyn Signer + Sync);

/// Delay between signature status polls.
const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Cluster connection and paying wallet.
#[derive(Clone)]
pub struct Provider {
    connection: Arc<dyn RpcClient>,
    wallet: Arc<Keypair>,
    config: ProviderConfig,
}

impl Provider {
    /// Provider over an existing connection. Does not fund the wallet.
    pub fn new(connection: Arc<dyn RpcClient>, wallet: Keypair, config: ProviderConfig) -> Self {
        Self {
            connection,
            wallet: Arc::new(wallet),
            config,
        }
    }

    /// Provider described by the `DNG_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, an unreadable wallet file or a failed
    /// airdrop.
    pub async fn env() -> ClientResult<Self> {
        let config = ProviderConfig::from_env()?;
        Self::from_config(config).await
    }

    /// Provider for `config`: connect, load the wallet and fund it.
    #[instrument(skip_all, fields(cluster = %config.cluster))]
    pub async fn from_config(config: ProviderConfig) -> ClientResult<Self> {
        let wallet = match &config.wallet {
            Some(path) => {
                debug!(path = %path.display(), "Loading wallet");
                read_keypair_file(path)?
            }
            None => Keypair::new(),
        };
        let connection: Arc<dyn RpcClient> = match config.cluster {
            Cluster::Localnet => Arc::new(LocalCluster::new()),
        };

        let provider = Self::new(connection, wallet, config);
        provider.fund_wallet().await?;
        info!(wallet = %provider.pubkey(), "Provider ready");
        Ok(provider)
    }

    /// Provider for `wallet` on a fresh local cluster, funded with the
    /// default airdrop.
    pub async fn local(wallet: Keypair) -> ClientResult<Self> {
        let provider = Self::new(
            Arc::new(LocalCluster::new()),
            wallet,
            ProviderConfig::default(),
        );
        provider.fund_wallet().await?;
        Ok(provider)
    }

    /// Top the wallet up to the configured airdrop amount.
    async fn fund_wallet(&self) -> ClientResult<()> {
        let target = self.config.airdrop_sol.saturating_mul(LAMPORTS_PER_SOL);
        let balance = self.connection.get_balance(&self.pubkey()).await?;
        if balance < target {
            let signature = self
                .connection
                .request_airdrop(&self.pubkey(), target - balance)
                .await?;
            self.confirm(&signature).await?;
        }
        Ok(())
    }

    /// The cluster connection.
    pub fn connection(&self) -> &Arc<dyn RpcClient> {
        &self.connection
    }

    /// The paying wallet.
    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    /// The wallet's address.
    pub fn pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Commitment awaited by `send_and_confirm`.
    pub fn commitment(&self) -> Commitment {
        self.config.commitment
    }

    /// Build a transaction paid by the wallet and sign it with the wallet and
    /// `signers` against `blockhash`.
    ///
    /// Signers with the wallet's key are skipped.
    pub fn sign_transaction(
        &self,
        instructions: &[Instruction],
        signers: &[SignerRef<'_>],
        blockhash: Hash,
    ) -> ClientResult<Transaction> {
        let payer = self.pubkey();
        let mut all: Vec<&dyn Signer> = Vec::with_capacity(signers.len() + 1);
        all.push(&*self.wallet);
        for &signer in signers {
            let key = signer.pubkey();
            if !all.iter().any(|s| s.pubkey() == key) {
                all.push(signer);
            }
        }

        let mut tx = Transaction::new_with_payer(instructions, Some(&payer));
        sign_transaction(&mut tx, &all, blockhash)?;
        Ok(tx)
    }

    /// Sign `instructions` against the latest blockhash, send and confirm.
    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        signers: &[SignerRef<'_>],
    ) -> ClientResult<Signature> {
        let blockhash = self.connection.get_latest_blockhash().await?;
        let tx = self.sign_transaction(instructions, signers, blockhash)?;
        self.send_and_confirm_transaction(&tx).await
    }

    /// Send an already signed transaction and wait for the configured
    /// commitment.
    #[instrument(skip_all, fields(signature = %tx.id()))]
    pub async fn send_and_confirm_transaction(&self, tx: &Transaction) -> ClientResult<Signature> {
        let signature = self.connection.send_transaction(tx).await?;
        self.confirm(&signature).await
    }

    /// Poll until `signature` reaches the configured commitment.
    ///
    /// # Errors
    ///
    /// `ClientError::Transaction` if it landed with an error,
    /// `ClientError::Unconfirmed` if it never showed up.
    pub async fn confirm(&self, signature: &Signature) -> ClientResult<Signature> {
        for attempt in 0..self.config.confirm_attempts.max(1) {
            if let Some(status) = self.connection.get_signature_status(signature).await? {
                if let Some(err) = status.err {
                    warn!(%signature, %err, "Transaction failed");
                    return Err(ClientError::Transaction {
                        signature: *signature,
                        err,
                        logs: status.logs,
                    });
                }
                if status.satisfies(self.config.commitment) {
                    debug!(%signature, slot = status.slot, attempt, "Transaction confirmed");
                    return Ok(*signature);
                }
            }
            tokio::time::sleep(CONFIRM_POLL_INTERVAL).await;
        }
        Err(ClientError::Unconfirmed(*signature))
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("wallet", &self.pubkey())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
