//! Shared fixtures: a local cluster the test can reach into, a provider on
//! top of it, and funded players.

use std::sync::Arc;

use dng_client::prelude::*;
use dng_runtime::{InstructionError, TransactionError};
use durable_nonce_game::GameError;
use shared_crypto::{Keypair, Signer};
use shared_types::LAMPORTS_PER_SOL;

/// Lamports charged per signature.
pub const FEE: u64 = 5_000;

/// A provider whose cluster stays reachable for clock and slot control.
pub struct TestCluster {
    pub cluster: Arc<LocalCluster>,
    pub provider: Provider,
    pub workspace: Workspace,
}

impl TestCluster {
    /// Fresh cluster with a wallet holding 100 SOL.
    pub async fn start() -> ClientResult<Self> {
        init_tracing(&LogConfig::from_env());

        let cluster = Arc::new(LocalCluster::new());
        let wallet = Keypair::new();
        let airdrop = cluster
            .request_airdrop(&wallet.pubkey(), 100 * LAMPORTS_PER_SOL)
            .await?;

        let provider = Provider::new(cluster.clone(), wallet, ProviderConfig::default());
        provider.confirm(&airdrop).await?;
        let workspace = Workspace::new(provider.clone());

        Ok(Self {
            cluster,
            provider,
            workspace,
        })
    }

    /// A player holding `sol` SOL, separate from the paying wallet.
    pub async fn player(&self, sol: u64) -> ClientResult<Keypair> {
        let player = Keypair::new();
        let signature = self
            .cluster
            .request_airdrop(&player.pubkey(), sol * LAMPORTS_PER_SOL)
            .await?;
        self.provider.confirm(&signature).await?;
        Ok(player)
    }

    /// Client for the deployed game.
    pub async fn game(&self) -> ClientResult<DurableNonceGameClient> {
        DurableNonceGameClient::new(&self.workspace).await
    }

    pub async fn balance(&self, player: &Keypair) -> ClientResult<u64> {
        self.cluster.get_balance(&player.pubkey()).await
    }
}

/// Game error behind a failed request, if any.
pub fn game_error(err: &ClientError) -> Option<GameError> {
    match err.transaction_error()? {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => {
            GameError::from_code(*code)
        }
        _ => None,
    }
}
