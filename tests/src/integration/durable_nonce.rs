//! # Durable Nonce Tests
//!
//! A move signed against a nonce account instead of a recent blockhash can
//! be handed to anyone and submitted long after every blockhash it could
//! have used has expired.

#[cfg(test)]
mod tests {
    use crate::harness::TestCluster;
    use dng_client::prelude::*;
    use dng_runtime::domain::MAX_RECENT_BLOCKHASHES;
    use dng_runtime::TransactionError;
    use durable_nonce_game::{Board, GameState};
    use shared_crypto::{Keypair, Signer};

    const OPENING: Board = [0, 0, 0, 0, 2, 0, 0, 0, 0];

    async fn game_with_nonce(
        env: &TestCluster,
        game: &DurableNonceGameClient,
    ) -> anyhow::Result<(Keypair, Keypair, Keypair)> {
        let alice = env.player(10).await?;
        let bob = env.player(10).await?;
        game.methods().create_game(&alice)?.rpc().await?;
        game.methods()
            .accept_game(&bob, &alice.pubkey(), OPENING)?
            .rpc()
            .await?;

        let nonce = Keypair::new();
        create_nonce_account(&env.provider, &nonce, &alice.pubkey()).await?;
        Ok((alice, bob, nonce))
    }

    #[tokio::test]
    async fn test_presigned_move_lands_after_blockhashes_expire() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob, nonce) = game_with_nonce(&env, &game).await?;
        let p1 = alice.pubkey();

        let stored = fetch_nonce(&**env.provider.connection(), &nonce.pubkey()).await?;
        let presigned = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .durable_nonce(nonce.pubkey(), &alice)
            .transaction()
            .await?;
        assert_eq!(presigned.recent_blockhash(), stored.durable_nonce);

        // An ordinary transaction signed at the same time.
        let ordinary = game
            .methods()
            .initialize()
            .transaction()
            .await?;

        env.cluster
            .advance_slots(MAX_RECENT_BLOCKHASHES as u64 + 1)
            .await;

        let err = env
            .provider
            .send_and_confirm_transaction(&ordinary)
            .await
            .unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::BlockhashNotFound)
        );

        env.provider.send_and_confirm_transaction(&presigned).await?;
        let state = game.fetch_game(&p1).await?;
        assert_eq!(state.state, GameState::PlayerTwoTurn);
        assert_eq!(state.board, [1, 0, 0, 0, 2, 0, 0, 0, 0]);

        let advanced = fetch_nonce(&**env.provider.connection(), &nonce.pubkey()).await?;
        assert_ne!(advanced.durable_nonce, stored.durable_nonce);
        Ok(())
    }

    #[tokio::test]
    async fn test_advancing_the_nonce_cancels_a_presigned_move() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob, nonce) = game_with_nonce(&env, &game).await?;
        let p1 = alice.pubkey();

        let presigned = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .durable_nonce(nonce.pubkey(), &alice)
            .transaction()
            .await?;

        advance_nonce(&env.provider, &nonce.pubkey(), &alice).await?;

        let err = env
            .provider
            .send_and_confirm_transaction(&presigned)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Rejected(_)));
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::PlayerOneTurn);
        Ok(())
    }

    #[tokio::test]
    async fn test_nonce_request_through_rpc() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob, nonce) = game_with_nonce(&env, &game).await?;
        let p1 = alice.pubkey();

        game.methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .durable_nonce(nonce.pubkey(), &alice)
            .rpc()
            .await?;

        // The next request reads the advanced nonce on its own.
        game.methods()
            .play_game(&bob, &p1, [1, 2, 0, 0, 2, 0, 0, 0, 0])?
            .durable_nonce(nonce.pubkey(), &alice)
            .rpc()
            .await?;

        let state = game.fetch_game(&p1).await?;
        assert_eq!(state.state, GameState::PlayerOneTurn);
        assert_eq!(state.board, [1, 2, 0, 0, 2, 0, 0, 0, 0]);
        Ok(())
    }
}
