//! Replay and tampering attacks on signed moves.

#[cfg(test)]
mod tests {
    use crate::harness::TestCluster;
    use dng_client::prelude::*;
    use dng_runtime::TransactionError;
    use durable_nonce_game::{Board, GameState};
    use shared_crypto::{Keypair, Signer};

    const OPENING: Board = [0, 0, 0, 0, 2, 0, 0, 0, 0];

    async fn started(
        env: &TestCluster,
        game: &DurableNonceGameClient,
    ) -> anyhow::Result<(Keypair, Keypair)> {
        let alice = env.player(10).await?;
        let bob = env.player(10).await?;
        game.methods().create_game(&alice)?.rpc().await?;
        game.methods()
            .accept_game(&bob, &alice.pubkey(), OPENING)?
            .rpc()
            .await?;
        Ok((alice, bob))
    }

    #[tokio::test]
    async fn test_confirmed_move_cannot_be_replayed() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let tx = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .transaction()
            .await?;
        env.provider.send_and_confirm_transaction(&tx).await?;

        let err = env
            .provider
            .send_and_confirm_transaction(&tx)
            .await
            .unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::AlreadyProcessed)
        );
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::PlayerTwoTurn);
        Ok(())
    }

    #[tokio::test]
    async fn test_durable_move_cannot_be_replayed() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let nonce = Keypair::new();
        create_nonce_account(&env.provider, &nonce, &alice.pubkey()).await?;
        let tx = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .durable_nonce(nonce.pubkey(), &alice)
            .transaction()
            .await?;
        env.provider.send_and_confirm_transaction(&tx).await?;

        env.cluster.advance_slots(200).await;
        let err = env
            .provider
            .send_and_confirm_transaction(&tx)
            .await
            .unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::AlreadyProcessed)
        );
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::PlayerTwoTurn);
        Ok(())
    }

    #[tokio::test]
    async fn test_tampered_board_fails_signature_check() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let mut tx = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .transaction()
            .await?;
        let data = &mut tx.message.instructions[0].data;
        let last = data.len() - 1;
        data[last] = 1;

        let err = env
            .provider
            .send_and_confirm_transaction(&tx)
            .await
            .unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::SignatureFailure)
        );
        assert_eq!(game.fetch_game(&p1).await?.board, OPENING);
        Ok(())
    }
}
