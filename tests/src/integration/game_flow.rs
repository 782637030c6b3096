//! # Game Flow Tests
//!
//! Whole games through the client: stakes move from players to the vault
//! and back out to the winner, the draw or the player left waiting.

#[cfg(test)]
mod tests {
    use crate::harness::{game_error, TestCluster};
    use dng_client::prelude::*;
    use durable_nonce_game::{Board, Game, GameError, GameState, BET_LAMPORTS, DAY_IN_SECONDS};
    use shared_crypto::{Keypair, Signer};
    use shared_types::LAMPORTS_PER_SOL;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const OPENING: Board = [0, 0, 0, 0, 2, 0, 0, 0, 0];

    async fn started(
        env: &TestCluster,
        game: &DurableNonceGameClient,
    ) -> ClientResult<(Keypair, Keypair)> {
        let alice = env.player(10).await?;
        let bob = env.player(10).await?;
        game.methods().create_game(&alice)?.rpc().await?;
        game.methods()
            .accept_game(&bob, &alice.pubkey(), OPENING)?
            .rpc()
            .await?;
        Ok((alice, bob))
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_full_game_winner_collects() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let state = game.fetch_game(&p1).await?;
        assert_eq!(state.state, GameState::PlayerOneTurn);
        assert_eq!(state.player_two, bob.pubkey());
        assert_eq!(game.vault_balance(&p1).await?, 2 * BET_LAMPORTS);

        let moves: [(&Keypair, Board); 5] = [
            (&alice, [1, 0, 0, 0, 2, 0, 0, 0, 0]),
            (&bob, [1, 2, 0, 0, 2, 0, 0, 0, 0]),
            (&alice, [1, 2, 0, 1, 2, 0, 0, 0, 0]),
            (&bob, [1, 2, 0, 1, 2, 2, 0, 0, 0]),
            (&alice, [1, 2, 0, 1, 2, 2, 1, 0, 0]),
        ];
        for (player, board) in moves {
            game.methods().play_game(player, &p1, board)?.rpc().await?;
        }

        assert_eq!(game.fetch_game(&p1).await?.state, GameState::PlayerOneWon);
        assert_eq!(game.vault_balance(&p1).await?, 0);

        game.methods().settle_game(&alice, &p1)?.rpc().await?;
        assert!(matches!(
            game.fetch_game(&p1).await,
            Err(ClientError::AccountNotFound(_))
        ));

        // Fees were paid by the wallet, rent came back on close.
        assert_eq!(env.balance(&alice).await?, 10 * LAMPORTS_PER_SOL + BET_LAMPORTS);
        assert_eq!(env.balance(&bob).await?, 10 * LAMPORTS_PER_SOL - BET_LAMPORTS);
        Ok(())
    }

    #[tokio::test]
    async fn test_draw_split_between_players() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let moves: [(&Keypair, Board); 8] = [
            (&alice, [1, 0, 0, 0, 2, 0, 0, 0, 0]),
            (&bob, [1, 2, 0, 0, 2, 0, 0, 0, 0]),
            (&alice, [1, 2, 0, 0, 2, 0, 0, 1, 0]),
            (&bob, [1, 2, 0, 0, 2, 2, 0, 1, 0]),
            (&alice, [1, 2, 0, 1, 2, 2, 0, 1, 0]),
            (&bob, [1, 2, 0, 1, 2, 2, 2, 1, 0]),
            (&alice, [1, 2, 1, 1, 2, 2, 2, 1, 0]),
            (&bob, [1, 2, 1, 1, 2, 2, 2, 1, 2]),
        ];
        for (player, board) in moves {
            game.methods().play_game(player, &p1, board)?.rpc().await?;
        }
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::Draw);

        game.methods().settle_game(&bob, &p1)?.rpc().await?;
        assert_eq!(
            game.fetch_game(&p1).await?.state,
            GameState::PlayerTwoClaimed
        );
        assert_eq!(game.vault_balance(&p1).await?, BET_LAMPORTS);

        let err = game
            .methods()
            .settle_game(&bob, &p1)?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::NotYourSettlment));

        game.methods().settle_game(&alice, &p1)?.rpc().await?;
        assert_eq!(game.vault_balance(&p1).await?, 0);
        assert_eq!(env.balance(&alice).await?, 10 * LAMPORTS_PER_SOL);
        assert_eq!(env.balance(&bob).await?, 10 * LAMPORTS_PER_SOL);
        Ok(())
    }

    #[tokio::test]
    async fn test_abandoned_opponent_claims_after_a_day() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let err = game
            .methods()
            .settle_game(&bob, &p1)?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::TimeNotPassed));

        env.cluster.warp_clock(DAY_IN_SECONDS).await;

        let err = game
            .methods()
            .play_game(&alice, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::Timeout));

        let before = env.balance(&bob).await?;
        game.methods().settle_game(&bob, &p1)?.rpc().await?;
        let rent = env
            .cluster
            .get_minimum_balance_for_rent_exemption(Game::SPACE)
            .await?;
        assert_eq!(env.balance(&bob).await?, before + 2 * BET_LAMPORTS + rent);
        Ok(())
    }

    #[tokio::test]
    async fn test_pending_game_refunded_to_creator() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let alice = env.player(10).await?;
        let p1 = alice.pubkey();

        game.methods().create_game(&alice)?.rpc().await?;
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::Pending);

        game.methods().settle_game(&alice, &p1)?.rpc().await?;
        assert_eq!(env.balance(&alice).await?, 10 * LAMPORTS_PER_SOL);

        // The address is free again.
        game.methods().create_game(&alice)?.rpc().await?;
        assert_eq!(game.fetch_game(&p1).await?.player_one, p1);
        Ok(())
    }

    // =========================================================================
    // FAILURES SURFACED TO THE CLIENT
    // =========================================================================

    #[tokio::test]
    async fn test_rule_violation_carries_program_logs() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let (alice, bob) = started(&env, &game).await?;
        let p1 = alice.pubkey();

        let err = game
            .methods()
            .play_game(&bob, &p1, [0, 2, 0, 0, 2, 0, 0, 0, 0])?
            .rpc()
            .await
            .unwrap_err();

        assert_eq!(game_error(&err), Some(GameError::NotYourTurn));
        assert!(!err.logs().is_empty());
        assert!(err.logs().iter().any(|line| line.contains("failed")));
        Ok(())
    }

    #[tokio::test]
    async fn test_self_play_rejected() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let alice = env.player(10).await?;
        let p1 = alice.pubkey();
        game.methods().create_game(&alice)?.rpc().await?;

        let err = game
            .methods()
            .accept_game(&alice, &p1, OPENING)?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::CannotPlayAgainstYourself));
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::Pending);
        Ok(())
    }
}
