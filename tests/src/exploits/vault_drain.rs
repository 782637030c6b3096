//! A third party trying to get at the stakes in someone else's game.

#[cfg(test)]
mod tests {
    use crate::harness::{game_error, TestCluster};
    use dng_client::prelude::*;
    use dng_runtime::{InstructionError, TransactionError};
    use durable_nonce_game::instruction::game_accounts;
    use durable_nonce_game::{
        AccountError, Board, GameError, GameInstruction, GameState, BET_LAMPORTS,
        DAY_IN_SECONDS, ID,
    };
    use shared_crypto::{Keypair, Signer};
    use shared_types::{AccountMeta, Instruction};

    const OPENING: Board = [0, 0, 0, 0, 2, 0, 0, 0, 0];

    #[tokio::test]
    async fn test_outsider_cannot_claim_timeout() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let alice = env.player(10).await?;
        let bob = env.player(10).await?;
        let mallory = env.player(1).await?;
        let p1 = alice.pubkey();
        game.methods().create_game(&alice)?.rpc().await?;
        game.methods().accept_game(&bob, &p1, OPENING)?.rpc().await?;

        env.cluster.warp_clock(DAY_IN_SECONDS).await;

        let err = game
            .methods()
            .settle_game(&mallory, &p1)?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::NotYourSettlment));
        assert_eq!(game.vault_balance(&p1).await?, 2 * BET_LAMPORTS);
        Ok(())
    }

    #[tokio::test]
    async fn test_outsider_cannot_move_or_refund() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let alice = env.player(10).await?;
        let mallory = env.player(1).await?;
        let p1 = alice.pubkey();
        game.methods().create_game(&alice)?.rpc().await?;

        let err = game
            .methods()
            .settle_game(&mallory, &p1)?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::NotYourSettlment));

        let bob = env.player(10).await?;
        game.methods().accept_game(&bob, &p1, OPENING)?.rpc().await?;
        let err = game
            .methods()
            .play_game(&mallory, &p1, [1, 0, 0, 0, 2, 0, 0, 0, 0])?
            .rpc()
            .await
            .unwrap_err();
        assert_eq!(game_error(&err), Some(GameError::NotYourTurn));
        assert_eq!(game.fetch_game(&p1).await?.state, GameState::PlayerOneTurn);
        Ok(())
    }

    #[tokio::test]
    async fn test_settle_into_spoofed_vault() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let alice = env.player(10).await?;
        let mallory = env.player(1).await?;
        let p1 = alice.pubkey();
        game.methods().create_game(&alice)?.rpc().await?;

        let mut accounts = game_accounts(&alice.pubkey(), &alice.pubkey(), &p1)?;
        accounts[3] = AccountMeta::new(mallory.pubkey(), false);
        let ix = Instruction::new_with_bytes(ID, &GameInstruction::SettleGame.pack(), accounts);

        let err = env.provider.send_and_confirm(&[ix], &[&alice]).await.unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::InstructionError(
                0,
                InstructionError::Custom(AccountError::InvalidSeeds as u32)
            ))
        );
        assert_eq!(game.vault_balance(&p1).await?, BET_LAMPORTS);
        Ok(())
    }

    #[tokio::test]
    async fn test_player_must_sign_their_own_stake() -> anyhow::Result<()> {
        let env = TestCluster::start().await?;
        let game = env.game().await?;
        let victim = env.player(10).await?;

        let mut accounts =
            game_accounts(&victim.pubkey(), &env.provider.pubkey(), &victim.pubkey())?;
        accounts[0] = AccountMeta::new(victim.pubkey(), false);
        let ix = Instruction::new_with_bytes(ID, &GameInstruction::CreateGame.pack(), accounts);

        let err = env.provider.send_and_confirm(&[ix], &[]).await.unwrap_err();
        assert_eq!(
            err.transaction_error(),
            Some(&TransactionError::InstructionError(
                0,
                InstructionError::Custom(AccountError::MissingSigner as u32)
            ))
        );
        assert_eq!(env.balance(&victim).await?, 10 * shared_types::LAMPORTS_PER_SOL);
        Ok(())
    }
}
