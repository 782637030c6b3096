//! # Smoke Test
//!
//! Provider from the environment, program by name, one `initialize`.

#[cfg(test)]
mod tests {
    use dng_client::prelude::*;
    use tracing::info;

    #[tokio::test]
    async fn is_initialized() -> anyhow::Result<()> {
        init_tracing(&LogConfig::from_env());

        let provider = Provider::env().await?;
        let program = Workspace::new(provider)
            .program("DurableNonceGame")
            .await?;

        let tx = program.methods().initialize().rpc().await?;
        info!("Your transaction signature {tx}");

        assert!(!tx.is_placeholder());
        Ok(())
    }

    #[tokio::test]
    async fn initialize_logs_greeting_and_is_finalized() -> anyhow::Result<()> {
        let provider = Provider::local(shared_crypto::Keypair::new()).await?;
        let program = Workspace::new(provider.clone())
            .program("durable_nonce_game")
            .await?;

        let tx = program.methods().initialize().rpc().await?;
        let status = provider
            .connection()
            .get_signature_status(&tx)
            .await?
            .ok_or_else(|| anyhow::anyhow!("no status for {tx}"))?;

        assert!(status.err.is_none());
        assert_eq!(status.confirmation_status, Commitment::Finalized);
        let greeting = format!("Program log: Greetings from: {}", program.id());
        assert!(status.logs.iter().any(|line| line == &greeting));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_program_is_not_in_workspace() -> anyhow::Result<()> {
        let provider = Provider::local(shared_crypto::Keypair::new()).await?;
        let result = Workspace::new(provider).program("NoSuchProgram").await;
        assert!(matches!(result, Err(ClientError::ProgramNotFound(_))));
        Ok(())
    }
}
