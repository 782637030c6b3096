//! Durable nonce account helpers.

use dng_runtime::domain::{NonceData, NonceState, NonceVersions, NONCE_ACCOUNT_LENGTH};
use dng_runtime::system_program;
use shared_crypto::{Keypair, Signer};
use shared_types::{Pubkey, Signature, SYSTEM_PROGRAM_ID};
use tracing::info;

use crate::errors::{ClientError, ClientResult};
use crate::ports::RpcClient;
use crate::provider::Provider;

/// Create a rent-exempt nonce account at `nonce`, paid by the wallet and
/// controlled by `authority`.
pub async fn create_nonce_account(
    provider: &Provider,
    nonce: &Keypair,
    authority: &Pubkey,
) -> ClientResult<Signature> {
    let lamports = provider
        .connection()
        .get_minimum_balance_for_rent_exemption(NONCE_ACCOUNT_LENGTH)
        .await?;
    let instructions = system_program::create_nonce_account(
        &provider.pubkey(),
        &nonce.pubkey(),
        authority,
        lamports,
    );
    let signature = provider.send_and_confirm(&instructions, &[nonce]).await?;
    info!(nonce = %nonce.pubkey(), %authority, "Nonce account created");
    Ok(signature)
}

/// Advance `nonce` on its own, invalidating anything signed against the
/// current value.
pub async fn advance_nonce(
    provider: &Provider,
    nonce: &Pubkey,
    authority: &Keypair,
) -> ClientResult<Signature> {
    let ix = system_program::advance_nonce_account(nonce, &authority.pubkey());
    provider.send_and_confirm(&[ix], &[authority]).await
}

/// Stored state of an initialized nonce account.
///
/// # Errors
///
/// `AccountNotFound` if the account does not exist, `AccountDecode` if it is
/// not an initialized nonce account.
pub async fn fetch_nonce(connection: &dyn RpcClient, nonce: &Pubkey) -> ClientResult<NonceData> {
    let account = connection
        .get_account(nonce)
        .await?
        .ok_or(ClientError::AccountNotFound(*nonce))?;
    let decode_error = |reason: &str| ClientError::AccountDecode {
        pubkey: *nonce,
        reason: reason.to_string(),
    };

    if account.owner != SYSTEM_PROGRAM_ID {
        return Err(decode_error("not owned by the system program"));
    }
    match NonceVersions::from_account_data(&account.data) {
        Some(NonceState::Initialized(data)) => Ok(data),
        Some(NonceState::Uninitialized) => Err(decode_error("nonce is not initialized")),
        None => Err(decode_error("not a nonce account")),
    }
}
