//! System program execution.

use shared_types::{Pubkey, SYSTEM_PROGRAM_ID};
use thiserror::Error;
use tracing::debug;

use crate::domain::{
    durable_nonce_from_blockhash, NonceData, NonceState, NonceVersions, MAX_PERMITTED_DATA_LENGTH,
    NONCE_ACCOUNT_LENGTH,
};
use crate::errors::InstructionError;
use crate::invoke_context::InvokeContext;
use crate::ports::inbound::BuiltinProgram;
use crate::system_program::instruction::SystemInstruction;

/// System program failures, surfaced as `InstructionError::Custom(code)`.
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SystemError {
    #[error("an account with the same address already exists")]
    AccountAlreadyInUse = 0,
    #[error("account does not have enough lamports to perform the operation")]
    ResultWithNegativeLamports = 1,
    #[error("cannot assign account to this program id")]
    InvalidProgramId = 2,
    #[error("cannot allocate account data of this length")]
    InvalidAccountDataLength = 3,
    #[error("length of requested seed is too long")]
    MaxSeedLengthExceeded = 4,
    #[error("provided address does not match addressed derived from seed")]
    AddressWithSeedMismatch = 5,
    #[error("advancing stored nonce requires a populated recent blockhash")]
    NonceNoRecentBlockhashes = 6,
    #[error("stored nonce is still in recent blockhashes")]
    NonceBlockhashNotExpired = 7,
    #[error("specified nonce does not match stored nonce")]
    NonceUnexpectedBlockhashValue = 8,
}

impl From<SystemError> for InstructionError {
    fn from(err: SystemError) -> Self {
        InstructionError::Custom(err as u32)
    }
}

/// The system program builtin.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProgram;

impl BuiltinProgram for SystemProgram {
    fn id(&self) -> Pubkey {
        SYSTEM_PROGRAM_ID
    }

    fn name(&self) -> &str {
        "system_program"
    }

    fn process(&self, ctx: &mut InvokeContext<'_>, data: &[u8]) -> Result<(), InstructionError> {
        let instruction =
            SystemInstruction::unpack(data).map_err(|_| InstructionError::InvalidInstructionData)?;
        debug!(?instruction, "system instruction");

        match instruction {
            SystemInstruction::CreateAccount {
                lamports,
                space,
                owner,
            } => create_account(ctx, lamports, space, &owner),
            SystemInstruction::Assign { owner } => assign(ctx, 0, &owner),
            SystemInstruction::Transfer { lamports } => transfer(ctx, lamports),
            SystemInstruction::AdvanceNonceAccount => advance_nonce(ctx),
            SystemInstruction::WithdrawNonceAccount(lamports) => withdraw_nonce(ctx, lamports),
            SystemInstruction::InitializeNonceAccount(authority) => {
                initialize_nonce(ctx, &authority)
            }
            SystemInstruction::AuthorizeNonceAccount(authority) => {
                authorize_nonce(ctx, &authority)
            }
        }
    }
}

// =============================================================================
// ACCOUNT MANAGEMENT
// =============================================================================

fn require_signer(ctx: &InvokeContext<'_>, i: usize) -> Result<(), InstructionError> {
    if ctx.is_signer(i)? {
        Ok(())
    } else {
        Err(InstructionError::MissingRequiredSignature)
    }
}

fn create_account(
    ctx: &mut InvokeContext<'_>,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Result<(), InstructionError> {
    require_signer(ctx, 0)?;
    require_signer(ctx, 1)?;

    let to = ctx.account(1)?;
    if to.lamports > 0 || !to.data.is_empty() || to.owner != SYSTEM_PROGRAM_ID {
        let key = ctx.key(1)?;
        ctx.log(format!("Create Account: account {key} already in use"));
        return Err(SystemError::AccountAlreadyInUse.into());
    }
    if space > MAX_PERMITTED_DATA_LENGTH {
        return Err(SystemError::InvalidAccountDataLength.into());
    }
    let available = ctx.account(0)?.lamports;
    if available < lamports {
        ctx.log(format!(
            "Transfer: insufficient lamports {available}, need {lamports}"
        ));
        return Err(SystemError::ResultWithNegativeLamports.into());
    }

    let to = ctx.account_mut(1)?;
    to.data = vec![0; space as usize];
    to.owner = *owner;
    ctx.transfer_lamports(0, 1, lamports)
}

fn assign(ctx: &mut InvokeContext<'_>, i: usize, owner: &Pubkey) -> Result<(), InstructionError> {
    if ctx.account(i)?.owner == *owner {
        return Ok(());
    }
    require_signer(ctx, i)?;
    ctx.account_mut(i)?.owner = *owner;
    Ok(())
}

fn transfer(ctx: &mut InvokeContext<'_>, lamports: u64) -> Result<(), InstructionError> {
    require_signer(ctx, 0)?;

    let (has_data, available) = {
        let from = ctx.account(0)?;
        (!from.data.is_empty(), from.lamports)
    };
    if has_data {
        ctx.log("Transfer: `from` must not carry data");
        return Err(InstructionError::InvalidArgument);
    }
    if available < lamports {
        ctx.log(format!(
            "Transfer: insufficient lamports {available}, need {lamports}"
        ));
        return Err(SystemError::ResultWithNegativeLamports.into());
    }
    ctx.transfer_lamports(0, 1, lamports)
}

// =============================================================================
// DURABLE NONCES
// =============================================================================

fn nonce_state(ctx: &InvokeContext<'_>, i: usize) -> Result<NonceState, InstructionError> {
    let account = ctx.account(i)?;
    if account.owner != SYSTEM_PROGRAM_ID {
        return Err(InstructionError::InvalidAccountOwner);
    }
    NonceVersions::from_account_data(&account.data).ok_or(InstructionError::InvalidAccountData)
}

fn store_nonce_state(
    ctx: &mut InvokeContext<'_>,
    i: usize,
    state: NonceState,
) -> Result<(), InstructionError> {
    NonceVersions::write_account_data(state, &mut ctx.account_mut(i)?.data)
        .map_err(|_| InstructionError::InvalidAccountData)
}

/// Keys of every signer among the running instruction's accounts.
fn signers(ctx: &InvokeContext<'_>) -> Result<Vec<Pubkey>, InstructionError> {
    let mut keys = Vec::new();
    for i in 0..ctx.num_accounts() {
        if ctx.is_signer(i)? {
            keys.push(ctx.key(i)?);
        }
    }
    Ok(keys)
}

fn require_authority(
    ctx: &mut InvokeContext<'_>,
    authority: &Pubkey,
) -> Result<(), InstructionError> {
    if signers(ctx)?.contains(authority) {
        Ok(())
    } else {
        ctx.log(format!("Nonce authority {authority} did not sign"));
        Err(InstructionError::MissingRequiredSignature)
    }
}

fn advance_nonce(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    if !ctx.is_writable(0)? {
        return Err(InstructionError::InvalidArgument);
    }
    let data = match nonce_state(ctx, 0)? {
        NonceState::Initialized(data) => data,
        NonceState::Uninitialized => {
            let key = ctx.key(0)?;
            ctx.log(format!("Advance nonce account: account {key} state is invalid"));
            return Err(InstructionError::InvalidAccountData);
        }
    };
    require_authority(ctx, &data.authority)?;

    let next = durable_nonce_from_blockhash(&ctx.blockhash());
    if next == data.durable_nonce {
        ctx.log("Advance nonce account: nonce can only advance once per slot");
        return Err(SystemError::NonceBlockhashNotExpired.into());
    }

    let lamports_per_signature = ctx.lamports_per_signature();
    store_nonce_state(
        ctx,
        0,
        NonceState::Initialized(NonceData {
            authority: data.authority,
            durable_nonce: next,
            lamports_per_signature,
        }),
    )
}

fn withdraw_nonce(ctx: &mut InvokeContext<'_>, lamports: u64) -> Result<(), InstructionError> {
    if !ctx.is_writable(0)? {
        return Err(InstructionError::InvalidArgument);
    }
    let balance = ctx.account(0)?.lamports;
    let signer = match nonce_state(ctx, 0)? {
        NonceState::Uninitialized => {
            if lamports > balance {
                return Err(InstructionError::InsufficientFunds);
            }
            ctx.key(0)?
        }
        NonceState::Initialized(data) => {
            if lamports == balance {
                if data.durable_nonce == durable_nonce_from_blockhash(&ctx.blockhash()) {
                    ctx.log("Withdraw nonce account: nonce can only advance once per slot");
                    return Err(SystemError::NonceBlockhashNotExpired.into());
                }
                store_nonce_state(ctx, 0, NonceState::Uninitialized)?;
            } else {
                let min_balance = ctx.rent().minimum_balance(ctx.account(0)?.data.len());
                if lamports.saturating_add(min_balance) > balance {
                    return Err(InstructionError::InsufficientFunds);
                }
            }
            data.authority
        }
    };
    require_authority(ctx, &signer)?;
    ctx.transfer_lamports(0, 1, lamports)
}

fn initialize_nonce(
    ctx: &mut InvokeContext<'_>,
    authority: &Pubkey,
) -> Result<(), InstructionError> {
    if !ctx.is_writable(0)? {
        return Err(InstructionError::InvalidArgument);
    }
    match nonce_state(ctx, 0)? {
        NonceState::Uninitialized => {}
        NonceState::Initialized(_) => {
            let key = ctx.key(0)?;
            ctx.log(format!("Initialize nonce account: account {key} state is invalid"));
            return Err(InstructionError::InvalidAccountData);
        }
    }
    let (data_len, available) = {
        let account = ctx.account(0)?;
        (account.data.len(), account.lamports)
    };
    if data_len != NONCE_ACCOUNT_LENGTH {
        return Err(InstructionError::InvalidAccountData);
    }
    let min_balance = ctx.rent().minimum_balance(NONCE_ACCOUNT_LENGTH);
    if available < min_balance {
        ctx.log(format!(
            "Initialize nonce account: insufficient lamports {available}, need {min_balance}"
        ));
        return Err(InstructionError::InsufficientFunds);
    }

    let state = NonceState::Initialized(NonceData {
        authority: *authority,
        durable_nonce: durable_nonce_from_blockhash(&ctx.blockhash()),
        lamports_per_signature: ctx.lamports_per_signature(),
    });
    store_nonce_state(ctx, 0, state)
}

fn authorize_nonce(
    ctx: &mut InvokeContext<'_>,
    new_authority: &Pubkey,
) -> Result<(), InstructionError> {
    if !ctx.is_writable(0)? {
        return Err(InstructionError::InvalidArgument);
    }
    let data = match nonce_state(ctx, 0)? {
        NonceState::Initialized(data) => data,
        NonceState::Uninitialized => return Err(InstructionError::InvalidAccountData),
    };
    require_authority(ctx, &data.authority)?;
    store_nonce_state(
        ctx,
        0,
        NonceState::Initialized(NonceData {
            authority: *new_authority,
            ..data
        }),
    )
}

// =============================================================================
// TESTS
// =============================================================================
