//! # Instruction Handlers
//!
//! Validates accounts, drives the game state machine and moves lamports
//! through the system program.

use dng_runtime::system_program;
use dng_runtime::{BuiltinProgram, InstructionError, InvokeContext};
use shared_types::{Pubkey, SYSTEM_PROGRAM_ID};
use tracing::debug;

use crate::domain::{Board, Game, GameState, BET_LAMPORTS};
use crate::errors::AccountError;
use crate::instruction::GameInstruction;
use crate::pda::{
    find_game_address, find_vault_address, game_address, vault_address, GAME_SEED, VAULT_SEED,
};
use crate::{ID, PROGRAM_NAME};

const PLAYER: usize = 0;
const PAYER: usize = 1;
const GAME: usize = 2;
const VAULT: usize = 3;
const SYSTEM_PROGRAM: usize = 4;

/// The durable nonce game program.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurableNonceGame;

impl BuiltinProgram for DurableNonceGame {
    fn id(&self) -> Pubkey {
        ID
    }

    fn name(&self) -> &str {
        PROGRAM_NAME
    }

    fn process(&self, ctx: &mut InvokeContext<'_>, data: &[u8]) -> Result<(), InstructionError> {
        let instruction =
            GameInstruction::unpack(data).map_err(|_| InstructionError::InvalidInstructionData)?;
        debug!(?instruction, "game instruction");

        match instruction {
            GameInstruction::Initialize => {
                ctx.log("Instruction: Initialize");
                initialize(ctx)
            }
            GameInstruction::CreateGame => {
                ctx.log("Instruction: CreateGame");
                create_game(ctx)
            }
            GameInstruction::AcceptGame { board } => {
                ctx.log("Instruction: AcceptGame");
                accept_game(ctx, board)
            }
            GameInstruction::PlayGame { board } => {
                ctx.log("Instruction: PlayGame");
                play_game(ctx, board)
            }
            GameInstruction::SettleGame => {
                ctx.log("Instruction: SettleGame");
                settle_game(ctx)
            }
        }
    }
}

fn initialize(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    let program_id = ctx.program_id()?;
    ctx.log(format!("Greetings from: {program_id}"));
    Ok(())
}

// =============================================================================
// ACCOUNT VALIDATION
// =============================================================================

/// The five accounts of a game instruction, checked for privileges.
fn check_common_accounts(ctx: &InvokeContext<'_>) -> Result<(), InstructionError> {
    if ctx.num_accounts() < 5 {
        return Err(InstructionError::NotEnoughAccountKeys);
    }
    for signer in [PLAYER, PAYER] {
        if !ctx.is_signer(signer)? {
            return Err(AccountError::MissingSigner.into());
        }
    }
    for writable in [PAYER, GAME, VAULT] {
        if !ctx.is_writable(writable)? {
            return Err(AccountError::AccountNotMutable.into());
        }
    }
    if ctx.key(SYSTEM_PROGRAM)? != SYSTEM_PROGRAM_ID {
        return Err(AccountError::InvalidProgramId.into());
    }
    Ok(())
}

/// Load the game and check the game and vault addresses against its bumps.
fn load_game(ctx: &InvokeContext<'_>) -> Result<Game, InstructionError> {
    let account = ctx.account(GAME)?;
    if account.owner != ID {
        return Err(if account.lamports == 0 {
            AccountError::AccountNotInitialized
        } else {
            AccountError::AccountOwnedByWrongProgram
        }
        .into());
    }
    let game = Game::try_from_account_data(&account.data)?;

    let game_key = ctx.key(GAME)?;
    let expected_game =
        game_address(&game.player_one, game.bump).map_err(|_| AccountError::InvalidSeeds)?;
    let expected_vault =
        vault_address(&game_key, game.vault_bump).map_err(|_| AccountError::InvalidSeeds)?;
    if game_key != expected_game || ctx.key(VAULT)? != expected_vault {
        return Err(AccountError::InvalidSeeds.into());
    }
    Ok(game)
}

fn save_game(ctx: &mut InvokeContext<'_>, game: &Game) -> Result<(), InstructionError> {
    game.write_account_data(&mut ctx.account_mut(GAME)?.data)?;
    Ok(())
}

/// Pay `lamports` from the vault to the acting player.
fn pay_from_vault(
    ctx: &mut InvokeContext<'_>,
    game: &Game,
    lamports: u64,
) -> Result<(), InstructionError> {
    if lamports == 0 {
        return Ok(());
    }
    let game_key = ctx.key(GAME)?;
    let vault_key = ctx.key(VAULT)?;
    let player = ctx.key(PLAYER)?;
    let bump = [game.vault_bump];
    let seeds: &[&[u8]] = &[VAULT_SEED, game_key.as_ref(), &bump];
    ctx.invoke_signed(
        &system_program::transfer(&vault_key, &player, lamports),
        &[seeds],
    )
}

/// Stake the bet from the acting player into the vault.
fn stake_bet(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    let player = ctx.key(PLAYER)?;
    let vault = ctx.key(VAULT)?;
    ctx.invoke(&system_program::transfer(&player, &vault, BET_LAMPORTS))
}

/// Return the game account's lamports to the payer and hand it back to the
/// system program.
fn close_game(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    let lamports = ctx.account(GAME)?.lamports;
    ctx.transfer_lamports(GAME, PAYER, lamports)?;
    let account = ctx.account_mut(GAME)?;
    account.data.clear();
    account.owner = SYSTEM_PROGRAM_ID;
    Ok(())
}

// =============================================================================
// HANDLERS
// =============================================================================

fn create_game(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    check_common_accounts(ctx)?;

    let player = ctx.key(PLAYER)?;
    let payer = ctx.key(PAYER)?;
    let game_key = ctx.key(GAME)?;
    let (expected_game, bump) =
        find_game_address(&player).map_err(|_| AccountError::InvalidSeeds)?;
    let (expected_vault, vault_bump) =
        find_vault_address(&game_key).map_err(|_| AccountError::InvalidSeeds)?;
    if game_key != expected_game || ctx.key(VAULT)? != expected_vault {
        return Err(AccountError::InvalidSeeds.into());
    }

    let rent = ctx.rent().minimum_balance(Game::SPACE);
    let bump_seed = [bump];
    let seeds: &[&[u8]] = &[GAME_SEED, player.as_ref(), &bump_seed];
    ctx.invoke_signed(
        &system_program::create_account(&payer, &game_key, rent, Game::SPACE as u64, &ID),
        &[seeds],
    )?;

    let game = Game::new(player, bump, vault_bump);
    save_game(ctx, &game)?;
    stake_bet(ctx)?;

    ctx.log(format!("Game {game_key} created by {player}"));
    Ok(())
}

fn accept_game(ctx: &mut InvokeContext<'_>, board: Board) -> Result<(), InstructionError> {
    check_common_accounts(ctx)?;
    let mut game = load_game(ctx)?;

    let player_two = ctx.key(PLAYER)?;
    let now = ctx.clock().unix_timestamp;
    game.accept(player_two, board, now)?;
    save_game(ctx, &game)?;
    stake_bet(ctx)?;

    ctx.log(format!("{player_two} accepted the game"));
    Ok(())
}

fn play_game(ctx: &mut InvokeContext<'_>, board: Board) -> Result<(), InstructionError> {
    check_common_accounts(ctx)?;
    let mut game = load_game(ctx)?;

    let player = ctx.key(PLAYER)?;
    let now = ctx.clock().unix_timestamp;
    let outcome = game.play(&player, board, now)?;
    save_game(ctx, &game)?;

    match outcome {
        Some(state) if state != GameState::Draw => {
            let pot = ctx.account(VAULT)?.lamports;
            pay_from_vault(ctx, &game, pot)?;
            ctx.log(format!("{player} won {pot} lamports"));
        }
        Some(_) => ctx.log("Draw"),
        None => {}
    }
    Ok(())
}

fn settle_game(ctx: &mut InvokeContext<'_>) -> Result<(), InstructionError> {
    check_common_accounts(ctx)?;
    let mut game = load_game(ctx)?;

    let player = ctx.key(PLAYER)?;
    let now = ctx.clock().unix_timestamp;
    let vault_lamports = ctx.account(VAULT)?.lamports;
    let settlement = game.settle(&player, now, vault_lamports)?;

    pay_from_vault(ctx, &game, settlement.payout)?;
    if settlement.close {
        close_game(ctx)?;
    } else {
        save_game(ctx, &game)?;
    }

    ctx.log(format!(
        "Settled {} lamports to {player}, state {:?}",
        settlement.payout, game.state
    ));
    Ok(())
}
