//! Game instructions and their builders.
//!
//! Every game instruction after `Initialize` takes the same five accounts:
//!
//! | # | Account | Privileges |
//! |---|---------|------------|
//! | 0 | acting player | signer, writable |
//! | 1 | fee and rent payer | signer, writable |
//! | 2 | game PDA `["game", player_one]` | writable |
//! | 3 | vault PDA `["vault", game]` | writable |
//! | 4 | system program | read-only |

use serde::{Deserialize, Serialize};
use shared_crypto::CryptoError;
use shared_types::{AccountMeta, Instruction, Pubkey, SYSTEM_PROGRAM_ID};

use crate::domain::Board;
use crate::pda::{find_game_address, find_vault_address};
use crate::ID;

/// Instructions understood by the game program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameInstruction {
    /// Greet; touches no accounts.
    Initialize,
    /// Open a game and stake the bet.
    CreateGame,
    /// Join a pending game with an opening move.
    AcceptGame {
        /// Board with player two's first mark.
        board: Board,
    },
    /// Make a move.
    PlayGame {
        /// Board after the move.
        board: Board,
    },
    /// Collect winnings, a refund or a draw share.
    SettleGame,
}

impl GameInstruction {
    /// Encode as instruction data (bincode layout).
    #[must_use]
    pub fn pack(&self) -> Vec<u8> {
        let (tag, board): (u32, Option<&Board>) = match self {
            Self::Initialize => (0, None),
            Self::CreateGame => (1, None),
            Self::AcceptGame { board } => (2, Some(board)),
            Self::PlayGame { board } => (3, Some(board)),
            Self::SettleGame => (4, None),
        };
        let mut out = tag.to_le_bytes().to_vec();
        if let Some(board) = board {
            out.extend_from_slice(board);
        }
        out
    }

    /// Decode instruction data.
    pub fn unpack(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

/// Account list shared by every game instruction.
pub fn game_accounts(
    player: &Pubkey,
    payer: &Pubkey,
    player_one: &Pubkey,
) -> Result<Vec<AccountMeta>, CryptoError> {
    let (game, _) = find_game_address(player_one)?;
    let (vault, _) = find_vault_address(&game)?;
    Ok(vec![
        AccountMeta::new(*player, true),
        AccountMeta::new(*payer, true),
        AccountMeta::new(game, false),
        AccountMeta::new(vault, false),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
    ])
}

/// `Initialize`.
#[must_use]
pub fn initialize() -> Instruction {
    Instruction::new_with_bytes(ID, &GameInstruction::Initialize.pack(), Vec::new())
}

/// `CreateGame` by `player`, rent paid by `payer`.
pub fn create_game(player: &Pubkey, payer: &Pubkey) -> Result<Instruction, CryptoError> {
    Ok(Instruction::new_with_bytes(
        ID,
        &GameInstruction::CreateGame.pack(),
        game_accounts(player, payer, player)?,
    ))
}

/// `AcceptGame` of `player_one`'s game by `player_two`.
pub fn accept_game(
    player_two: &Pubkey,
    payer: &Pubkey,
    player_one: &Pubkey,
    board: Board,
) -> Result<Instruction, CryptoError> {
    Ok(Instruction::new_with_bytes(
        ID,
        &GameInstruction::AcceptGame { board }.pack(),
        game_accounts(player_two, payer, player_one)?,
    ))
}

/// `PlayGame` in `player_one`'s game.
pub fn play_game(
    player: &Pubkey,
    payer: &Pubkey,
    player_one: &Pubkey,
    board: Board,
) -> Result<Instruction, CryptoError> {
    Ok(Instruction::new_with_bytes(
        ID,
        &GameInstruction::PlayGame { board }.pack(),
        game_accounts(player, payer, player_one)?,
    ))
}

/// `SettleGame` in `player_one`'s game.
pub fn settle_game(
    player: &Pubkey,
    payer: &Pubkey,
    player_one: &Pubkey,
) -> Result<Instruction, CryptoError> {
    Ok(Instruction::new_with_bytes(
        ID,
        &GameInstruction::SettleGame.pack(),
        game_accounts(player, payer, player_one)?,
    ))
}
