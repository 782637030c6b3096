//! # Game Account
//!
//! The on-chain game record and its state machine.
//!
//! ```text
//!              accept                play (no result)
//!   Pending ─────────▶ PlayerOneTurn ◀──────────────▶ PlayerTwoTurn
//!      │                     │ play (line / full board)    │
//!      │ settle (refund)     ▼                             ▼
//!      ▼              PlayerOneWon / PlayerTwoWon / Draw ──┘
//!   closed                   │                  │ settle (half)
//!                            │ settle           ▼
//!                            ▼        PlayerOneClaimed / PlayerTwoClaimed
//!                         closed                │ settle (rest)
//!                                               ▼
//!                                         DrawClaimed, closed
//! ```
//!
//! A turn left untouched for a day can be settled by the waiting player,
//! who takes the whole vault.

use serde::{Deserialize, Serialize};
use shared_crypto::hash;
use shared_types::{Pubkey, LAMPORTS_PER_SOL};

use crate::domain::rules::{
    check_winner, is_legal_move, is_legal_opening, Board, PLAYER_ONE, PLAYER_TWO,
};
use crate::errors::{AccountError, GameError};

/// Bet each player puts into the vault.
pub const BET_LAMPORTS: u64 = LAMPORTS_PER_SOL;

/// How long a player has to move before the opponent may claim the vault.
pub const DAY_IN_SECONDS: i64 = 60 * 60 * 24;

/// Length of the account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Created by player one, waiting for an opponent.
    Pending = 0,
    /// Player one to move.
    PlayerOneTurn = 1,
    /// Player two to move.
    PlayerTwoTurn = 2,
    /// Player one completed a line.
    PlayerOneWon = 3,
    /// Player two completed a line.
    PlayerTwoWon = 4,
    /// Board full, no line.
    Draw = 5,
    /// Player one took half the vault after a draw.
    PlayerOneClaimed = 6,
    /// Player two took half the vault after a draw.
    PlayerTwoClaimed = 7,
    /// Both halves claimed.
    DrawClaimed = 8,
}

/// What a settlement pays out and whether it ends the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Lamports moved from the vault to the settling player.
    pub payout: u64,
    /// Whether the game account is closed afterwards.
    pub close: bool,
}

/// Game account contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Current state.
    pub state: GameState,
    /// Cells, row by row.
    pub board: Board,
    /// Creator; seeds the game address.
    pub player_one: Pubkey,
    /// Opponent, default until accepted.
    pub player_two: Pubkey,
    /// Unix time of the last accepted move.
    pub last_update: i64,
    /// Bump of the game address.
    pub bump: u8,
    /// Bump of the vault address.
    pub vault_bump: u8,
}

impl Game {
    /// Bincode size without the discriminator. The state tag is a `u32`.
    pub const INIT_SPACE: usize = 4 + 9 + 32 + 32 + 8 + 1 + 1;

    /// Account size, discriminator included.
    pub const SPACE: usize = DISCRIMINATOR_LEN + Self::INIT_SPACE;

    /// A fresh pending game.
    #[must_use]
    pub fn new(player_one: Pubkey, bump: u8, vault_bump: u8) -> Self {
        Self {
            state: GameState::Pending,
            board: [0; 9],
            player_one,
            player_two: Pubkey::default(),
            last_update: 0,
            bump,
            vault_bump,
        }
    }

    /// First eight bytes of `sha256("account:Game")`.
    #[must_use]
    pub fn discriminator() -> [u8; DISCRIMINATOR_LEN] {
        let digest = hash(b"account:Game").to_bytes();
        let mut out = [0u8; DISCRIMINATOR_LEN];
        out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
        out
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Decode account data: the discriminator, then the bincode body.
    ///
    /// # Errors
    ///
    /// `AccountNotInitialized` if the data is empty or zeroed,
    /// `AccountDiscriminatorMismatch` if it belongs to something else.
    pub fn try_from_account_data(data: &[u8]) -> Result<Self, AccountError> {
        if data.len() < Self::SPACE || data[..DISCRIMINATOR_LEN].iter().all(|b| *b == 0) {
            return Err(AccountError::AccountNotInitialized);
        }
        if data[..DISCRIMINATOR_LEN] != Self::discriminator() {
            return Err(AccountError::AccountDiscriminatorMismatch);
        }
        bincode::deserialize(&data[DISCRIMINATOR_LEN..Self::SPACE])
            .map_err(|_| AccountError::AccountDiscriminatorMismatch)
    }

    /// Encode into account data of at least [`Game::SPACE`] bytes.
    ///
    /// # Errors
    ///
    /// `AccountNotInitialized` if `data` is too short to hold a game.
    pub fn write_account_data(&self, data: &mut [u8]) -> Result<(), AccountError> {
        if data.len() < Self::SPACE {
            return Err(AccountError::AccountNotInitialized);
        }
        data[..DISCRIMINATOR_LEN].copy_from_slice(&Self::discriminator());
        let mut body = &mut data[DISCRIMINATOR_LEN..Self::SPACE];
        bincode::serialize_into(&mut body, self).map_err(|_| AccountError::AccountNotInitialized)
    }

    // =========================================================================
    // STATE MACHINE
    // =========================================================================

    /// Player two joins with their opening move.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted`, `CannotPlayAgainstYourself` or `IllegalMove`.
    pub fn accept(&mut self, player_two: Pubkey, board: Board, now: i64) -> Result<(), GameError> {
        if self.state != GameState::Pending {
            return Err(GameError::AlreadyStarted);
        }
        if player_two == self.player_one {
            return Err(GameError::CannotPlayAgainstYourself);
        }
        if !is_legal_opening(&board) {
            return Err(GameError::IllegalMove);
        }

        self.state = GameState::PlayerOneTurn;
        self.board = board;
        self.player_two = player_two;
        self.last_update = now;
        Ok(())
    }

    /// `player` submits the board after their move.
    ///
    /// Returns the terminal state if the move ended the game.
    ///
    /// # Errors
    ///
    /// `GameNotPlayable`, `Timeout`, `NotYourTurn` or `IllegalMove`, checked
    /// in that order.
    pub fn play(
        &mut self,
        player: &Pubkey,
        board: Board,
        now: i64,
    ) -> Result<Option<GameState>, GameError> {
        let (mover, mark, next_turn) = match self.state {
            GameState::PlayerOneTurn => (self.player_one, PLAYER_ONE, GameState::PlayerTwoTurn),
            GameState::PlayerTwoTurn => (self.player_two, PLAYER_TWO, GameState::PlayerOneTurn),
            _ => return Err(GameError::GameNotPlayable),
        };
        if now >= self.last_update.saturating_add(DAY_IN_SECONDS) {
            return Err(GameError::Timeout);
        }
        if *player != mover {
            return Err(GameError::NotYourTurn);
        }
        if !is_legal_move(&self.board, &board, mark) {
            return Err(GameError::IllegalMove);
        }

        self.board = board;
        self.last_update = now;
        let outcome = check_winner(&board);
        self.state = outcome.unwrap_or(next_turn);
        Ok(outcome)
    }

    /// `player` settles the game given the vault's current balance.
    ///
    /// # Errors
    ///
    /// `NotYourSettlment`, `TimeNotPassed` or `GameNotResolvable`.
    pub fn settle(
        &mut self,
        player: &Pubkey,
        now: i64,
        vault_lamports: u64,
    ) -> Result<Settlement, GameError> {
        let is_one = *player == self.player_one;
        let is_two = *player == self.player_two && self.state != GameState::Pending;
        let timed_out = now >= self.last_update.saturating_add(DAY_IN_SECONDS);
        let everything = Settlement {
            payout: vault_lamports,
            close: true,
        };

        match self.state {
            GameState::Pending => {
                require(is_one)?;
                Ok(everything)
            }
            GameState::PlayerOneTurn => {
                require(is_two)?;
                if !timed_out {
                    return Err(GameError::TimeNotPassed);
                }
                self.state = GameState::PlayerTwoWon;
                Ok(everything)
            }
            GameState::PlayerTwoTurn => {
                require(is_one)?;
                if !timed_out {
                    return Err(GameError::TimeNotPassed);
                }
                self.state = GameState::PlayerOneWon;
                Ok(everything)
            }
            GameState::Draw => {
                require(is_one || is_two)?;
                self.state = if is_one {
                    GameState::PlayerOneClaimed
                } else {
                    GameState::PlayerTwoClaimed
                };
                Ok(Settlement {
                    payout: vault_lamports / 2,
                    close: false,
                })
            }
            GameState::PlayerTwoClaimed => {
                require(is_one)?;
                self.state = GameState::DrawClaimed;
                Ok(everything)
            }
            GameState::PlayerOneClaimed => {
                require(is_two)?;
                self.state = GameState::DrawClaimed;
                Ok(everything)
            }
            GameState::PlayerOneWon | GameState::PlayerTwoWon => {
                require(is_one || is_two)?;
                Ok(Settlement {
                    payout: 0,
                    close: true,
                })
            }
            GameState::DrawClaimed => Err(GameError::GameNotResolvable),
        }
    }
}

fn require(allowed: bool) -> Result<(), GameError> {
    if allowed {
        Ok(())
    } else {
        Err(GameError::NotYourSettlment)
    }
}

// =============================================================================
// TESTS
// =============================================================================
