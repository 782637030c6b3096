//! # Error Types
//!
//! Game rule violations and account validation failures. Both surface to
//! clients as `InstructionError::Custom(code)`.

use dng_runtime::InstructionError;
use thiserror::Error;

/// First custom code of [`GameError`].
pub const GAME_ERROR_OFFSET: u32 = 6000;

/// Game rule violations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum GameError {
    /// Accepting a game that is no longer pending.
    #[error("The game has already started")]
    AlreadyStarted = 0,

    /// Player two is player one.
    #[error("You cannot play against yourself")]
    CannotPlayAgainstYourself = 1,

    /// Board change is not exactly one new mark of the mover.
    #[error("This move is Illegal")]
    IllegalMove = 2,

    /// Game is pending or finished.
    #[error("Game has already finished or not started yet")]
    GameNotPlayable = 3,

    /// Signer is not the player whose turn it is.
    #[error("It's not your turn")]
    NotYourTurn = 4,

    /// More than a day passed since the last move.
    #[error("Timeout")]
    Timeout = 5,

    /// Nothing to settle in the current state.
    #[error("Game is not resolvable yet")]
    GameNotResolvable = 6,

    /// Signer may not settle in the current state.
    #[error("It's not your settlement")]
    NotYourSettlment = 7,

    /// Opponent still has time to move.
    #[error("Time has not passed yet")]
    TimeNotPassed = 8,
}

impl GameError {
    /// Custom error code seen by clients.
    #[must_use]
    pub const fn code(self) -> u32 {
        GAME_ERROR_OFFSET + self as u32
    }

    /// Look up a game error from its custom code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        const ALL: [GameError; 9] = [
            GameError::AlreadyStarted,
            GameError::CannotPlayAgainstYourself,
            GameError::IllegalMove,
            GameError::GameNotPlayable,
            GameError::NotYourTurn,
            GameError::Timeout,
            GameError::GameNotResolvable,
            GameError::NotYourSettlment,
            GameError::TimeNotPassed,
        ];
        ALL.into_iter().find(|e| e.code() == code)
    }
}

impl From<GameError> for InstructionError {
    fn from(err: GameError) -> Self {
        InstructionError::Custom(err.code())
    }
}

/// Account validation failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AccountError {
    /// Address does not match its seeds.
    #[error("A seeds constraint was violated")]
    InvalidSeeds = 3000,

    /// Account data does not start with the expected discriminator.
    #[error("Account discriminator did not match what was expected")]
    AccountDiscriminatorMismatch = 3002,

    /// Account must be writable.
    #[error("The given account is not mutable")]
    AccountNotMutable = 3006,

    /// Account is owned by another program.
    #[error("The given account is owned by a different program than expected")]
    AccountOwnedByWrongProgram = 3007,

    /// Program account is not the expected program.
    #[error("Program ID was not as expected")]
    InvalidProgramId = 3008,

    /// Account must sign.
    #[error("The given account did not sign")]
    MissingSigner = 3010,

    /// Account holds no data yet.
    #[error("The program expected this account to be already initialized")]
    AccountNotInitialized = 3012,
}

impl From<AccountError> for InstructionError {
    fn from(err: AccountError) -> Self {
        InstructionError::Custom(err as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_codes() {
        assert_eq!(GameError::AlreadyStarted.code(), 6000);
        assert_eq!(GameError::TimeNotPassed.code(), 6008);
        assert_eq!(GameError::from_code(6005), Some(GameError::Timeout));
        assert_eq!(GameError::from_code(3000), None);
    }

    #[test]
    fn test_conversion_to_instruction_error() {
        let err: InstructionError = GameError::IllegalMove.into();
        assert_eq!(err, InstructionError::Custom(6002));

        let err: InstructionError = AccountError::MissingSigner.into();
        assert_eq!(err, InstructionError::Custom(3010));
    }
}
