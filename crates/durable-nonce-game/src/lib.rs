//! # Durable Nonce Game - Tic-Tac-Toe on the Ledger
//!
//! **Program ID:** `5527e46d0807cae79bbda24cc229cce697a04d6a7b119d36798c01b74c8ebd5e`
//!
//! ## Purpose
//!
//! Two players each stake [`BET_LAMPORTS`] into a vault PDA and play
//! tic-tac-toe by submitting the full board after each move. Moves may be
//! signed ahead of time against durable nonces, so a player can hand over a
//! transaction without the usual blockhash expiry.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One game per player one | `pda.rs` - `["game", player_one]` seeds |
//! | A move adds exactly one mark of the mover | `domain/rules.rs` - `is_legal_move()` |
//! | Only the player to move may play | `domain/game.rs` - `Game::play()` |
//! | A move must come within a day | `domain/game.rs` - `Game::play()` |
//! | Stakes only leave the vault through settlement or a win | `processor.rs` - `pay_from_vault()` |
//!
//! ## Instructions
//!
//! | Instruction | Effect |
//! |-------------|--------|
//! | `Initialize` | Logs a greeting |
//! | `CreateGame` | Opens a game, stakes player one's bet |
//! | `AcceptGame` | Player two joins with the opening move and stakes |
//! | `PlayGame` | Submits a move; a line pays the vault to the mover |
//! | `SettleGame` | Refunds, claims a timeout, splits a draw or closes a won game |

#![warn(missing_docs)]
#![warn(clippy::all)]

use shared_types::Pubkey;

pub mod domain;
pub mod errors;
pub mod instruction;
pub mod pda;
pub mod processor;

pub use domain::{
    check_winner, Board, Game, GameState, Settlement, BET_LAMPORTS, DAY_IN_SECONDS,
};
pub use errors::{AccountError, GameError};
pub use instruction::GameInstruction;
pub use processor::DurableNonceGame;

/// Program id.
pub const ID: Pubkey = Pubkey::new_from_array([
    85, 39, 228, 109, 8, 7, 202, 231, 155, 189, 162, 76, 194, 41, 204, 230, 151, 160, 77, 106,
    123, 17, 157, 54, 121, 140, 1, 183, 76, 142, 189, 94,
]);

/// Name the program is registered under in a workspace.
pub const PROGRAM_NAME: &str = "DurableNonceGame";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The program id.
#[must_use]
pub fn id() -> Pubkey {
    ID
}
