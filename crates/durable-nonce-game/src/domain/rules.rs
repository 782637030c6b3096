//! # Board Rules
//!
//! Cells hold `EMPTY`, `PLAYER_ONE` or `PLAYER_TWO`, indexed row by row.

use crate::domain::game::GameState;

/// Unclaimed cell.
pub const EMPTY: u8 = 0;

/// Player one's mark.
pub const PLAYER_ONE: u8 = 1;

/// Player two's mark.
pub const PLAYER_TWO: u8 = 2;

/// A 3x3 board.
pub type Board = [u8; 9];

const WINNING_LINES: [[usize; 3]; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Terminal state reached by `board`, if any.
///
/// A completed line wins even on a full board.
#[must_use]
pub fn check_winner(board: &Board) -> Option<GameState> {
    for [a, b, c] in WINNING_LINES {
        if board[a] != EMPTY && board[a] == board[b] && board[a] == board[c] {
            return Some(if board[a] == PLAYER_ONE {
                GameState::PlayerOneWon
            } else {
                GameState::PlayerTwoWon
            });
        }
    }

    if board.iter().all(|&cell| cell != EMPTY) {
        Some(GameState::Draw)
    } else {
        None
    }
}

/// `next` differs from `current` in exactly one cell, which was empty and now
/// holds `mark`.
#[must_use]
pub fn is_legal_move(current: &Board, next: &Board, mark: u8) -> bool {
    let mut changed = current.iter().zip(next).filter(|(before, after)| before != after);
    match (changed.next(), changed.next()) {
        (Some((&before, &after)), None) => before == EMPTY && after == mark,
        _ => false,
    }
}

/// A valid opening for player two: one `PLAYER_TWO` mark on an otherwise
/// empty board.
#[must_use]
pub fn is_legal_opening(board: &Board) -> bool {
    is_legal_move(&[EMPTY; 9], board, PLAYER_TWO)
}
