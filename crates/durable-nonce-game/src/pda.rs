//! Game and vault addresses.

use shared_crypto::{create_program_address, find_program_address, CryptoError};
use shared_types::Pubkey;

use crate::ID;

/// Seed prefix of the game account.
pub const GAME_SEED: &[u8] = b"game";

/// Seed prefix of the vault account.
pub const VAULT_SEED: &[u8] = b"vault";

/// Game address and bump for `player_one`.
pub fn find_game_address(player_one: &Pubkey) -> Result<(Pubkey, u8), CryptoError> {
    find_program_address(&[GAME_SEED, player_one.as_ref()], &ID)
}

/// Vault address and bump for `game`.
pub fn find_vault_address(game: &Pubkey) -> Result<(Pubkey, u8), CryptoError> {
    find_program_address(&[VAULT_SEED, game.as_ref()], &ID)
}

/// Game address from a known bump.
pub fn game_address(player_one: &Pubkey, bump: u8) -> Result<Pubkey, CryptoError> {
    create_program_address(&[GAME_SEED, player_one.as_ref(), &[bump]], &ID)
}

/// Vault address from a known bump.
pub fn vault_address(game: &Pubkey, bump: u8) -> Result<Pubkey, CryptoError> {
    create_program_address(&[VAULT_SEED, game.as_ref(), &[bump]], &ID)
}
