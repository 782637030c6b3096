//! # Program-Derived Addresses
//!
//! Addresses owned by a program and derived from seeds. A derived address is
//! rejected if it happens to be a valid Ed25519 point, so no private key can
//! ever sign for it; only the deriving program can, through the runtime.

use crate::hashing::hashv;
use crate::CryptoError;
use ed25519_dalek::VerifyingKey;
use shared_types::Pubkey;

/// Maximum number of seeds, bump included.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Derive an address from `seeds` (bump already included) and `program_id`.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<Pubkey, CryptoError> {
    if seeds.len() > MAX_SEEDS || seeds.iter().any(|s| s.len() > MAX_SEED_LEN) {
        return Err(CryptoError::InvalidSeeds);
    }

    let mut parts: Vec<&[u8]> = Vec::with_capacity(seeds.len() + 2);
    parts.extend_from_slice(seeds);
    parts.push(program_id.as_ref());
    parts.push(PDA_MARKER);
    let bytes = hashv(&parts).to_bytes();

    if is_on_curve(&bytes) {
        return Err(CryptoError::InvalidSeeds);
    }
    Ok(Pubkey::new_from_array(bytes))
}

/// Find the canonical (highest) bump for `seeds` and return address and bump.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), CryptoError> {
    if seeds.len() >= MAX_SEEDS || seeds.iter().any(|s| s.len() > MAX_SEED_LEN) {
        return Err(CryptoError::InvalidSeeds);
    }
    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);
        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(CryptoError::InvalidSeeds) => continue,
            Err(e) => return Err(e),
        }
    }
    Err(CryptoError::NoViableBump)
}

fn is_on_curve(bytes: &[u8; 32]) -> bool {
    VerifyingKey::from_bytes(bytes).is_ok()
}
