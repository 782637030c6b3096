//! Wallet files: a JSON array of 64 bytes (secret seed, then public key).

use crate::signatures::Keypair;
use crate::CryptoError;
use std::fs;
use std::path::Path;

/// Load a keypair from `path`.
pub fn read_keypair_file(path: impl AsRef<Path>) -> Result<Keypair, CryptoError> {
    let contents = fs::read_to_string(path)?;
    let bytes: Vec<u8> = serde_json::from_str(&contents)?;
    Keypair::from_bytes(&bytes)
}

/// Write `keypair` to `path`, creating parent directories as needed.
pub fn write_keypair_file(keypair: &Keypair, path: impl AsRef<Path>) -> Result<(), CryptoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(&keypair.to_bytes().to_vec())?;
    fs::write(path, json)?;
    Ok(())
}
