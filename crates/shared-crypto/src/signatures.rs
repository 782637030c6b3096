//! # Ed25519 Signatures
//!
//! Twisted Edwards curve signatures with deterministic nonces.
//!
//! ## Security Properties
//!
//! - No RNG dependency (deterministic nonce from message)
//! - Complete addition formulas (no conditional branches)
//! - Immune to side-channel timing attacks

use crate::CryptoError;
use ed25519_dalek::{Signer as _, SigningKey, Verifier, VerifyingKey};
use shared_types::{Pubkey, Signature};
use zeroize::Zeroize;

/// Anything that can sign a message on behalf of a pubkey.
pub trait Signer {
    /// The address this signer signs for.
    fn pubkey(&self) -> Pubkey;

    /// Sign a message.
    fn sign_message(&self, message: &[u8]) -> Signature;
}

/// Ed25519 keypair.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate random keypair.
    pub fn new() -> Self {
        let signing_key = SigningKey::generate(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        Self { signing_key }
    }

    /// Create from 64 bytes: secret seed followed by the public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidKeypair)?;
        let signing_key =
            SigningKey::from_keypair_bytes(&bytes).map_err(|_| CryptoError::InvalidKeypair)?;
        Ok(Self { signing_key })
    }

    /// Secret seed followed by the public key.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }

    /// Get secret seed (for serialization).
    pub fn to_seed(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Clone by value. Keys are deliberately not `Clone`.
    pub fn insecure_clone(&self) -> Self {
        Self::from_seed(self.to_seed())
    }
}

impl Default for Keypair {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

impl Signer for Keypair {
    fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.signing_key.verifying_key().to_bytes())
    }

    /// Deterministic: no RNG needed.
    fn sign_message(&self, message: &[u8]) -> Signature {
        Signature::from_bytes(self.signing_key.sign(message).to_bytes())
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        // Zeroize secret key material
        let mut bytes = self.signing_key.to_bytes();
        bytes.zeroize();
    }
}

/// Verify `signature` over `message` by `pubkey`.
pub fn verify_signature(
    pubkey: &Pubkey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(pubkey.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;

    let sig = ed25519_dalek::Signature::from_bytes(signature.as_bytes());

    verifying_key
        .verify(message, &sig)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Keypair::new();
        let message = b"Hello, Ed25519!";

        let signature = keypair.sign_message(message);
        let result = verify_signature(&keypair.pubkey(), message, &signature);

        assert!(result.is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let keypair = Keypair::new();

        let signature = keypair.sign_message(b"message1");
        let result = verify_signature(&keypair.pubkey(), b"message2", &signature);

        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_key_fails() {
        let keypair1 = Keypair::new();
        let keypair2 = Keypair::new();
        let message = b"test";

        let signature = keypair1.sign_message(message);
        let result = verify_signature(&keypair2.pubkey(), message, &signature);

        assert!(result.is_err());
    }

    #[test]
    fn test_deterministic_signatures() {
        let keypair = Keypair::from_seed([0xABu8; 32]);
        let message = b"deterministic test";

        let sig1 = keypair.sign_message(message);
        let sig2 = keypair.sign_message(message);

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_roundtrip_bytes() {
        let original = Keypair::new();
        let restored = Keypair::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(original.pubkey(), restored.pubkey());
    }

    #[test]
    fn test_from_bytes_rejects_mismatched_pubkey() {
        let mut bytes = Keypair::new().to_bytes();
        bytes[32..].copy_from_slice(&Keypair::new().to_bytes()[32..]);
        assert!(matches!(
            Keypair::from_bytes(&bytes),
            Err(CryptoError::InvalidKeypair)
        ));
        assert!(Keypair::from_bytes(&[0u8; 10]).is_err());
    }
}
