//! # Transaction Signing
//!
//! Fills a transaction's signature slots from a set of signers and checks
//! them on the way back in.

use crate::signatures::{verify_signature, Signer};
use crate::CryptoError;
use shared_types::{Hash, Transaction};

/// Set `recent_blockhash` and sign with every signer.
///
/// Each signer's signature lands at the index of its key among the message's
/// required signers. Supplying a signer the message does not require, or
/// leaving a required signer out, is an error.
pub fn sign_transaction(
    tx: &mut Transaction,
    signers: &[&dyn Signer],
    recent_blockhash: Hash,
) -> Result<(), CryptoError> {
    tx.message.recent_blockhash = recent_blockhash;
    let required = tx.message.signer_keys().to_vec();
    tx.signatures = vec![Default::default(); required.len()];

    let data = tx.message_data()?;
    for signer in signers {
        let key = signer.pubkey();
        let index = required
            .iter()
            .position(|k| *k == key)
            .ok_or(CryptoError::KeypairPubkeyMismatch(key))?;
        tx.signatures[index] = signer.sign_message(&data);
    }

    if let Some(missing) = required
        .iter()
        .zip(&tx.signatures)
        .find_map(|(key, sig)| sig.is_placeholder().then_some(*key))
    {
        return Err(CryptoError::NotEnoughSigners(missing));
    }
    Ok(())
}

/// Verify every signature against its signer key.
pub fn verify_transaction(tx: &Transaction) -> Result<(), CryptoError> {
    let data = tx.message_data()?;
    let keys = tx.message.signer_keys();
    if keys.len() != tx.signatures.len() {
        return Err(CryptoError::SignatureVerificationFailed);
    }
    for (key, signature) in keys.iter().zip(&tx.signatures) {
        verify_signature(key, &data, signature)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signatures::Keypair;
    use shared_types::{AccountMeta, Instruction, Pubkey};

    fn two_signer_tx(payer: &Keypair, other: &Keypair) -> Transaction {
        let ix = Instruction::new_with_bytes(
            Pubkey::new_unique(),
            &[1],
            vec![AccountMeta::new(other.pubkey(), true)],
        );
        Transaction::new_with_payer(&[ix], Some(&payer.pubkey()))
    }

    #[test]
    fn test_sign_and_verify() {
        let payer = Keypair::new();
        let other = Keypair::new();
        let mut tx = two_signer_tx(&payer, &other);

        // Signer order does not matter.
        sign_transaction(&mut tx, &[&other, &payer], Hash::new_from_array([3u8; 32])).unwrap();

        assert!(tx.is_signed());
        assert_eq!(tx.recent_blockhash(), Hash::new_from_array([3u8; 32]));
        assert!(verify_transaction(&tx).is_ok());
    }

    #[test]
    fn test_signatures_cover_bincode_message() {
        let payer = Keypair::new();
        let other = Keypair::new();
        let mut tx = two_signer_tx(&payer, &other);
        sign_transaction(&mut tx, &[&payer, &other], Hash::default()).unwrap();

        let bytes = bincode::serialize(&tx.message).unwrap();
        assert_eq!(tx.message_data().unwrap(), bytes);
        assert!(verify_signature(&payer.pubkey(), &bytes, &tx.signatures[0]).is_ok());
        assert!(verify_signature(&other.pubkey(), &bytes, &tx.signatures[1]).is_ok());
    }

    #[test]
    fn test_missing_signer() {
        let payer = Keypair::new();
        let other = Keypair::new();
        let mut tx = two_signer_tx(&payer, &other);

        let err = sign_transaction(&mut tx, &[&payer], Hash::default()).unwrap_err();
        assert!(matches!(err, CryptoError::NotEnoughSigners(k) if k == other.pubkey()));
    }

    #[test]
    fn test_unexpected_signer() {
        let payer = Keypair::new();
        let other = Keypair::new();
        let stranger = Keypair::new();
        let mut tx = two_signer_tx(&payer, &other);

        let err = sign_transaction(&mut tx, &[&payer, &other, &stranger], Hash::default())
            .unwrap_err();
        assert!(matches!(err, CryptoError::KeypairPubkeyMismatch(_)));
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let payer = Keypair::new();
        let other = Keypair::new();
        let mut tx = two_signer_tx(&payer, &other);
        sign_transaction(&mut tx, &[&payer, &other], Hash::default()).unwrap();

        tx.message.instructions[0].data = vec![2];
        assert!(verify_transaction(&tx).is_err());
    }
}
