//! Signer recovery for off-chain votes.
//!
//! The strategy only depends on `SignatureVerifier`; `Secp256k1Verifier` is
//! the stock implementation backed by `libsecp256k1`.

use super::typed_data::{keccak256, vote_digest, Domain, VoteMessage};
use crate::types::Address;
use libsecp256k1::{Message, PublicKey, RecoveryId, Signature};
use thiserror::Error;

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature must be {SIGNATURE_LENGTH} bytes, got {0}")]
    Length(usize),

    #[error("invalid recovery id: {0}")]
    RecoveryId(u8),

    #[error("malformed signature: {0}")]
    Malformed(String),

    #[error("signature s value is in the upper half order")]
    HighS,

    #[error("signer recovery failed: {0}")]
    Recovery(String),

    #[error("invalid secret key")]
    InvalidKey,
}

/// Recovers the address that signed `message` under `domain`.
pub trait SignatureVerifier {
    fn recover(
        &self,
        domain: &Domain,
        message: &VoteMessage,
        signature: &[u8],
    ) -> Result<Address, SignatureError>;
}

/// secp256k1 public key recovery.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Verifier;

impl SignatureVerifier for Secp256k1Verifier {
    fn recover(
        &self,
        domain: &Domain,
        message: &VoteMessage,
        signature: &[u8],
    ) -> Result<Address, SignatureError> {
        recover_address(&vote_digest(domain, message), signature)
    }
}

/// Recover the signer of a 32-byte digest from an `r ‖ s ‖ v` signature.
///
/// Accepts `v` as 0/1 or 27/28. Rejects high-s signatures so a signature
/// cannot be replayed in its malleated form.
pub fn recover_address(digest: &[u8; 32], signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::Length(signature.len()));
    }

    let v = signature[64];
    let rec = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => return Err(SignatureError::RecoveryId(other)),
    };
    let recovery_id = RecoveryId::parse(rec).map_err(|_| SignatureError::RecoveryId(v))?;

    let sig = Signature::parse_standard_slice(&signature[..64])
        .map_err(|e| SignatureError::Malformed(format!("{:?}", e)))?;
    if sig.s.is_high() {
        return Err(SignatureError::HighS);
    }

    let public_key = libsecp256k1::recover(&Message::parse(digest), &sig, &recovery_id)
        .map_err(|e| SignatureError::Recovery(format!("{:?}", e)))?;

    Ok(public_key_to_address(&public_key))
}

/// Last 20 bytes of the Keccak-256 of the uncompressed key without its tag.
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize();
    let hash = keccak256(&uncompressed[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Address::new(bytes)
}
