//! Local vote signer for off-chain clients.

use super::typed_data::{vote_digest, Domain, VoteMessage};
use super::verifier::{public_key_to_address, SignatureError, SIGNATURE_LENGTH};
use crate::types::Address;
use libsecp256k1::{Message, PublicKey, SecretKey};
use rand::RngCore;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// secp256k1 key pair that signs typed-data votes (zeroized on drop).
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct LocalSigner {
    secret: [u8; 32],
    #[zeroize(skip)]
    address: Address,
}

impl LocalSigner {
    /// Create from a 32-byte secret. Fails if the scalar is zero or not below
    /// the curve order.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<Self, SignatureError> {
        let key = SecretKey::parse(secret).map_err(|_| SignatureError::InvalidKey)?;
        let address = public_key_to_address(&PublicKey::from_secret_key(&key));
        Ok(Self {
            secret: *secret,
            address,
        })
    }

    /// Fresh key from the thread-local RNG.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; 32];
            rng.fill_bytes(&mut bytes);
            let signer = Self::from_bytes(&bytes);
            bytes.zeroize();
            if let Ok(signer) = signer {
                return signer;
            }
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a raw digest. Output is `r ‖ s ‖ v` with `v` in {27, 28}.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<[u8; SIGNATURE_LENGTH], SignatureError> {
        let key = SecretKey::parse(&self.secret).map_err(|_| SignatureError::InvalidKey)?;
        let (signature, recovery_id) = libsecp256k1::sign(&Message::parse(digest), &key);

        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..64].copy_from_slice(&signature.serialize());
        out[64] = recovery_id.serialize() + 27;
        Ok(out)
    }

    /// Sign a vote under a strategy's domain.
    pub fn sign_vote(
        &self,
        domain: &Domain,
        message: &VoteMessage,
    ) -> Result<[u8; SIGNATURE_LENGTH], SignatureError> {
        self.sign_digest(&vote_digest(domain, message))
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
