//! Off-chain signature votes.
//!
//! - Typed data hashing bound to {name, version, chain id, strategy address}
//! - Pluggable signer recovery (`SignatureVerifier`)
//! - Local signer for clients producing votes

pub mod signer;
pub mod typed_data;
pub mod verifier;

pub use signer::LocalSigner;
pub use typed_data::{Domain, VoteMessage};
pub use verifier::{Secp256k1Verifier, SignatureError, SignatureVerifier};
