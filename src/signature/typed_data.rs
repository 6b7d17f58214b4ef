//! Domain-separated typed data hashing (EIP-712 layout, Keccak-256).
//!
//! Every word is 32 bytes big-endian; strings and byte strings are hashed
//! before being encoded.

use crate::types::{Address, Operation, ProposalId, VoteChoice};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

pub const VOTE_TYPE: &str = "Vote(uint256 proposalId,uint8 vote)";

/// Router domain: no name or version, only chain and contract.
pub const ROUTER_DOMAIN_TYPE: &str = "EIP712Domain(uint256 chainId,address verifyingContract)";

pub const TRANSACTION_TYPE: &str =
    "Transaction(address to,uint256 value,bytes data,uint8 operation,uint256 nonce)";

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn u8_word(value: u8) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[31] = value;
    word
}

fn hash_words(words: &[[u8; 32]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for word in words {
        hasher.update(word);
    }
    hasher.finalize().into()
}

/// Signing domain of a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        chain_id: u64,
        verifying_contract: Address,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    pub fn separator(&self) -> [u8; 32] {
        hash_words(&[
            keccak256(DOMAIN_TYPE.as_bytes()),
            keccak256(self.name.as_bytes()),
            keccak256(self.version.as_bytes()),
            u64_word(self.chain_id),
            self.verifying_contract.to_word(),
        ])
    }
}

/// Signed vote payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMessage {
    pub proposal_id: ProposalId,
    pub choice: VoteChoice,
}

impl VoteMessage {
    pub fn new(proposal_id: ProposalId, choice: VoteChoice) -> Self {
        Self {
            proposal_id,
            choice,
        }
    }

    pub fn struct_hash(&self) -> [u8; 32] {
        hash_words(&[
            keccak256(VOTE_TYPE.as_bytes()),
            u64_word(self.proposal_id),
            u8_word(self.choice.as_u8()),
        ])
    }
}

/// `keccak256(0x19 ‖ 0x01 ‖ domain_separator ‖ struct_hash)`
pub fn typed_data_digest(domain_separator: &[u8; 32], struct_hash: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update([0x19, 0x01]);
    hasher.update(domain_separator);
    hasher.update(struct_hash);
    hasher.finalize().into()
}

/// Digest a member signs to vote off-chain.
pub fn vote_digest(domain: &Domain, message: &VoteMessage) -> [u8; 32] {
    typed_data_digest(&domain.separator(), &message.struct_hash())
}

/// Hash identifying one transaction of a proposal on a router.
pub fn transaction_hash(
    chain_id: u64,
    router: Address,
    to: Address,
    value: u128,
    data: &[u8],
    operation: Operation,
    nonce: u64,
) -> [u8; 32] {
    let domain_separator = hash_words(&[
        keccak256(ROUTER_DOMAIN_TYPE.as_bytes()),
        u64_word(chain_id),
        router.to_word(),
    ]);
    let struct_hash = hash_words(&[
        keccak256(TRANSACTION_TYPE.as_bytes()),
        to.to_word(),
        u128_word(value),
        keccak256(data),
        u8_word(operation.as_u8()),
        u64_word(nonce),
    ]);
    typed_data_digest(&domain_separator, &struct_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_domain_type_hash() {
        assert_eq!(
            hex::encode(keccak256(DOMAIN_TYPE.as_bytes())),
            "8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
        );
    }

    #[test]
    fn test_word_encoding() {
        let word = u64_word(0x0102);
        assert_eq!(&word[..30], &[0u8; 30]);
        assert_eq!(&word[30..], &[0x01, 0x02]);
        assert_eq!(u8_word(1)[31], 1);
        assert_eq!(u128_word(u128::MAX)[..16], [0u8; 16]);
    }

    #[test]
    fn test_separator_binds_every_domain_field() {
        let base = Domain::new("Test", "1", 31337, Address::new([1; 20]));
        let variants = [
            Domain::new("Other", "1", 31337, Address::new([1; 20])),
            Domain::new("Test", "2", 31337, Address::new([1; 20])),
            Domain::new("Test", "1", 1, Address::new([1; 20])),
            Domain::new("Test", "1", 31337, Address::new([2; 20])),
        ];
        for variant in &variants {
            assert_ne!(base.separator(), variant.separator());
        }
    }

    #[test]
    fn test_vote_digest_binds_message() {
        let domain = Domain::new("Test", "1", 31337, Address::new([1; 20]));
        let yes = vote_digest(&domain, &VoteMessage::new(0, VoteChoice::For));
        let no = vote_digest(&domain, &VoteMessage::new(0, VoteChoice::Against));
        let other = vote_digest(&domain, &VoteMessage::new(1, VoteChoice::For));
        assert_ne!(yes, no);
        assert_ne!(yes, other);
    }

    #[test]
    fn test_transaction_hash_binds_nonce_and_data() {
        let router = Address::new([9; 20]);
        let to = Address::new([3; 20]);
        let h0 = transaction_hash(1, router, to, 0, b"call", Operation::Call, 0);
        let h1 = transaction_hash(1, router, to, 0, b"call", Operation::Call, 1);
        let h2 = transaction_hash(1, router, to, 0, b"other", Operation::Call, 0);
        let h3 = transaction_hash(1, router, to, 0, b"call", Operation::DelegateCall, 0);
        assert_ne!(h0, h1);
        assert_ne!(h0, h2);
        assert_ne!(h0, h3);
        assert_eq!(
            h0,
            transaction_hash(1, router, to, 0, b"call", Operation::Call, 0)
        );
    }
}
