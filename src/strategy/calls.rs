//! Calls a proposal can carry into the strategy.
//!
//! Transaction data targeting the strategy is a CBOR-encoded `StrategyCall`;
//! executing it through the router is how members govern their own
//! membership.

use crate::serialization::{from_cbor, to_cbor, SerializationError};
use crate::types::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyCall {
    AddMember { member: Address },
    RemoveMember { member: Address },
    TransferAdmin { new_admin: Address },
}

impl StrategyCall {
    pub fn encode(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(data)
    }
}
