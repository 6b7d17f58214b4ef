//! Mock avatar for testing.
//!
//! Models a multisig treasury whose only callable surface is its owner list.

use super::traits::Avatar;
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use crate::types::{Address, Operation};
use serde::{Deserialize, Serialize};

/// Transaction data understood by [`MockSafe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeCall {
    AddOwner { owner: Address },
    RemoveOwner { owner: Address },
}

impl SafeCall {
    pub fn encode(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(data)
    }
}

/// A transaction the avatar accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedTransaction {
    pub to: Address,
    pub value: u128,
    pub data: Vec<u8>,
    pub operation: Operation,
}

/// Mock avatar. New owners are prepended, so the most recent owner is first.
#[derive(Debug, Clone)]
pub struct MockSafe {
    address: Address,
    owners: Vec<Address>,
    executed: Vec<ExecutedTransaction>,
}

impl MockSafe {
    pub fn new(address: Address, owners: Vec<Address>) -> Self {
        Self {
            address,
            owners,
            executed: Vec::new(),
        }
    }

    pub fn owners(&self) -> &[Address] {
        &self.owners
    }

    pub fn executed(&self) -> &[ExecutedTransaction] {
        &self.executed
    }

    fn apply(&mut self, call: SafeCall) -> Result<(), String> {
        match call {
            SafeCall::AddOwner { owner } => {
                if owner.is_zero() || self.owners.contains(&owner) {
                    return Err(format!("invalid owner {}", owner));
                }
                self.owners.insert(0, owner);
            }
            SafeCall::RemoveOwner { owner } => {
                let position = self
                    .owners
                    .iter()
                    .position(|o| *o == owner)
                    .ok_or_else(|| format!("{} is not an owner", owner))?;
                if self.owners.len() == 1 {
                    return Err("cannot remove the last owner".to_string());
                }
                self.owners.remove(position);
            }
        }
        Ok(())
    }
}

impl Avatar for MockSafe {
    fn address(&self) -> Address {
        self.address
    }

    fn exec_transaction_from_module(
        &mut self,
        to: Address,
        value: u128,
        data: &[u8],
        operation: Operation,
    ) -> Result<(), String> {
        // Calls addressed to the safe itself manage owners; anything else is
        // accepted as an opaque transfer.
        if to == self.address {
            let call = SafeCall::decode(data).map_err(|e| e.to_string())?;
            self.apply(call)?;
        }
        self.executed.push(ExecutedTransaction {
            to,
            value,
            data: data.to_vec(),
            operation,
        });
        Ok(())
    }
}
