use alloy_primitives::TxKind;
use alloy_rlp::RlpEncodable;
use serde::{Deserialize, Serialize};

use crate::types::{Address, BlockNumber, Bytes, Gas, Nonce, Wei, B256};

/// A transaction submitted for an unlocked account, before defaults are filled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: Address,
    /// `None` deploys a contract.
    pub to: Option<Address>,
    pub value: Option<Wei>,
    pub gas: Option<Gas>,
    pub gas_price: Option<u128>,
    pub input: Option<Bytes>,
    pub nonce: Option<Nonce>,
}

/// A fully specified transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: B256,
    pub nonce: Nonce,
    pub from: Address,
    pub to: Option<Address>,
    pub value: Wei,
    pub gas: Gas,
    pub gas_price: u128,
    pub input: Bytes,
    pub chain_id: u64,
}

/// Canonical body committed to by the transaction hash.
#[derive(RlpEncodable)]
struct TransactionBody {
    nonce: Nonce,
    gas_price: u128,
    gas: Gas,
    to: TxKind,
    value: Wei,
    input: Bytes,
    from: Address,
    chain_id: u64,
}

impl Transaction {
    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }

    pub fn kind(&self) -> TxKind {
        match self.to {
            Some(to) => TxKind::Call(to),
            None => TxKind::Create,
        }
    }

    /// RLP bytes of everything except the hash. Hashing these yields `hash`.
    pub fn body_bytes(&self) -> Vec<u8> {
        alloy_rlp::encode(TransactionBody {
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas: self.gas,
            to: self.kind(),
            value: self.value,
            input: self.input.clone(),
            from: self.from,
            chain_id: self.chain_id,
        })
    }

    /// Address a contract-creating transaction deploys to.
    pub fn created_address(&self) -> Option<Address> {
        self.is_contract_creation().then(|| self.from.create(self.nonce))
    }
}

/// Where a mined transaction landed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinedTransaction {
    pub transaction: Transaction,
    pub block_hash: B256,
    pub block_number: BlockNumber,
    pub index: u64,
}

// ── Receipts ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    Success,
    /// Mined, but execution failed; the whole gas limit was consumed.
    Failed,
}

impl TxStatus {
    pub fn is_success(self) -> bool {
        matches!(self, TxStatus::Success)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: B256,
    pub transaction_index: u64,
    pub block_hash: B256,
    pub block_number: BlockNumber,
    pub from: Address,
    pub to: Option<Address>,
    pub gas_used: Gas,
    pub cumulative_gas_used: Gas,
    pub contract_address: Option<Address>,
    pub status: TxStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample(to: Option<Address>) -> Transaction {
        Transaction {
            hash: B256::ZERO,
            nonce: 0,
            from: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            to,
            value: Wei::from(1u64),
            gas: 21_000,
            gas_price: 1,
            input: Bytes::new(),
            chain_id: 1337,
        }
    }

    #[test]
    fn body_differs_by_recipient() {
        let a = sample(Some(Address::ZERO));
        let b = sample(None);
        assert_ne!(a.body_bytes(), b.body_bytes());
    }

    #[test]
    fn created_address_only_for_creation() {
        assert_eq!(sample(Some(Address::ZERO)).created_address(), None);
        // Nonce 0 deployment from the first dev account.
        assert_eq!(
            sample(None).created_address(),
            Some(address!("5FbDB2315678afecb367f032d93F642f64180aa3"))
        );
    }
}
