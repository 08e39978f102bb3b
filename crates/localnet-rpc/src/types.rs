use alloy_primitives::{Address, Bytes, B256, U256, U64};
use localnet_core::block::Block;
use localnet_core::transaction::{MinedTransaction, Receipt, TransactionRequest};
use serde::{Deserialize, Serialize};

/// Block object returned by `eth_getBlockBy*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    pub number: U64,
    pub hash: B256,
    pub parent_hash: B256,
    pub timestamp: U64,
    pub gas_limit: U64,
    pub gas_used: U64,
    pub miner: Address,
    pub transactions: BlockTransactions,
}

/// Transaction list of a block: hashes, or full objects when requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTransactions {
    Hashes(Vec<B256>),
    Full(Vec<RpcTransaction>),
}

impl BlockTransactions {
    pub fn len(&self) -> usize {
        match self {
            BlockTransactions::Hashes(h) => h.len(),
            BlockTransactions::Full(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transaction hashes in block order, whichever form was returned.
    pub fn hashes(&self) -> Vec<B256> {
        match self {
            BlockTransactions::Hashes(h) => h.clone(),
            BlockTransactions::Full(t) => t.iter().map(|tx| tx.hash).collect(),
        }
    }
}

impl RpcBlock {
    pub fn from_block(block: Block, transactions: BlockTransactions) -> Self {
        Self {
            number: U64::from(block.number),
            hash: block.hash,
            parent_hash: block.parent_hash,
            timestamp: U64::from(block.timestamp),
            gas_limit: U64::from(block.gas_limit),
            gas_used: U64::from(block.gas_used),
            miner: block.miner,
            transactions,
        }
    }
}

/// Transaction object returned by `eth_getTransactionByHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    pub hash: B256,
    pub nonce: U64,
    pub block_hash: Option<B256>,
    pub block_number: Option<U64>,
    pub transaction_index: Option<U64>,
    pub from: Address,
    /// `null` for contract creation.
    pub to: Option<Address>,
    pub value: U256,
    pub gas: U64,
    pub gas_price: U256,
    pub input: Bytes,
    pub chain_id: U64,
}

impl From<MinedTransaction> for RpcTransaction {
    fn from(m: MinedTransaction) -> Self {
        let tx = m.transaction;
        Self {
            hash: tx.hash,
            nonce: U64::from(tx.nonce),
            block_hash: Some(m.block_hash),
            block_number: Some(U64::from(m.block_number)),
            transaction_index: Some(U64::from(m.index)),
            from: tx.from,
            to: tx.to,
            value: tx.value,
            gas: U64::from(tx.gas),
            gas_price: U256::from(tx.gas_price),
            input: tx.input,
            chain_id: U64::from(tx.chain_id),
        }
    }
}

/// Receipt object returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: B256,
    pub transaction_index: U64,
    pub block_hash: B256,
    pub block_number: U64,
    pub from: Address,
    pub to: Option<Address>,
    pub gas_used: U64,
    pub cumulative_gas_used: U64,
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    /// `0x1` success, `0x0` failure.
    pub status: U64,
}

impl RpcReceipt {
    pub fn is_success(&self) -> bool {
        self.status == U64::from(1)
    }
}

impl From<Receipt> for RpcReceipt {
    fn from(r: Receipt) -> Self {
        Self {
            transaction_hash: r.transaction_hash,
            transaction_index: U64::from(r.transaction_index),
            block_hash: r.block_hash,
            block_number: U64::from(r.block_number),
            from: r.from,
            to: r.to,
            gas_used: U64::from(r.gas_used),
            cumulative_gas_used: U64::from(r.cumulative_gas_used),
            contract_address: r.contract_address,
            logs: Vec::new(),
            status: U64::from(u8::from(r.status.is_success())),
        }
    }
}

/// Parameter object of `eth_sendTransaction` / `eth_estimateGas`.
///
/// Accepts `data` as an alias of `input`, as most clients still send it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionRequest {
    pub from: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<U256>,
    #[serde(default, alias = "data", skip_serializing_if = "Option::is_none")]
    pub input: Option<Bytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<U64>,
}

impl From<RpcTransactionRequest> for TransactionRequest {
    fn from(r: RpcTransactionRequest) -> Self {
        Self {
            from: r.from,
            to: r.to,
            value: r.value,
            gas: r.gas.map(|g| g.saturating_to::<u64>()),
            gas_price: r.gas_price.map(|p| p.saturating_to::<u128>()),
            input: r.input,
            nonce: r.nonce.map(|n| n.saturating_to::<u64>()),
        }
    }
}
