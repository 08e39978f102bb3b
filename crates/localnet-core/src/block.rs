use alloy_rlp::RlpEncodable;
use serde::{Deserialize, Serialize};

use crate::types::{Address, BlockNumber, Gas, Timestamp, B256};

/// A sealed block. Immutable once mined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub number: BlockNumber,
    pub hash: B256,
    pub parent_hash: B256,
    pub timestamp: Timestamp,
    pub gas_limit: Gas,
    pub gas_used: Gas,
    /// Fee recipient. Always the zero address on a local chain.
    pub miner: Address,
    /// Hashes of the included transactions, in execution order.
    pub transactions: Vec<B256>,
}

/// Fields committed to by the block hash.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable)]
pub struct BlockHeader {
    pub parent_hash: B256,
    pub number: BlockNumber,
    pub timestamp: Timestamp,
    pub gas_limit: Gas,
    pub gas_used: Gas,
    pub transactions: Vec<B256>,
}

impl BlockHeader {
    /// Canonical RLP encoding of the header.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }

    /// Attach the computed hash and produce the final block.
    pub fn seal(self, hash: B256, miner: Address) -> Block {
        Block {
            number: self.number,
            hash,
            parent_hash: self.parent_hash,
            timestamp: self.timestamp,
            gas_limit: self.gas_limit,
            gas_used: self.gas_used,
            miner,
            transactions: self.transactions,
        }
    }
}
