use alloy_primitives::{keccak256, B256};

/// Derive a transaction hash from its canonical body bytes using Keccak-256.
pub fn tx_hash_from_body(body_bytes: &[u8]) -> B256 {
    keccak256(body_bytes)
}

/// Derive a block hash from its RLP-encoded header using Keccak-256.
pub fn block_hash_from_header(header_bytes: &[u8]) -> B256 {
    keccak256(header_bytes)
}
