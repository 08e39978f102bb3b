use alloy_primitives::{Address, U256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocalnetError {
    // ── Transaction errors ───────────────────────────────────────────────────
    #[error("sender account not recognized: {0}")]
    UnknownSender(Address),

    #[error("invalid nonce: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("exceeds block gas limit: {gas} > {limit}")]
    ExceedsBlockGasLimit { gas: u64, limit: u64 },

    #[error("intrinsic gas too low: need {need}, got {got}")]
    IntrinsicGasTooLow { need: u64, got: u64 },

    #[error("sender doesn't have enough funds to send tx: need {need} wei, have {have}")]
    InsufficientFunds { need: U256, have: U256 },

    // ── Query errors ─────────────────────────────────────────────────────────
    #[error("unknown block: {0}")]
    UnknownBlock(String),

    // ── Keys / genesis ───────────────────────────────────────────────────────
    #[error("key derivation failed for index {index}: {reason}")]
    KeyDerivation { index: u32, reason: String },

    #[error("genesis already applied")]
    GenesisAlreadyApplied,

    #[error("chain has no genesis block")]
    MissingGenesis,

    #[error("{0}")]
    Other(String),
}
