//! localnet-inspect
//!
//! Read-only report over a running chain's JSON-RPC endpoint: network info,
//! balances, the most recent blocks with their transactions, and per-account
//! transaction counts. Every query is awaited before the next is issued; the
//! first failure aborts the report.

pub mod report;

pub use report::{
    blocks_to_show, recent_block_numbers, recipient_label, status_label, InspectionSummary,
    Inspector, CONTRACT_CREATION, DEFAULT_BLOCK_CAP,
};
