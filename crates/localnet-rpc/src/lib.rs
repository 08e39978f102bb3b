//! localnet-rpc
//!
//! Ethereum-style JSON-RPC 2.0 server (and typed client) for a local chain.
//!
//! Namespaces / methods:
//!   eth_chainId, eth_blockNumber, eth_gasPrice, eth_accounts
//!   eth_getBalance, eth_getTransactionCount, eth_getCode
//!   eth_getBlockByNumber, eth_getBlockByHash
//!   eth_getTransactionByHash, eth_getTransactionReceipt
//!   eth_sendTransaction, eth_estimateGas
//!   net_version, net_listening, net_peerCount
//!   web3_clientVersion
//!   evm_mine

pub mod api;
pub mod server;
pub mod types;

pub use api::{EthApiClient, EvmApiClient, NetApiClient, Web3ApiClient};
pub use server::{RpcServer, RpcServerState};
pub use types::{BlockTransactions, RpcBlock, RpcReceipt, RpcTransaction, RpcTransactionRequest};
