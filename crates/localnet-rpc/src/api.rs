use alloy_primitives::{Address, Bytes, B256, U256, U64};
use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;
use localnet_core::types::BlockTag;

use crate::types::{RpcBlock, RpcReceipt, RpcTransaction, RpcTransactionRequest};

/// Ethereum JSON-RPC `eth_*` subset served by a local chain.
///
/// Block parameters default to `latest` when omitted.
#[rpc(server, client, namespace = "eth")]
pub trait EthApi {
    /// Chain id used for transaction hashing.
    #[method(name = "chainId")]
    async fn chain_id(&self) -> RpcResult<U64>;

    /// Number of the most recent block.
    #[method(name = "blockNumber")]
    async fn block_number(&self) -> RpcResult<U64>;

    /// Gas price in wei.
    #[method(name = "gasPrice")]
    async fn gas_price(&self) -> RpcResult<U256>;

    /// Unlocked accounts, in derivation order.
    #[method(name = "accounts")]
    async fn accounts(&self) -> RpcResult<Vec<Address>>;

    /// Balance in wei.
    #[method(name = "getBalance")]
    async fn get_balance(&self, address: Address, block: Option<BlockTag>) -> RpcResult<U256>;

    /// Number of transactions sent from `address` (its nonce).
    #[method(name = "getTransactionCount")]
    async fn get_transaction_count(
        &self,
        address: Address,
        block: Option<BlockTag>,
    ) -> RpcResult<U64>;

    /// Contract code stored at `address`; empty for plain accounts.
    #[method(name = "getCode")]
    async fn get_code(&self, address: Address, block: Option<BlockTag>) -> RpcResult<Bytes>;

    /// Block by number or tag. `full` returns transaction objects instead of hashes.
    #[method(name = "getBlockByNumber")]
    async fn get_block_by_number(&self, block: BlockTag, full: bool) -> RpcResult<Option<RpcBlock>>;

    #[method(name = "getBlockByHash")]
    async fn get_block_by_hash(&self, hash: B256, full: bool) -> RpcResult<Option<RpcBlock>>;

    #[method(name = "getTransactionByHash")]
    async fn get_transaction_by_hash(&self, hash: B256) -> RpcResult<Option<RpcTransaction>>;

    #[method(name = "getTransactionReceipt")]
    async fn get_transaction_receipt(&self, hash: B256) -> RpcResult<Option<RpcReceipt>>;

    /// Sign with an unlocked account and mine immediately. Returns the tx hash.
    #[method(name = "sendTransaction")]
    async fn send_transaction(&self, request: RpcTransactionRequest) -> RpcResult<B256>;

    /// Gas the request would use if sent now.
    #[method(name = "estimateGas")]
    async fn estimate_gas(&self, request: RpcTransactionRequest) -> RpcResult<U64>;
}

#[rpc(server, client, namespace = "net")]
pub trait NetApi {
    /// Network id as a decimal string.
    #[method(name = "version")]
    async fn version(&self) -> RpcResult<String>;

    #[method(name = "listening")]
    async fn listening(&self) -> RpcResult<bool>;

    #[method(name = "peerCount")]
    async fn peer_count(&self) -> RpcResult<U64>;
}

#[rpc(server, client, namespace = "web3")]
pub trait Web3Api {
    #[method(name = "clientVersion")]
    async fn client_version(&self) -> RpcResult<String>;
}

/// Chain-control methods.
#[rpc(server, client, namespace = "evm")]
pub trait EvmApi {
    /// Mine one empty block. Returns `"0x0"`.
    #[method(name = "mine")]
    async fn mine(&self) -> RpcResult<String>;
}
