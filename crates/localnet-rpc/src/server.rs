use std::net::SocketAddr;
use std::sync::Arc;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use jsonrpsee::core::{async_trait, RpcResult};
use jsonrpsee::server::{RpcModule, Server, ServerHandle};
use jsonrpsee::types::ErrorObject;
use localnet_core::block::Block;
use localnet_core::constants::CLIENT_NAME;
use localnet_core::error::LocalnetError;
use localnet_core::types::{BlockTag, Timestamp};
use localnet_state::StateEngine;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::api::{EthApiServer, EvmApiServer, NetApiServer, Web3ApiServer};
use crate::types::{BlockTransactions, RpcBlock, RpcReceipt, RpcTransaction, RpcTransactionRequest};

const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;
/// Ethereum clients' generic "transaction rejected" code.
const TX_REJECTED: i32 = -32000;

fn rpc_err(code: i32, msg: impl Into<String>) -> ErrorObject<'static> {
    ErrorObject::owned(code, msg.into(), None::<()>)
}

fn engine_err(e: LocalnetError) -> ErrorObject<'static> {
    let code = match &e {
        LocalnetError::UnknownBlock(_) => INVALID_PARAMS,
        LocalnetError::UnknownSender(_)
        | LocalnetError::InvalidNonce { .. }
        | LocalnetError::ExceedsBlockGasLimit { .. }
        | LocalnetError::IntrinsicGasTooLow { .. }
        | LocalnetError::InsufficientFunds { .. } => TX_REJECTED,
        _ => INTERNAL_ERROR,
    };
    rpc_err(code, e.to_string())
}

fn unix_now() -> Timestamp {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// Shared state passed to the RPC server.
pub struct RpcServerState {
    pub engine: Arc<StateEngine>,
}

/// The RPC server implementation. Cheap to clone; all clones share one chain.
#[derive(Clone)]
pub struct RpcServer {
    state: Arc<RpcServerState>,
}

impl RpcServer {
    pub fn new(state: Arc<RpcServerState>) -> Self {
        Self { state }
    }

    fn engine(&self) -> &StateEngine {
        &self.state.engine
    }

    /// All namespaces merged into one module.
    pub fn into_module(self) -> anyhow::Result<RpcModule<()>> {
        let mut module = RpcModule::new(());
        module.merge(EthApiServer::into_rpc(self.clone()))?;
        module.merge(NetApiServer::into_rpc(self.clone()))?;
        module.merge(Web3ApiServer::into_rpc(self.clone()))?;
        module.merge(EvmApiServer::into_rpc(self))?;
        Ok(module)
    }

    /// Start the JSON-RPC server on `addr`.
    ///
    /// Returns the bound address (useful with port 0) and a handle to stop it.
    /// Cross-origin requests are accepted from any origin, with credentials.
    pub async fn start(self, addr: SocketAddr) -> anyhow::Result<(SocketAddr, ServerHandle)> {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);
        let middleware = tower::ServiceBuilder::new().layer(cors);

        let server = Server::builder().set_http_middleware(middleware).build(addr).await?;
        let local_addr = server.local_addr()?;
        let handle = server.start(self.into_module()?);
        info!(addr = %local_addr, "RPC server started");
        Ok((local_addr, handle))
    }

    fn render_block(&self, block: Block, full: bool) -> RpcBlock {
        let transactions = if full {
            BlockTransactions::Full(
                block
                    .transactions
                    .iter()
                    .filter_map(|h| self.engine().transaction(h))
                    .map(RpcTransaction::from)
                    .collect(),
            )
        } else {
            BlockTransactions::Hashes(block.transactions.clone())
        };
        RpcBlock::from_block(block, transactions)
    }
}

#[async_trait]
impl EthApiServer for RpcServer {
    async fn chain_id(&self) -> RpcResult<U64> {
        Ok(U64::from(self.engine().options().chain_id))
    }

    async fn block_number(&self) -> RpcResult<U64> {
        Ok(U64::from(self.engine().block_number()))
    }

    async fn gas_price(&self) -> RpcResult<U256> {
        Ok(U256::from(self.engine().options().gas_price))
    }

    async fn accounts(&self) -> RpcResult<Vec<Address>> {
        Ok(self.engine().accounts())
    }

    async fn get_balance(&self, address: Address, block: Option<BlockTag>) -> RpcResult<U256> {
        self.engine()
            .balance(&address, block.unwrap_or_default())
            .map_err(engine_err)
    }

    async fn get_transaction_count(
        &self,
        address: Address,
        block: Option<BlockTag>,
    ) -> RpcResult<U64> {
        self.engine()
            .nonce(&address, block.unwrap_or_default())
            .map(U64::from)
            .map_err(engine_err)
    }

    async fn get_code(&self, address: Address, block: Option<BlockTag>) -> RpcResult<Bytes> {
        self.engine()
            .code(&address, block.unwrap_or_default())
            .map_err(engine_err)
    }

    async fn get_block_by_number(&self, block: BlockTag, full: bool) -> RpcResult<Option<RpcBlock>> {
        Ok(self.engine().block(block).map(|b| self.render_block(b, full)))
    }

    async fn get_block_by_hash(&self, hash: B256, full: bool) -> RpcResult<Option<RpcBlock>> {
        Ok(self.engine().block_by_hash(&hash).map(|b| self.render_block(b, full)))
    }

    async fn get_transaction_by_hash(&self, hash: B256) -> RpcResult<Option<RpcTransaction>> {
        Ok(self.engine().transaction(&hash).map(RpcTransaction::from))
    }

    async fn get_transaction_receipt(&self, hash: B256) -> RpcResult<Option<RpcReceipt>> {
        Ok(self.engine().receipt(&hash).map(RpcReceipt::from))
    }

    async fn send_transaction(&self, request: RpcTransactionRequest) -> RpcResult<B256> {
        let from = request.from;
        match self.engine().send_transaction(request.into(), unix_now()) {
            Ok(receipt) => Ok(receipt.transaction_hash),
            Err(e) => {
                warn!(%from, error = %e, "RPC: transaction rejected");
                Err(engine_err(e))
            }
        }
    }

    async fn estimate_gas(&self, request: RpcTransactionRequest) -> RpcResult<U64> {
        Ok(U64::from(self.engine().estimate_gas(&request.into())))
    }
}

#[async_trait]
impl NetApiServer for RpcServer {
    async fn version(&self) -> RpcResult<String> {
        Ok(self.engine().options().network_id.to_string())
    }

    async fn listening(&self) -> RpcResult<bool> {
        Ok(true)
    }

    async fn peer_count(&self) -> RpcResult<U64> {
        Ok(U64::ZERO)
    }
}

#[async_trait]
impl Web3ApiServer for RpcServer {
    async fn client_version(&self) -> RpcResult<String> {
        Ok(format!("{CLIENT_NAME}/v{}", env!("CARGO_PKG_VERSION")))
    }
}

#[async_trait]
impl EvmApiServer for RpcServer {
    async fn mine(&self) -> RpcResult<String> {
        self.engine().mine(unix_now()).map_err(engine_err)?;
        Ok("0x0".to_string())
    }
}
