//! localnet-node: local development chain bootstrapper.
//!
//! Startup sequence:
//!   1. Derive the development accounts from the mnemonic
//!   2. Apply genesis (fund every account, seal block 0)
//!   3. Start the JSON-RPC 2.0 server
//!   4. Query our own endpoint for the accounts and print address / key / balance
//!   5. Serve until Ctrl-C

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jsonrpsee::http_client::HttpClientBuilder;
use jsonrpsee::server::ServerHandle;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use localnet_core::constants::{
    DEFAULT_BALANCE_ETHER, DEFAULT_BLOCK_GAS_LIMIT, DEFAULT_CHAIN_ID, DEFAULT_GAS_PRICE_WEI,
    DEFAULT_NETWORK_ID, DEFAULT_TOTAL_ACCOUNTS, DEFAULT_TX_GAS, DEV_MNEMONIC, WEI_PER_GWEI,
};
use localnet_core::options::ChainOptions;
use localnet_rpc::{RpcServer, RpcServerState};

mod accounts;

#[derive(Parser, Debug)]
#[command(
    name = "localnet-node",
    version,
    about = "Local development chain with deterministic, pre-funded accounts"
)]
struct Args {
    /// JSON-RPC listen address.
    #[arg(long, default_value = "127.0.0.1:8545")]
    rpc_addr: SocketAddr,

    /// Value reported by `net_version`.
    #[arg(long, default_value_t = DEFAULT_NETWORK_ID)]
    network_id: u64,

    /// Value reported by `eth_chainId`.
    #[arg(long, default_value_t = DEFAULT_CHAIN_ID)]
    chain_id: u64,

    /// Number of accounts to derive and fund.
    #[arg(long, default_value_t = DEFAULT_TOTAL_ACCOUNTS)]
    accounts: u32,

    /// Genesis balance of each account, in ether.
    #[arg(long, default_value_t = DEFAULT_BALANCE_ETHER)]
    balance: u64,

    /// Block gas limit.
    #[arg(long, default_value_t = DEFAULT_BLOCK_GAS_LIMIT)]
    gas_limit: u64,

    /// Gas price, in gwei.
    #[arg(long, default_value_t = (DEFAULT_GAS_PRICE_WEI / WEI_PER_GWEI) as u64)]
    gas_price: u64,

    /// BIP-39 mnemonic the accounts are derived from. Public by default.
    #[arg(long, default_value = DEV_MNEMONIC)]
    mnemonic: String,
}

impl Args {
    fn chain_options(&self) -> ChainOptions {
        ChainOptions {
            network_id: self.network_id,
            chain_id: self.chain_id,
            total_accounts: self.accounts,
            default_balance_ether: self.balance,
            block_gas_limit: self.gas_limit,
            gas_price: u128::from(self.gas_price) * WEI_PER_GWEI,
            default_tx_gas: DEFAULT_TX_GAS,
            mnemonic: self.mnemonic.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = args.chain_options();
    info!(
        network_id = options.network_id,
        chain_id = options.chain_id,
        accounts = options.total_accounts,
        "Localnet node starting"
    );

    // ── Chain ─────────────────────────────────────────────────────────────────
    let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
    let engine = localnet_genesis::build_chain(options, now)
        .inspect_err(|e| error!(error = %e, "error starting chain"))
        .context("initialising chain")?;
    let engine = Arc::new(engine);

    // ── RPC server ────────────────────────────────────────────────────────────
    let rpc_state = Arc::new(RpcServerState { engine: Arc::clone(&engine) });
    let (addr, handle) = RpcServer::new(rpc_state)
        .start(args.rpc_addr)
        .await
        .inspect_err(|e| error!(error = %e, addr = %args.rpc_addr, "error starting RPC server"))
        .context("starting RPC server")?;
    println!("Localnet running on http://{addr}");

    // ── Account listing ───────────────────────────────────────────────────────
    let url = format!("http://{addr}");
    let client = HttpClientBuilder::default()
        .build(&url)
        .context("building RPC client")?;
    let listings = accounts::collect_accounts(&client, &engine)
        .await
        .context("listing accounts")?;
    accounts::write_accounts(&mut std::io::stdout().lock(), &listings)?;

    info!("node ready");
    serve_until(handle, tokio::signal::ctrl_c()).await
}

/// Serve until `shutdown` resolves, then stop the server. Returns early if
/// the server stops on its own.
async fn serve_until<F>(handle: ServerHandle, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        res = shutdown => {
            res.context("waiting for Ctrl-C")?;
            info!("shutting down");
            handle.stop().context("stopping RPC server")?;
        }
        _ = handle.clone().stopped() => warn!("RPC server stopped unexpectedly"),
    }
    Ok(())
}
