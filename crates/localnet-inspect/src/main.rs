//! localnet-inspect: print a snapshot of a running local chain.
//!
//! Examples:
//!   localnet-inspect
//!   localnet-inspect --rpc http://127.0.0.1:9545 --blocks 10

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use jsonrpsee::http_client::HttpClientBuilder;
use tracing::error;
use tracing_subscriber::EnvFilter;

use localnet_inspect::{Inspector, DEFAULT_BLOCK_CAP};

#[derive(Parser, Debug)]
#[command(
    name = "localnet-inspect",
    version,
    about = "Read-only report of a local chain's accounts, blocks and transactions"
)]
struct Args {
    /// JSON-RPC endpoint of the chain.
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    rpc: String,

    /// Maximum number of recent blocks to show.
    #[arg(long, default_value_t = DEFAULT_BLOCK_CAP)]
    blocks: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(rpc = %args.rpc, "inspection failed: {e:#}");
            eprintln!("\nError: {e:#}");
            eprintln!("Make sure the chain is running on {}", args.rpc);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let client = HttpClientBuilder::default()
        .build(&args.rpc)
        .with_context(|| format!("building RPC client for {}", args.rpc))?;
    Inspector::new(&client)
        .with_block_cap(args.blocks)
        .run(&mut std::io::stdout().lock())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_endpoint() {
        let args = Args::parse_from(["localnet-inspect"]);
        assert_eq!(args.rpc, "http://127.0.0.1:8545");
        assert_eq!(args.blocks, 5);
    }

    #[test]
    fn flags_override_defaults() {
        let args =
            Args::parse_from(["localnet-inspect", "--rpc", "http://10.0.0.2:9000", "--blocks", "2"]);
        assert_eq!(args.rpc, "http://10.0.0.2:9000");
        assert_eq!(args.blocks, 2);
    }
}
