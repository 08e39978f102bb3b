use std::io::Write;

use alloy_primitives::{Address, B256, U256};
use anyhow::Context;
use chrono::{DateTime, Local};
use localnet_core::types::BlockTag;
use localnet_core::units::{format_ether, format_gwei};
use localnet_rpc::{EthApiClient, RpcBlock};
use tracing::debug;

/// Upper bound on the number of recent blocks shown.
pub const DEFAULT_BLOCK_CAP: u64 = 5;

/// Recipient label for transactions that deploy a contract.
pub const CONTRACT_CREATION: &str = "Contract Creation";

const RULE_WIDTH: usize = 60;

/// How many recent blocks to show: `min(cap, latest + 1)`.
pub fn blocks_to_show(latest: u64, cap: u64) -> u64 {
    cap.min(latest.saturating_add(1))
}

/// Block numbers to visit, newest first, never below genesis.
pub fn recent_block_numbers(latest: u64, cap: u64) -> Vec<u64> {
    (0..blocks_to_show(latest, cap)).map(|i| latest - i).collect()
}

pub fn recipient_label(to: Option<Address>) -> String {
    to.map(|a| a.to_string())
        .unwrap_or_else(|| CONTRACT_CREATION.to_string())
}

pub fn status_label(success: bool) -> &'static str {
    if success {
        "Success"
    } else {
        "Failed"
    }
}

fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn rule<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// What a completed report showed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectionSummary {
    pub chain_id: u64,
    pub latest_block: u64,
    pub gas_price: U256,
    /// Balance of each account, in `eth_accounts` order.
    pub balances: Vec<(Address, U256)>,
    pub total_balance: U256,
    /// Numbers of the blocks actually printed, newest first.
    pub blocks_shown: Vec<u64>,
    /// Number of transaction detail entries printed.
    pub transactions_shown: usize,
    /// Transaction count of each account.
    pub nonces: Vec<(Address, u64)>,
}

/// Runs the fixed sequence of read-only queries and prints the report.
pub struct Inspector<'a, C> {
    client: &'a C,
    block_cap: u64,
}

impl<'a, C> Inspector<'a, C>
where
    C: EthApiClient + Send + Sync,
{
    pub fn new(client: &'a C) -> Self {
        Self { client, block_cap: DEFAULT_BLOCK_CAP }
    }

    pub fn with_block_cap(mut self, cap: u64) -> Self {
        self.block_cap = cap;
        self
    }

    /// Print the full report to `out`.
    ///
    /// Sections are written as soon as their data arrives, so on error
    /// everything fetched before the failing call has already been printed.
    pub async fn run<W: Write>(&self, out: &mut W) -> anyhow::Result<InspectionSummary> {
        let mut summary = InspectionSummary::default();

        writeln!(out, "LOCALNET DATA VIEWER")?;
        rule(out)?;

        self.network_info(out, &mut summary).await?;
        let accounts = self.balances(out, &mut summary).await?;
        self.recent_blocks(out, &mut summary).await?;
        self.transaction_counts(out, &accounts, &mut summary).await?;

        Ok(summary)
    }

    async fn network_info<W: Write>(
        &self,
        out: &mut W,
        summary: &mut InspectionSummary,
    ) -> anyhow::Result<()> {
        let chain_id = self.client.chain_id().await.context("eth_chainId")?;
        let latest = self.client.block_number().await.context("eth_blockNumber")?;
        let gas_price = self.client.gas_price().await.context("eth_gasPrice")?;

        summary.chain_id = chain_id.to::<u64>();
        summary.latest_block = latest.to::<u64>();
        summary.gas_price = gas_price;

        writeln!(out, "\nNETWORK INFO:")?;
        writeln!(out, "Chain ID: {chain_id}")?;
        writeln!(out, "Current Block: {latest}")?;
        writeln!(out, "Gas Price: {} Gwei", format_gwei(gas_price))?;
        Ok(())
    }

    async fn balances<W: Write>(
        &self,
        out: &mut W,
        summary: &mut InspectionSummary,
    ) -> anyhow::Result<Vec<Address>> {
        let accounts = self.client.accounts().await.context("eth_accounts")?;

        writeln!(out, "\nACCOUNTS & BALANCES:")?;
        rule(out)?;

        let mut total = U256::ZERO;
        for (i, address) in accounts.iter().enumerate() {
            let balance = self
                .client
                .get_balance(*address, None)
                .await
                .with_context(|| format!("eth_getBalance({address})"))?;
            total += balance;
            summary.balances.push((*address, balance));

            writeln!(out, "\n[{i}] {address}")?;
            writeln!(out, "    Balance: {} ETH", format_ether(balance))?;
            writeln!(out, "    Wei: {balance}")?;
        }
        summary.total_balance = total;

        writeln!(out)?;
        rule(out)?;
        writeln!(out, "Total: {} ETH", format_ether(total))?;
        Ok(accounts)
    }

    async fn recent_blocks<W: Write>(
        &self,
        out: &mut W,
        summary: &mut InspectionSummary,
    ) -> anyhow::Result<()> {
        writeln!(out, "\nRECENT BLOCKS:")?;
        rule(out)?;

        for number in recent_block_numbers(summary.latest_block, self.block_cap) {
            let block = self
                .client
                .get_block_by_number(BlockTag::Number(number), false)
                .await
                .with_context(|| format!("eth_getBlockByNumber({number})"))?;
            let Some(block) = block else {
                debug!(number, "block not found, skipping");
                continue;
            };
            summary.transactions_shown += self.print_block(out, &block).await?;
            summary.blocks_shown.push(number);
        }
        Ok(())
    }

    /// Print one block and its transactions. Returns the number of
    /// transaction entries printed.
    async fn print_block<W: Write>(&self, out: &mut W, block: &RpcBlock) -> anyhow::Result<usize> {
        let hashes = block.transactions.hashes();

        writeln!(out, "\nBlock #{}", block.number)?;
        writeln!(out, "  Hash: {}", block.hash)?;
        writeln!(out, "  Timestamp: {}", format_timestamp(block.timestamp.to::<u64>()))?;
        writeln!(out, "  Transactions: {}", hashes.len())?;

        if hashes.is_empty() {
            return Ok(0);
        }

        writeln!(out, "  Transaction Details:")?;
        for hash in &hashes {
            self.print_transaction(out, *hash).await?;
        }
        Ok(hashes.len())
    }

    async fn print_transaction<W: Write>(&self, out: &mut W, hash: B256) -> anyhow::Result<()> {
        let tx = self
            .client
            .get_transaction_by_hash(hash)
            .await
            .with_context(|| format!("eth_getTransactionByHash({hash})"))?
            .with_context(|| format!("transaction {hash} not found"))?;
        let receipt = self
            .client
            .get_transaction_receipt(hash)
            .await
            .with_context(|| format!("eth_getTransactionReceipt({hash})"))?
            .with_context(|| format!("receipt for {hash} not found"))?;

        writeln!(out, "    - Hash: {}", tx.hash)?;
        writeln!(out, "      From: {}", tx.from)?;
        writeln!(out, "      To: {}", recipient_label(tx.to))?;
        writeln!(out, "      Value: {} ETH", format_ether(tx.value))?;
        writeln!(out, "      Gas Used: {}", receipt.gas_used)?;
        writeln!(out, "      Status: {}", status_label(receipt.is_success()))?;
        Ok(())
    }

    async fn transaction_counts<W: Write>(
        &self,
        out: &mut W,
        accounts: &[Address],
        summary: &mut InspectionSummary,
    ) -> anyhow::Result<()> {
        writeln!(out, "\nTRANSACTION COUNT:")?;
        rule(out)?;
        for (i, address) in accounts.iter().enumerate() {
            let count = self
                .client
                .get_transaction_count(*address, None)
                .await
                .with_context(|| format!("eth_getTransactionCount({address})"))?;
            summary.nonces.push((*address, count.to::<u64>()));
            writeln!(out, "[{i}] {address}: {count} transactions")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_at_most_cap_blocks() {
        assert_eq!(blocks_to_show(0, 5), 1);
        assert_eq!(blocks_to_show(3, 5), 4);
        assert_eq!(blocks_to_show(4, 5), 5);
        assert_eq!(blocks_to_show(100, 5), 5);
        assert_eq!(blocks_to_show(u64::MAX, 5), 5);
    }

    #[test]
    fn walks_backward_without_going_below_genesis() {
        assert_eq!(recent_block_numbers(0, 5), vec![0]);
        assert_eq!(recent_block_numbers(2, 5), vec![2, 1, 0]);
        assert_eq!(recent_block_numbers(9, 5), vec![9, 8, 7, 6, 5]);
        assert!(recent_block_numbers(9, 0).is_empty());
    }

    #[test]
    fn missing_recipient_is_contract_creation() {
        assert_eq!(recipient_label(None), "Contract Creation");
        let addr = Address::with_last_byte(1);
        assert_eq!(recipient_label(Some(addr)), addr.to_string());
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(true), "Success");
        assert_eq!(status_label(false), "Failed");
    }

    #[test]
    fn timestamp_is_human_readable() {
        let s = format_timestamp(1_700_000_000);
        assert_eq!(s.len(), "2023-11-14 22:13:20".len());
        assert!(s.starts_with("2023-11-1"));
    }
}
