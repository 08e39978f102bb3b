use std::io::Write;

use alloy_primitives::{Address, B256, U256};
use localnet_core::units::format_ether;
use localnet_rpc::EthApiClient;
use localnet_state::StateEngine;

/// One row of the startup account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountListing {
    pub address: Address,
    pub private_key: B256,
    pub balance: U256,
}

/// Fetch the account list and balances through `client`, and each private
/// key through the engine's keystore.
pub async fn collect_accounts<C>(client: &C, engine: &StateEngine) -> anyhow::Result<Vec<AccountListing>>
where
    C: EthApiClient + Send + Sync,
{
    let mut listings = Vec::new();
    for address in client.accounts().await? {
        let balance = client.get_balance(address, None).await?;
        let private_key = engine
            .private_key_for(&address)
            .ok_or_else(|| anyhow::anyhow!("no private key for account {address}"))?;
        listings.push(AccountListing { address, private_key, balance });
    }
    Ok(listings)
}

/// Print the listing the way operators copy it into their `.env` files.
pub fn write_accounts<W: Write>(out: &mut W, listings: &[AccountListing]) -> std::io::Result<()> {
    writeln!(out, "\nAvailable accounts")?;
    writeln!(out, "==================\n")?;
    for (i, acct) in listings.iter().enumerate() {
        writeln!(out, "[{i}] {}", acct.address)?;
        writeln!(out, "    Private Key: {}", acct.private_key)?;
        writeln!(out, "    Balance: {} ETH\n", format_ether(acct.balance))?;
    }
    writeln!(out, "Copy these private keys to your .env file as:")?;
    writeln!(out, "DEFAULT_WALLET_PRIVATE_KEY, DEFAULT_WALLET_PRIVATE_KEY2, etc.\n")?;
    Ok(())
}
