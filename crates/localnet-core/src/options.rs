use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::U256;

/// Configuration of the simulated chain.
///
/// `Default` yields the fixed development setup: 5 accounts with 100 ether
/// each, derived from the public test mnemonic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOptions {
    /// Reported by `net_version`.
    pub network_id: u64,
    /// Reported by `eth_chainId`.
    pub chain_id: u64,
    /// Number of accounts derived from `mnemonic` and funded at genesis.
    pub total_accounts: u32,
    /// Genesis balance of each derived account, in ether.
    pub default_balance_ether: u64,
    /// Gas ceiling per block.
    pub block_gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Gas limit for transactions that do not set one.
    pub default_tx_gas: u64,
    /// BIP-39 phrase the accounts are derived from.
    pub mnemonic: String,
}

impl ChainOptions {
    /// Genesis balance of each derived account, in wei.
    pub fn default_balance_wei(&self) -> U256 {
        U256::from(self.default_balance_ether) * U256::from(WEI_PER_ETHER)
    }
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            network_id: DEFAULT_NETWORK_ID,
            chain_id: DEFAULT_CHAIN_ID,
            total_accounts: DEFAULT_TOTAL_ACCOUNTS,
            default_balance_ether: DEFAULT_BALANCE_ETHER,
            block_gas_limit: DEFAULT_BLOCK_GAS_LIMIT,
            gas_price: DEFAULT_GAS_PRICE_WEI,
            default_tx_gas: DEFAULT_TX_GAS,
            mnemonic: DEV_MNEMONIC.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_balance_is_100_ether() {
        let opts = ChainOptions::default();
        assert_eq!(
            opts.default_balance_wei(),
            U256::from(100_000_000_000_000_000_000u128)
        );
    }
}
