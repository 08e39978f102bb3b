/// ─── Localnet Chain Constants ───────────────────────────────────────────────
///
/// Defaults for the local development chain. Every value here can be
/// overridden through `ChainOptions`; these are what a bare `localnet-node`
/// launch uses.

// ── Units ────────────────────────────────────────────────────────────────────

/// 1 ether expressed in wei.
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// 1 gwei expressed in wei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

// ── Network ──────────────────────────────────────────────────────────────────

/// JSON-RPC listen port.
pub const DEFAULT_RPC_PORT: u16 = 8545;

/// Value reported by `net_version`.
pub const DEFAULT_NETWORK_ID: u64 = 5777;

/// Value reported by `eth_chainId` and mixed into transaction hashes.
pub const DEFAULT_CHAIN_ID: u64 = 1337;

/// Name reported by `web3_clientVersion`.
pub const CLIENT_NAME: &str = "Localnet";

// ── Genesis ──────────────────────────────────────────────────────────────────

/// Number of pre-funded accounts derived from the mnemonic.
pub const DEFAULT_TOTAL_ACCOUNTS: u32 = 5;

/// Starting balance of every pre-funded account, in ether.
pub const DEFAULT_BALANCE_ETHER: u64 = 100;

/// Well-known development mnemonic. Public; never use it to hold real funds.
pub const DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// BIP-44 path prefix for Ethereum accounts; the account index is appended.
pub const DERIVATION_PATH_PREFIX: &str = "m/44'/60'/0'/0/";

// ── Gas ──────────────────────────────────────────────────────────────────────

/// Gas ceiling per block.
pub const DEFAULT_BLOCK_GAS_LIMIT: u64 = 8_000_000;

/// Gas price used when a transaction does not specify one (20 gwei).
pub const DEFAULT_GAS_PRICE_WEI: u128 = 20 * WEI_PER_GWEI;

/// Gas limit used when a transaction does not specify one.
pub const DEFAULT_TX_GAS: u64 = 90_000;

/// Base cost of every transaction.
pub const TX_BASE_GAS: u64 = 21_000;

/// Surcharge for transactions without a recipient.
pub const TX_CREATE_GAS: u64 = 32_000;

/// Calldata cost per zero byte.
pub const TX_DATA_ZERO_GAS: u64 = 4;

/// Calldata cost per non-zero byte.
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;

/// Cost of storing one byte of contract code.
pub const CODE_DEPOSIT_GAS_PER_BYTE: u64 = 200;
