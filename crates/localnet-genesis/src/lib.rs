//! localnet-genesis
//!
//! Builds the founding state of a local chain, writing directly into a
//! `ChainDb` without going through the transaction engine:
//!
//! 1. derive `total_accounts` keys from the configured mnemonic
//! 2. credit each with `default_balance_ether`
//! 3. seal block 0 (no transactions, zero parent hash)

use localnet_core::account::AccountState;
use localnet_core::block::{Block, BlockHeader};
use localnet_core::error::LocalnetError;
use localnet_core::options::ChainOptions;
use localnet_core::types::{Timestamp, B256};
use localnet_crypto::hash::block_hash_from_header;
use localnet_crypto::Keystore;
use localnet_state::engine::COINBASE;
use localnet_state::{ChainDb, StateEngine, WorldState};
use tracing::info;

/// Write genesis accounts and block 0 into an empty `db`.
pub fn apply_genesis(
    db: &mut ChainDb,
    options: &ChainOptions,
    keystore: &Keystore,
    timestamp: Timestamp,
) -> Result<Block, LocalnetError> {
    if !db.is_empty() {
        return Err(LocalnetError::GenesisAlreadyApplied);
    }

    let balance = options.default_balance_wei();
    let alloc: WorldState = keystore
        .addresses()
        .into_iter()
        .map(|addr| (addr, AccountState::funded(balance)))
        .collect();

    let header = BlockHeader {
        parent_hash: B256::ZERO,
        number: 0,
        timestamp,
        gas_limit: options.block_gas_limit,
        gas_used: 0,
        transactions: Vec::new(),
    };
    let hash = block_hash_from_header(&header.rlp_bytes());
    let genesis = header.seal(hash, COINBASE);

    db.push_block(genesis.clone(), alloc)?;
    info!(
        accounts = keystore.len(),
        balance_ether = options.default_balance_ether,
        hash = %genesis.hash,
        "genesis: funded development accounts"
    );
    Ok(genesis)
}

/// Derive keys, apply genesis and hand back a ready engine.
pub fn build_chain(options: ChainOptions, timestamp: Timestamp) -> Result<StateEngine, LocalnetError> {
    let keystore = Keystore::from_mnemonic(&options.mnemonic, options.total_accounts)?;
    let mut db = ChainDb::new();
    apply_genesis(&mut db, &options, &keystore, timestamp)?;
    StateEngine::new(db, options, keystore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use localnet_core::types::{BlockTag, U256};

    #[test]
    fn funds_every_derived_account() {
        let engine = build_chain(ChainOptions::default(), 1_700_000_000).unwrap();
        let accounts = engine.accounts();
        assert_eq!(accounts.len(), 5);
        for addr in &accounts {
            assert_eq!(
                engine.balance(addr, BlockTag::Latest).unwrap(),
                U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
            );
            assert_eq!(engine.nonce(addr, BlockTag::Latest).unwrap(), 0);
        }
    }

    #[test]
    fn genesis_block_is_empty_and_rooted_at_zero() {
        let engine = build_chain(ChainOptions::default(), 42).unwrap();
        let genesis = engine.block(BlockTag::Earliest).unwrap();
        assert_eq!(genesis.number, 0);
        assert_eq!(genesis.parent_hash, B256::ZERO);
        assert_eq!(genesis.timestamp, 42);
        assert!(genesis.transactions.is_empty());
        assert_eq!(engine.block_number(), 0);
    }

    #[test]
    fn genesis_is_deterministic() {
        let a = build_chain(ChainOptions::default(), 42).unwrap();
        let b = build_chain(ChainOptions::default(), 42).unwrap();
        assert_eq!(a.accounts(), b.accounts());
        assert_eq!(
            a.block(BlockTag::Earliest).unwrap().hash,
            b.block(BlockTag::Earliest).unwrap().hash
        );
    }

    #[test]
    fn genesis_only_applies_once() {
        let options = ChainOptions::default();
        let keystore = Keystore::from_mnemonic(&options.mnemonic, 1).unwrap();
        let mut db = ChainDb::new();
        apply_genesis(&mut db, &options, &keystore, 0).unwrap();
        assert!(matches!(
            apply_genesis(&mut db, &options, &keystore, 0),
            Err(LocalnetError::GenesisAlreadyApplied)
        ));
    }

    #[test]
    fn honours_account_count_and_balance() {
        let options = ChainOptions {
            total_accounts: 2,
            default_balance_ether: 7,
            ..ChainOptions::default()
        };
        let engine = build_chain(options.clone(), 0).unwrap();
        assert_eq!(engine.accounts().len(), 2);
        assert_eq!(
            engine.balance(&engine.accounts()[1], BlockTag::Latest).unwrap(),
            options.default_balance_wei()
        );
    }
}
