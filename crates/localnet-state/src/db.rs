use std::collections::{BTreeMap, HashMap};

use localnet_core::account::AccountState;
use localnet_core::block::Block;
use localnet_core::error::LocalnetError;
use localnet_core::transaction::{MinedTransaction, Receipt};
use localnet_core::types::{Address, BlockNumber, B256};

/// Account state of every known address at one block.
pub type WorldState = BTreeMap<Address, AccountState>;

/// In-memory chain database.
///
/// Collections (analogous to column families):
///   blocks      : BlockNumber → Block (dense, index = number)
///   states      : BlockNumber → WorldState after the block
///   block_index : block hash  → BlockNumber
///   transactions: tx hash     → MinedTransaction
///   receipts    : tx hash     → Receipt
///
/// Nothing here enforces chain rules; that is `StateEngine`'s job.
#[derive(Debug, Default)]
pub struct ChainDb {
    blocks: Vec<Block>,
    states: Vec<WorldState>,
    block_index: HashMap<B256, BlockNumber>,
    transactions: HashMap<B256, MinedTransaction>,
    receipts: HashMap<B256, Receipt>,
}

impl ChainDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    // ── Blocks ───────────────────────────────────────────────────────────────

    /// Append `block` together with the world state it produced.
    ///
    /// The block number must equal the current height + 1 (or 0 when empty).
    pub fn push_block(&mut self, block: Block, state: WorldState) -> Result<(), LocalnetError> {
        let expected = self.blocks.len() as BlockNumber;
        if block.number != expected {
            return Err(LocalnetError::Other(format!(
                "out-of-order block: expected #{expected}, got #{}",
                block.number
            )));
        }
        self.block_index.insert(block.hash, block.number);
        self.blocks.push(block);
        self.states.push(state);
        Ok(())
    }

    pub fn latest_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn latest_number(&self) -> Option<BlockNumber> {
        self.latest_block().map(|b| b.number)
    }

    pub fn block_by_number(&self, number: BlockNumber) -> Option<&Block> {
        self.blocks.get(usize::try_from(number).ok()?)
    }

    pub fn block_by_hash(&self, hash: &B256) -> Option<&Block> {
        self.block_index.get(hash).and_then(|n| self.block_by_number(*n))
    }

    // ── State ────────────────────────────────────────────────────────────────

    /// World state after block `number`.
    pub fn state_at(&self, number: BlockNumber) -> Option<&WorldState> {
        self.states.get(usize::try_from(number).ok()?)
    }

    pub fn latest_state(&self) -> Option<&WorldState> {
        self.states.last()
    }

    pub fn account_at(&self, address: &Address, number: BlockNumber) -> Option<AccountState> {
        self.state_at(number)
            .map(|s| s.get(address).cloned().unwrap_or_default())
    }

    // ── Transactions ─────────────────────────────────────────────────────────

    pub fn put_transaction(&mut self, mined: MinedTransaction, receipt: Receipt) {
        let hash = mined.transaction.hash;
        self.transactions.insert(hash, mined);
        self.receipts.insert(hash, receipt);
    }

    pub fn transaction(&self, hash: &B256) -> Option<&MinedTransaction> {
        self.transactions.get(hash)
    }

    pub fn receipt(&self, hash: &B256) -> Option<&Receipt> {
        self.receipts.get(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use localnet_core::types::U256;

    fn block(number: BlockNumber) -> Block {
        Block {
            number,
            hash: B256::with_last_byte(number as u8 + 1),
            parent_hash: B256::ZERO,
            timestamp: 0,
            gas_limit: 8_000_000,
            gas_used: 0,
            miner: Address::ZERO,
            transactions: vec![],
        }
    }

    #[test]
    fn blocks_must_be_contiguous() {
        let mut db = ChainDb::new();
        db.push_block(block(0), WorldState::new()).unwrap();
        assert!(db.push_block(block(2), WorldState::new()).is_err());
        db.push_block(block(1), WorldState::new()).unwrap();
        assert_eq!(db.latest_number(), Some(1));
    }

    #[test]
    fn lookup_by_hash() {
        let mut db = ChainDb::new();
        let b = block(0);
        let hash = b.hash;
        db.push_block(b, WorldState::new()).unwrap();
        assert_eq!(db.block_by_hash(&hash).map(|b| b.number), Some(0));
        assert!(db.block_by_hash(&B256::ZERO).is_none());
    }

    #[test]
    fn unknown_account_reads_as_empty() {
        let mut db = ChainDb::new();
        let alice = Address::with_last_byte(1);
        let mut state = WorldState::new();
        state.insert(alice, AccountState::funded(U256::from(5u64)));
        db.push_block(block(0), state).unwrap();

        assert_eq!(db.account_at(&alice, 0).unwrap().balance, U256::from(5u64));
        assert_eq!(db.account_at(&Address::ZERO, 0), Some(AccountState::default()));
        assert_eq!(db.account_at(&alice, 1), None);
    }
}
