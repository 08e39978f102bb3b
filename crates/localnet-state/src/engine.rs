use localnet_core::account::AccountState;
use localnet_core::block::{Block, BlockHeader};
use localnet_core::error::LocalnetError;
use localnet_core::options::ChainOptions;
use localnet_core::transaction::{MinedTransaction, Receipt, Transaction, TransactionRequest, TxStatus};
use localnet_core::types::{Address, BlockNumber, BlockTag, Bytes, Gas, Nonce, Timestamp, Wei, B256, U256};
use localnet_crypto::hash::{block_hash_from_header, tx_hash_from_body};
use localnet_crypto::Keystore;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::db::{ChainDb, WorldState};
use crate::gas;

/// Fee recipient of every locally mined block.
pub const COINBASE: Address = Address::ZERO;

// ── StateEngine ───────────────────────────────────────────────────────────────

/// The local chain: validates, executes and instantly mines transactions.
///
/// Every accepted transaction is sealed into its own block while the write
/// lock is held, so readers never observe a half-applied block.
pub struct StateEngine {
    db: RwLock<ChainDb>,
    options: ChainOptions,
    keystore: Keystore,
}

impl StateEngine {
    /// Wrap a database that already holds a genesis block.
    pub fn new(db: ChainDb, options: ChainOptions, keystore: Keystore) -> Result<Self, LocalnetError> {
        if db.is_empty() {
            return Err(LocalnetError::MissingGenesis);
        }
        Ok(Self { db: RwLock::new(db), options, keystore })
    }

    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    /// Unlocked accounts in derivation order.
    pub fn accounts(&self) -> Vec<Address> {
        self.keystore.addresses()
    }

    /// Private key of an unlocked account.
    pub fn private_key_for(&self, address: &Address) -> Option<B256> {
        self.keystore.private_key_for(address)
    }

    pub fn block_number(&self) -> BlockNumber {
        self.db.read().latest_number().unwrap_or_default()
    }

    // ── State queries ─────────────────────────────────────────────────────────

    /// Account state at `tag`. Unknown addresses read as empty accounts.
    pub fn account(&self, address: &Address, tag: BlockTag) -> Result<AccountState, LocalnetError> {
        let db = self.db.read();
        let number = resolve(&db, tag)?;
        db.account_at(address, number)
            .ok_or_else(|| LocalnetError::UnknownBlock(tag.to_string()))
    }

    pub fn balance(&self, address: &Address, tag: BlockTag) -> Result<Wei, LocalnetError> {
        Ok(self.account(address, tag)?.balance)
    }

    pub fn nonce(&self, address: &Address, tag: BlockTag) -> Result<Nonce, LocalnetError> {
        Ok(self.account(address, tag)?.nonce)
    }

    pub fn code(&self, address: &Address, tag: BlockTag) -> Result<Bytes, LocalnetError> {
        Ok(self.account(address, tag)?.code)
    }

    // ── Block / transaction queries ───────────────────────────────────────────

    pub fn block(&self, tag: BlockTag) -> Option<Block> {
        let db = self.db.read();
        let latest = db.latest_number()?;
        db.block_by_number(tag.resolve(latest)).cloned()
    }

    pub fn block_by_hash(&self, hash: &B256) -> Option<Block> {
        self.db.read().block_by_hash(hash).cloned()
    }

    pub fn transaction(&self, hash: &B256) -> Option<MinedTransaction> {
        self.db.read().transaction(hash).cloned()
    }

    pub fn receipt(&self, hash: &B256) -> Option<Receipt> {
        self.db.read().receipt(hash).cloned()
    }

    /// Gas a request needs to execute successfully.
    pub fn estimate_gas(&self, request: &TransactionRequest) -> Gas {
        let input = request.input.as_ref().map(|b| b.as_ref()).unwrap_or(&[]);
        gas::required_gas(input, request.to.is_none())
    }

    // ── Mining ────────────────────────────────────────────────────────────────

    /// Validate `request`, execute it and mine it into a new block.
    ///
    /// Rejected requests leave the chain untouched. A contract creation that
    /// runs out of gas while depositing its code is still mined, with status
    /// `Failed`, its full gas limit charged and no value moved.
    pub fn send_transaction(
        &self,
        request: TransactionRequest,
        now: Timestamp,
    ) -> Result<Receipt, LocalnetError> {
        let mut db = self.db.write();

        if !self.keystore.contains(&request.from) {
            return Err(LocalnetError::UnknownSender(request.from));
        }

        let parent = db.latest_block().cloned().ok_or(LocalnetError::MissingGenesis)?;
        let mut state = db.latest_state().cloned().ok_or(LocalnetError::MissingGenesis)?;
        let sender = state.get(&request.from).cloned().unwrap_or_default();

        // ── Nonce check ───────────────────────────────────────────────────────
        let nonce = match request.nonce {
            Some(got) if got != sender.nonce => {
                return Err(LocalnetError::InvalidNonce { expected: sender.nonce, got });
            }
            _ => sender.nonce,
        };

        // ── Gas checks ────────────────────────────────────────────────────────
        let gas_limit = request.gas.unwrap_or(self.options.default_tx_gas);
        if gas_limit > self.options.block_gas_limit {
            return Err(LocalnetError::ExceedsBlockGasLimit {
                gas: gas_limit,
                limit: self.options.block_gas_limit,
            });
        }

        let input = request.input.unwrap_or_default();
        let is_create = request.to.is_none();
        let intrinsic = gas::intrinsic_gas(&input, is_create);
        if gas_limit < intrinsic {
            return Err(LocalnetError::IntrinsicGasTooLow { need: intrinsic, got: gas_limit });
        }

        // ── Funds check ───────────────────────────────────────────────────────
        let gas_price = request.gas_price.unwrap_or(self.options.gas_price);
        let value = request.value.unwrap_or_default();
        // An overflowing cost can never be covered.
        let max_cost = U256::from(gas_limit)
            .checked_mul(U256::from(gas_price))
            .and_then(|fee| fee.checked_add(value));
        match max_cost {
            Some(cost) if sender.balance >= cost => {}
            cost => {
                return Err(LocalnetError::InsufficientFunds {
                    need: cost.unwrap_or(U256::MAX),
                    have: sender.balance,
                });
            }
        }

        let mut tx = Transaction {
            hash: B256::ZERO,
            nonce,
            from: request.from,
            to: request.to,
            value,
            gas: gas_limit,
            gas_price,
            input,
            chain_id: self.options.chain_id,
        };
        tx.hash = tx_hash_from_body(&tx.body_bytes());

        // ── Execute ───────────────────────────────────────────────────────────
        let required = gas::required_gas(&tx.input, is_create);
        let status = if gas_limit >= required { TxStatus::Success } else { TxStatus::Failed };
        let gas_used = if status.is_success() { required } else { gas_limit };
        apply_transaction(&mut state, &tx, status, gas_used);

        // ── Seal ──────────────────────────────────────────────────────────────
        let block = self.seal_block(&parent, vec![tx.hash], gas_used, now);
        let receipt = Receipt {
            transaction_hash: tx.hash,
            transaction_index: 0,
            block_hash: block.hash,
            block_number: block.number,
            from: tx.from,
            to: tx.to,
            gas_used,
            cumulative_gas_used: gas_used,
            contract_address: tx.created_address(),
            status,
        };
        let mined = MinedTransaction {
            transaction: tx,
            block_hash: block.hash,
            block_number: block.number,
            index: 0,
        };

        let number = block.number;
        db.push_block(block, state)?;
        db.put_transaction(mined, receipt.clone());

        info!(
            tx_hash = %receipt.transaction_hash,
            block = number,
            gas_used,
            status = ?receipt.status,
            "mined transaction"
        );
        Ok(receipt)
    }

    /// Mine an empty block on top of the current head.
    pub fn mine(&self, now: Timestamp) -> Result<Block, LocalnetError> {
        let mut db = self.db.write();
        let parent = db.latest_block().cloned().ok_or(LocalnetError::MissingGenesis)?;
        let state = db.latest_state().cloned().ok_or(LocalnetError::MissingGenesis)?;
        let block = self.seal_block(&parent, Vec::new(), 0, now);
        debug!(number = block.number, "mined empty block");
        db.push_block(block.clone(), state)?;
        Ok(block)
    }

    fn seal_block(&self, parent: &Block, transactions: Vec<B256>, gas_used: Gas, now: Timestamp) -> Block {
        let header = BlockHeader {
            parent_hash: parent.hash,
            number: parent.number + 1,
            timestamp: now.max(parent.timestamp),
            gas_limit: self.options.block_gas_limit,
            gas_used,
            transactions,
        };
        let hash = block_hash_from_header(&header.rlp_bytes());
        header.seal(hash, COINBASE)
    }
}

fn resolve(db: &ChainDb, tag: BlockTag) -> Result<BlockNumber, LocalnetError> {
    let latest = db.latest_number().ok_or(LocalnetError::MissingGenesis)?;
    let number = tag.resolve(latest);
    if number > latest {
        return Err(LocalnetError::UnknownBlock(tag.to_string()));
    }
    Ok(number)
}

/// Move balances for an already validated transaction.
fn apply_transaction(state: &mut WorldState, tx: &Transaction, status: TxStatus, gas_used: Gas) {
    let fee = U256::from(gas_used) * U256::from(tx.gas_price);

    let sender = state.entry(tx.from).or_default();
    sender.balance -= fee;
    sender.nonce += 1;

    if status.is_success() {
        sender.balance -= tx.value;
        match (tx.to, tx.created_address()) {
            (Some(to), _) => state.entry(to).or_default().balance += tx.value,
            (None, Some(contract)) => {
                let account = state.entry(contract).or_default();
                account.balance += tx.value;
                account.nonce = 1;
                account.code = tx.input.clone();
            }
            (None, None) => {}
        }
    }

    state.entry(COINBASE).or_default().balance += fee;
}

#[cfg(test)]
mod tests {
    use super::*;
    use localnet_core::constants::{DEV_MNEMONIC, WEI_PER_ETHER};
    use localnet_core::units::ether_to_wei;

    const T0: Timestamp = 1_700_000_000;

    fn engine() -> StateEngine {
        let options = ChainOptions::default();
        let keystore = Keystore::from_mnemonic(DEV_MNEMONIC, options.total_accounts).unwrap();
        let mut state = WorldState::new();
        for addr in keystore.addresses() {
            state.insert(addr, AccountState::funded(options.default_balance_wei()));
        }
        let header = BlockHeader {
            parent_hash: B256::ZERO,
            number: 0,
            timestamp: T0,
            gas_limit: options.block_gas_limit,
            gas_used: 0,
            transactions: vec![],
        };
        let hash = block_hash_from_header(&header.rlp_bytes());
        let mut db = ChainDb::new();
        db.push_block(header.seal(hash, COINBASE), state).unwrap();
        StateEngine::new(db, options, keystore).unwrap()
    }

    fn transfer(from: Address, to: Address, value: Wei) -> TransactionRequest {
        TransactionRequest { from, to: Some(to), value: Some(value), ..Default::default() }
    }

    #[test]
    fn requires_genesis() {
        let err = StateEngine::new(ChainDb::new(), ChainOptions::default(), Keystore::default());
        assert!(matches!(err, Err(LocalnetError::MissingGenesis)));
    }

    #[test]
    fn transfer_is_mined_into_its_own_block() {
        let e = engine();
        let accts = e.accounts();
        let one = U256::from(WEI_PER_ETHER);

        let receipt = e.send_transaction(transfer(accts[0], accts[1], one), T0 + 1).unwrap();
        assert_eq!(receipt.status, TxStatus::Success);
        assert_eq!(receipt.gas_used, 21_000);
        assert_eq!(receipt.block_number, 1);
        assert_eq!(e.block_number(), 1);

        let fee = U256::from(21_000u64) * U256::from(e.options().gas_price);
        let latest = BlockTag::Latest;
        assert_eq!(e.balance(&accts[0], latest).unwrap(), ether_to_wei(100) - one - fee);
        assert_eq!(e.balance(&accts[1], latest).unwrap(), ether_to_wei(100) + one);
        assert_eq!(e.balance(&COINBASE, latest).unwrap(), fee);
        assert_eq!(e.nonce(&accts[0], latest).unwrap(), 1);

        let block = e.block(BlockTag::Latest).unwrap();
        assert_eq!(block.transactions, vec![receipt.transaction_hash]);
        assert_eq!(block.parent_hash, e.block(BlockTag::Earliest).unwrap().hash);
    }

    #[test]
    fn historical_state_is_preserved() {
        let e = engine();
        let accts = e.accounts();
        e.send_transaction(transfer(accts[0], accts[1], U256::from(1u64)), T0 + 1).unwrap();

        assert_eq!(e.balance(&accts[1], BlockTag::Earliest).unwrap(), ether_to_wei(100));
        assert_eq!(e.nonce(&accts[0], BlockTag::Number(0)).unwrap(), 0);
        assert!(matches!(
            e.balance(&accts[0], BlockTag::Number(9)),
            Err(LocalnetError::UnknownBlock(_))
        ));
    }

    #[test]
    fn rejects_unknown_sender() {
        let e = engine();
        let stranger = Address::with_last_byte(7);
        let err = e.send_transaction(transfer(stranger, e.accounts()[0], U256::ZERO), T0).unwrap_err();
        assert!(matches!(err, LocalnetError::UnknownSender(a) if a == stranger));
        assert_eq!(e.block_number(), 0);
    }

    #[test]
    fn rejects_wrong_nonce() {
        let e = engine();
        let accts = e.accounts();
        let mut req = transfer(accts[0], accts[1], U256::ZERO);
        req.nonce = Some(3);
        assert!(matches!(
            e.send_transaction(req, T0),
            Err(LocalnetError::InvalidNonce { expected: 0, got: 3 })
        ));
    }

    #[test]
    fn rejects_gas_outside_bounds() {
        let e = engine();
        let accts = e.accounts();

        let mut too_much = transfer(accts[0], accts[1], U256::ZERO);
        too_much.gas = Some(8_000_001);
        assert!(matches!(
            e.send_transaction(too_much, T0),
            Err(LocalnetError::ExceedsBlockGasLimit { .. })
        ));

        let mut too_little = transfer(accts[0], accts[1], U256::ZERO);
        too_little.gas = Some(20_999);
        assert!(matches!(
            e.send_transaction(too_little, T0),
            Err(LocalnetError::IntrinsicGasTooLow { need: 21_000, got: 20_999 })
        ));
    }

    #[test]
    fn rejects_overspend() {
        let e = engine();
        let accts = e.accounts();
        let err = e
            .send_transaction(transfer(accts[0], accts[1], ether_to_wei(100)), T0)
            .unwrap_err();
        assert!(matches!(err, LocalnetError::InsufficientFunds { .. }));
    }

    #[test]
    fn rejects_value_that_overflows_cost() {
        let e = engine();
        let accts = e.accounts();
        let err = e
            .send_transaction(transfer(accts[0], accts[1], U256::MAX), T0)
            .unwrap_err();
        assert!(matches!(err, LocalnetError::InsufficientFunds { need, .. } if need == U256::MAX));
        assert_eq!(e.block_number(), 0);
        assert_eq!(e.balance(&accts[0], BlockTag::Latest).unwrap(), ether_to_wei(100));
        assert_eq!(e.balance(&accts[1], BlockTag::Latest).unwrap(), ether_to_wei(100));
    }

    #[test]
    fn contract_creation_deploys_code() {
        let e = engine();
        let deployer = e.accounts()[0];
        let code = Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]);
        let req = TransactionRequest {
            from: deployer,
            input: Some(code.clone()),
            gas: Some(200_000),
            ..Default::default()
        };
        let receipt = e.send_transaction(req, T0).unwrap();
        assert!(receipt.status.is_success());
        assert_eq!(receipt.to, None);

        let contract = receipt.contract_address.unwrap();
        assert_eq!(contract, deployer.create(0));
        assert_eq!(e.code(&contract, BlockTag::Latest).unwrap(), code);
        assert_eq!(receipt.gas_used, gas::required_gas(&code, true));
    }

    #[test]
    fn underfunded_code_deposit_fails_but_is_mined() {
        let e = engine();
        let deployer = e.accounts()[0];
        let code = Bytes::from(vec![0x60; 100]);
        // Enough for the intrinsic cost, not for the 20_000 gas deposit.
        let gas_limit = gas::intrinsic_gas(&code, true) + 1_000;
        let req = TransactionRequest {
            from: deployer,
            input: Some(code),
            gas: Some(gas_limit),
            value: Some(U256::from(5u64)),
            ..Default::default()
        };
        let receipt = e.send_transaction(req, T0).unwrap();
        assert_eq!(receipt.status, TxStatus::Failed);
        assert_eq!(receipt.gas_used, gas_limit);

        let contract = receipt.contract_address.unwrap();
        assert!(e.code(&contract, BlockTag::Latest).unwrap().is_empty());
        assert_eq!(e.nonce(&deployer, BlockTag::Latest).unwrap(), 1);

        let fee = U256::from(gas_limit) * U256::from(e.options().gas_price);
        assert_eq!(e.balance(&deployer, BlockTag::Latest).unwrap(), ether_to_wei(100) - fee);
    }

    #[test]
    fn empty_blocks_keep_state_and_timestamps_monotonic() {
        let e = engine();
        let b1 = e.mine(T0 - 100).unwrap();
        assert_eq!(b1.number, 1);
        assert_eq!(b1.timestamp, T0);
        assert!(b1.transactions.is_empty());
        assert_eq!(e.balance(&e.accounts()[0], BlockTag::Latest).unwrap(), ether_to_wei(100));
    }

    #[test]
    fn estimate_matches_execution() {
        let e = engine();
        let accts = e.accounts();
        let req = transfer(accts[0], accts[1], U256::ZERO);
        assert_eq!(e.estimate_gas(&req), 21_000);
    }
}
