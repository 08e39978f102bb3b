use alloy_primitives::{Address, B256};
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder};
use localnet_core::constants::DERIVATION_PATH_PREFIX;
use localnet_core::error::LocalnetError;
use tracing::debug;
use zeroize::Zeroizing;

/// One unlocked development account: an address plus its secp256k1 secret.
///
/// The secret is held in `Zeroizing` so it is wiped on drop.
pub struct DevAccount {
    pub index: u32,
    pub address: Address,
    secret_key: Zeroizing<[u8; 32]>,
}

impl DevAccount {
    /// Derive the account at `m/44'/60'/0'/0/{index}` from `mnemonic`.
    pub fn derive(mnemonic: &str, index: u32) -> Result<Self, LocalnetError> {
        let path = format!("{DERIVATION_PATH_PREFIX}{index}");
        let signer = MnemonicBuilder::<English>::default()
            .phrase(mnemonic)
            .derivation_path(&path)
            .and_then(|b| b.build())
            .map_err(|e| LocalnetError::KeyDerivation { index, reason: e.to_string() })?;

        let mut secret_key = Zeroizing::new([0u8; 32]);
        secret_key.copy_from_slice(signer.credential().to_bytes().as_slice());

        Ok(Self { index, address: signer.address(), secret_key })
    }

    /// Raw private key bytes.
    pub fn private_key(&self) -> B256 {
        B256::from(*self.secret_key)
    }
}

impl std::fmt::Debug for DevAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DevAccount {{ index: {}, address: {} }}", self.index, self.address)
    }
}

/// The unlocked accounts of a local chain, in derivation order.
///
/// Private keys are only reachable through [`Keystore::private_key_for`].
#[derive(Debug, Default)]
pub struct Keystore {
    accounts: Vec<DevAccount>,
}

impl Keystore {
    /// Derive the first `count` accounts of `mnemonic`.
    pub fn from_mnemonic(mnemonic: &str, count: u32) -> Result<Self, LocalnetError> {
        let accounts = (0..count)
            .map(|i| DevAccount::derive(mnemonic, i))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count, "derived development accounts");
        Ok(Self { accounts })
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.accounts.iter().map(|a| a.address).collect()
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.accounts.iter().any(|a| &a.address == address)
    }

    /// Private key of an unlocked account, or `None` if `address` is not one.
    pub fn private_key_for(&self, address: &Address) -> Option<B256> {
        self.accounts
            .iter()
            .find(|a| &a.address == address)
            .map(DevAccount::private_key)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
