use serde::{Deserialize, Serialize};

use crate::types::{Bytes, Nonce, Wei};

/// Per-address state held by the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountState {
    pub balance: Wei,
    pub nonce: Nonce,
    /// Empty for externally owned accounts.
    pub code: Bytes,
}

impl AccountState {
    /// A fresh externally owned account holding `balance`.
    pub fn funded(balance: Wei) -> Self {
        Self { balance, ..Default::default() }
    }
}
