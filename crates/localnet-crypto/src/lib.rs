pub mod hash;
pub mod keystore;

pub use hash::{block_hash_from_header, tx_hash_from_body};
pub use keystore::{DevAccount, Keystore};
