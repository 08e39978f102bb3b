pub mod account;
pub mod block;
pub mod constants;
pub mod error;
pub mod options;
pub mod transaction;
pub mod types;
pub mod units;

pub use account::*;
pub use block::*;
pub use constants::*;
pub use error::LocalnetError;
pub use options::ChainOptions;
pub use transaction::*;
pub use types::*;
