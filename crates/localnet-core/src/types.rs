use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use alloy_primitives::{Address, Bytes, B256, U256, U64};

/// Balance or value in wei.
pub type Wei = U256;

/// Height of a block; genesis is 0.
pub type BlockNumber = u64;

/// Unix timestamp (seconds, UTC).
pub type Timestamp = u64;

/// Transaction sequence number per account.
pub type Nonce = u64;

/// Amount of gas.
pub type Gas = u64;

// ── BlockTag ─────────────────────────────────────────────────────────────────

/// Block selector accepted by state queries.
///
/// On the wire this is either one of the strings `latest`, `earliest`,
/// `pending` (plus `safe`/`finalized`, treated as `latest` on an instant-mining
/// chain) or a `0x`-prefixed block number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlockTag {
    #[default]
    Latest,
    Earliest,
    Pending,
    Number(BlockNumber),
}

impl BlockTag {
    /// Resolve against the current chain head.
    pub fn resolve(self, latest: BlockNumber) -> BlockNumber {
        match self {
            BlockTag::Latest | BlockTag::Pending => latest,
            BlockTag::Earliest => 0,
            BlockTag::Number(n) => n,
        }
    }
}

impl From<BlockNumber> for BlockTag {
    fn from(n: BlockNumber) -> Self {
        BlockTag::Number(n)
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => f.write_str("latest"),
            BlockTag::Earliest => f.write_str("earliest"),
            BlockTag::Pending => f.write_str("pending"),
            BlockTag::Number(n) => write!(f, "{n:#x}"),
        }
    }
}

impl FromStr for BlockTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" | "safe" | "finalized" => Ok(BlockTag::Latest),
            "earliest" => Ok(BlockTag::Earliest),
            "pending" => Ok(BlockTag::Pending),
            _ => {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .ok_or_else(|| format!("invalid block tag: {s}"))?;
                u64::from_str_radix(digits, 16)
                    .map(BlockTag::Number)
                    .map_err(|e| format!("invalid block number {s}: {e}"))
            }
        }
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_tags() {
        assert_eq!("latest".parse::<BlockTag>().unwrap(), BlockTag::Latest);
        assert_eq!("earliest".parse::<BlockTag>().unwrap(), BlockTag::Earliest);
        assert_eq!("pending".parse::<BlockTag>().unwrap(), BlockTag::Pending);
        assert_eq!("finalized".parse::<BlockTag>().unwrap(), BlockTag::Latest);
    }

    #[test]
    fn parses_hex_numbers() {
        assert_eq!("0x0".parse::<BlockTag>().unwrap(), BlockTag::Number(0));
        assert_eq!("0x1f".parse::<BlockTag>().unwrap(), BlockTag::Number(31));
    }

    #[test]
    fn rejects_decimal_and_garbage() {
        assert!("12".parse::<BlockTag>().is_err());
        assert!("0xzz".parse::<BlockTag>().is_err());
        assert!("newest".parse::<BlockTag>().is_err());
    }

    #[test]
    fn resolve_against_head() {
        assert_eq!(BlockTag::Latest.resolve(7), 7);
        assert_eq!(BlockTag::Pending.resolve(7), 7);
        assert_eq!(BlockTag::Earliest.resolve(7), 0);
        assert_eq!(BlockTag::Number(3).resolve(7), 3);
    }

    #[test]
    fn display_matches_wire_form() {
        assert_eq!(BlockTag::Number(255).to_string(), "0xff");
        assert_eq!(BlockTag::Latest.to_string(), "latest");
    }
}
