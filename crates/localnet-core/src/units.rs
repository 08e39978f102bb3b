//! Wei ↔ human unit formatting.

use alloy_primitives::utils::{ParseUnits, Unit};
use alloy_primitives::U256;

use crate::constants::WEI_PER_ETHER;

/// Format a wei amount in ether, without trailing zeros (`100`, `0.5`).
pub fn format_ether(wei: U256) -> String {
    trim_fraction(ParseUnits::from(wei).format_units(Unit::ETHER))
}

/// Format a wei amount in gwei, without trailing zeros (`20`, `1.5`).
pub fn format_gwei(wei: U256) -> String {
    trim_fraction(ParseUnits::from(wei).format_units(Unit::GWEI))
}

/// Whole ether → wei.
pub fn ether_to_wei(ether: u64) -> U256 {
    U256::from(ether) * U256::from(WEI_PER_ETHER)
}

fn trim_fraction(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WEI_PER_GWEI;

    #[test]
    fn whole_ether_has_no_fraction() {
        assert_eq!(format_ether(ether_to_wei(100)), "100");
        assert_eq!(format_ether(U256::ZERO), "0");
    }

    #[test]
    fn fractional_ether_keeps_significant_digits() {
        let half = U256::from(WEI_PER_ETHER / 2);
        assert_eq!(format_ether(half), "0.5");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn gas_price_in_gwei() {
        assert_eq!(format_gwei(U256::from(20 * WEI_PER_GWEI)), "20");
        assert_eq!(format_gwei(U256::from(1_500_000_000u64)), "1.5");
    }

    #[test]
    fn large_totals_do_not_overflow() {
        let total = ether_to_wei(u64::MAX) * U256::from(1_000u64);
        assert!(format_ether(total).starts_with("18446744073709551615000"));
    }
}
