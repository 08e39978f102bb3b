use localnet_core::constants::{
    CODE_DEPOSIT_GAS_PER_BYTE, TX_BASE_GAS, TX_CREATE_GAS, TX_DATA_NON_ZERO_GAS,
    TX_DATA_ZERO_GAS,
};
use localnet_core::types::Gas;

/// Gas charged before any execution: base cost, creation surcharge, calldata.
pub fn intrinsic_gas(input: &[u8], is_create: bool) -> Gas {
    let zero = input.iter().filter(|b| **b == 0).count() as u64;
    let non_zero = input.len() as u64 - zero;
    let create = if is_create { TX_CREATE_GAS } else { 0 };
    TX_BASE_GAS + create + zero * TX_DATA_ZERO_GAS + non_zero * TX_DATA_NON_ZERO_GAS
}

/// Cost of storing `code_len` bytes of contract code.
pub fn code_deposit_gas(code_len: usize) -> Gas {
    code_len as u64 * CODE_DEPOSIT_GAS_PER_BYTE
}

/// Total gas a transaction needs to succeed.
pub fn required_gas(input: &[u8], is_create: bool) -> Gas {
    let deposit = if is_create { code_deposit_gas(input.len()) } else { 0 };
    intrinsic_gas(input, is_create) + deposit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_transfer_costs_base_gas() {
        assert_eq!(intrinsic_gas(&[], false), 21_000);
        assert_eq!(required_gas(&[], false), 21_000);
    }

    #[test]
    fn calldata_is_priced_per_byte() {
        assert_eq!(intrinsic_gas(&[0, 0, 1], false), 21_000 + 4 + 4 + 16);
    }

    #[test]
    fn creation_adds_surcharge_and_deposit() {
        let code = [0x60, 0x00, 0x60, 0x00];
        assert_eq!(intrinsic_gas(&code, true), 53_000 + 2 * 16 + 2 * 4);
        assert_eq!(required_gas(&code, true), 53_000 + 40 + 4 * 200);
    }
}
