// Copyright 2024 qwallet Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use anyhow::{anyhow, Context};
use ethers::types::{Address, U256};
use ethers::utils::{format_ether, parse_ether};

/// Suffix marking an amount given in whole QUAI rather than base units.
const WHOLE_UNIT_SUFFIX: &str = "quai";

/// Parse a hex address from string, with or without `0x` prefix.
pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s.trim()).map_err(|e| anyhow!("invalid address {}: {}", s, e))
}

/// Parse a value from string.
///
/// Plain integers are taken in the smallest network unit. A `quai` suffix
/// takes the number in whole QUAI (18 decimals), e.g. `1.5quai`.
pub fn parse_value(s: &str) -> anyhow::Result<U256> {
    let s = s.trim();
    match s.to_lowercase().strip_suffix(WHOLE_UNIT_SUFFIX) {
        Some(whole) => {
            parse_ether(whole.trim()).with_context(|| format!("invalid QUAI amount: {}", s))
        }
        None => U256::from_dec_str(s).with_context(|| format!("invalid amount: {}", s)),
    }
}

/// Parse a gas price given as a plain integer in the smallest network unit.
pub fn parse_gas_price(s: &str) -> anyhow::Result<U256> {
    let s = s.trim();
    U256::from_dec_str(s).with_context(|| format!("invalid gas price: {}", s))
}

/// Format a base unit value as whole QUAI.
pub fn format_value(value: U256) -> String {
    format!("{} QUAI", format_ether(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let with_prefix = parse_address("0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329").unwrap();
        let without_prefix = parse_address("002f4783248e2d6ff1aa6482a8c0d7a76de3c329").unwrap();
        assert_eq!(with_prefix, without_prefix);
        assert!(parse_address("0x1234").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("1").unwrap(), U256::one());
        assert_eq!(parse_value(" 4200000 ").unwrap(), U256::from(4_200_000u64));
        assert_eq!(
            parse_value("1quai").unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(
            parse_value("0.5 QUAI").unwrap(),
            U256::from(500_000_000_000_000_000u128)
        );
        assert!(parse_value("-1").is_err());
        assert!(parse_value("1.5").is_err());
        assert!(parse_value("abc").is_err());
    }

    #[test]
    fn test_parse_gas_price() {
        assert_eq!(
            parse_gas_price("30000000000000").unwrap(),
            U256::from(30_000_000_000_000u64)
        );
        assert!(parse_gas_price("1quai").is_err());
        assert!(parse_gas_price("0.5").is_err());
    }

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(U256::from(1_500_000_000_000_000_000u128)),
            "1.500000000000000000 QUAI"
        );
    }
}
