// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Maximum sendable balance.
//!
//! A transfer pays its own fee out of the sender's balance, so the most an
//! account can send in one transaction is its balance minus
//! `gas_limit * gas_price`.

use ethers::types::{U256, U512};
use thiserror::Error;

use qwallet_provider::message::FeeParams;

/// The balance does not leave anything to send once the fee is paid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("insufficient funds: balance {balance} does not cover fee {total_fee} with value to spare")]
pub struct InsufficientFunds {
    pub balance: U256,
    /// Exact fee; may exceed the 256-bit range for absurd fee parameters.
    pub total_fee: U512,
}

/// Total fee of a transaction, computed without overflow.
pub fn total_fee(fee_params: &FeeParams) -> U512 {
    fee_params.gas_limit.full_mul(fee_params.gas_price)
}

/// Compute the largest value that can be transferred from `balance` while
/// still paying the fee described by `fee_params`.
///
/// A zero remainder is rejected: the account must be able to send
/// something.
pub fn compute_sendable(balance: U256, fee_params: &FeeParams) -> Result<U256, InsufficientFunds> {
    let total_fee = total_fee(fee_params);
    let available = U512::from(balance);
    if available <= total_fee {
        return Err(InsufficientFunds { balance, total_fee });
    }
    // total_fee < balance, so the fee fits in 256 bits and the subtraction cannot underflow.
    let fee = U256::try_from(total_fee).map_err(|_| InsufficientFunds { balance, total_fee })?;
    Ok(balance - fee)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fees(gas_limit: u64, gas_price: u64) -> FeeParams {
        FeeParams::new(gas_limit, gas_price)
    }

    #[test]
    fn test_sendable_balance() {
        let sendable = compute_sendable(U256::from(1_000_000u64), &fees(21_000, 10)).unwrap();
        assert_eq!(sendable, U256::from(790_000u64));
    }

    #[test]
    fn test_balance_below_fee() {
        let err = compute_sendable(U256::from(100u64), &fees(21_000, 10)).unwrap_err();
        assert_eq!(err.balance, U256::from(100u64));
        assert_eq!(err.total_fee, U512::from(210_000u64));
    }

    #[test]
    fn test_balance_equal_to_fee_is_rejected() {
        let err = compute_sendable(U256::from(210_000u64), &fees(21_000, 10)).unwrap_err();
        assert_eq!(err.total_fee, U512::from(210_000u64));

        let sendable = compute_sendable(U256::from(210_001u64), &fees(21_000, 10)).unwrap();
        assert_eq!(sendable, U256::one());
    }

    #[test]
    fn test_zero_balance() {
        assert!(compute_sendable(U256::zero(), &fees(0, 0)).is_err());
        assert!(compute_sendable(U256::zero(), &fees(21_000, 10)).is_err());
    }

    #[test]
    fn test_free_transaction_sends_everything() {
        assert_eq!(
            compute_sendable(U256::from(5u64), &fees(21_000, 0)).unwrap(),
            U256::from(5u64)
        );
        assert_eq!(
            compute_sendable(U256::MAX, &fees(0, 1)).unwrap(),
            U256::MAX
        );
    }

    #[test]
    fn test_fee_beyond_256_bits() {
        let fee_params = FeeParams::new(U256::MAX, U256::from(2u64));
        let err = compute_sendable(U256::MAX, &fee_params).unwrap_err();
        assert!(err.total_fee > U512::from(U256::MAX));
    }

    #[test]
    fn test_large_balances() {
        // 10^40 base units, beyond the 128-bit range.
        let balance = U256::from_dec_str("10000000000000000000000000000000000000000").unwrap();
        let fee_params = FeeParams::new(U256::from(u64::MAX), U256::from(u64::MAX));
        let expected = balance - U256::from(u64::MAX) * U256::from(u64::MAX);
        assert_eq!(compute_sendable(balance, &fee_params).unwrap(), expected);
    }

    #[test]
    fn test_idempotent() {
        let balance = U256::from(987_654_321u64);
        let fee_params = fees(21_000, 1_234);
        assert_eq!(
            compute_sendable(balance, &fee_params),
            compute_sendable(balance, &fee_params)
        );

        let low = U256::from(1u64);
        assert_eq!(
            compute_sendable(low, &fee_params),
            compute_sendable(low, &fee_params)
        );
    }

    #[test]
    fn test_matches_plain_subtraction() {
        for (balance, gas_limit, gas_price) in [
            (1_000_000u64, 21_000u64, 10u64),
            (21_000, 21_000, 1),
            (21_001, 21_000, 1),
            (u64::MAX, 1, u64::MAX - 1),
            (u64::MAX, 1, u64::MAX),
            (0, 0, 0),
        ] {
            let fee = u128::from(gas_limit) * u128::from(gas_price);
            let result = compute_sendable(U256::from(balance), &fees(gas_limit, gas_price));
            if u128::from(balance) > fee {
                assert_eq!(result.unwrap(), U256::from(u128::from(balance) - fee));
            } else {
                assert!(result.is_err());
            }
        }
    }
}
