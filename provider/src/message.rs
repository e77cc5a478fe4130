// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use ethers::types::{
    transaction::eip2718::TypedTransaction, Address, Bytes, Signature, TransactionRequest, H256,
    U256,
};
use serde::Serialize;

/// Fee parameters for transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeeParams {
    /// Maximum amount of gas that can be consumed.
    pub gas_limit: U256,
    /// Price paid per unit of gas, in the smallest network unit.
    pub gas_price: U256,
}

impl FeeParams {
    pub fn new(gas_limit: impl Into<U256>, gas_price: impl Into<U256>) -> Self {
        FeeParams {
            gas_limit: gas_limit.into(),
            gas_price: gas_price.into(),
        }
    }
}

/// Current fee market data of a zone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeeData {
    pub gas_price: U256,
}

/// A value transfer between two accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    /// Fee parameters. Left to the signer's caller to fill when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_params: Option<FeeParams>,
}

impl TransferRequest {
    pub fn new(from: Address, to: Address, value: U256) -> Self {
        TransferRequest {
            from,
            to,
            value,
            fee_params: None,
        }
    }

    pub fn with_fee_params(mut self, fee_params: FeeParams) -> Self {
        self.fee_params = Some(fee_params);
        self
    }

    /// Unsigned call object used for gas estimation.
    pub fn draft(&self) -> TypedTransaction {
        TypedTransaction::Legacy(self.legacy())
    }

    /// Convert into a typed transaction ready for signing.
    ///
    /// Transfers are always sent as legacy gas-price transactions.
    pub fn to_typed(&self, nonce: U256, chain_id: u64) -> TypedTransaction {
        let mut tx = self.legacy().nonce(nonce).chain_id(chain_id);
        if let Some(fee_params) = &self.fee_params {
            tx = tx.gas(fee_params.gas_limit).gas_price(fee_params.gas_price);
        }
        TypedTransaction::Legacy(tx)
    }

    fn legacy(&self) -> TransactionRequest {
        TransactionRequest::new()
            .from(self.from)
            .to(self.to)
            .value(self.value)
    }
}

/// A signed transaction ready for broadcast.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTx {
    pub tx: TypedTransaction,
    pub signature: Signature,
    /// RLP encoding of the signed transaction.
    pub raw: Bytes,
    pub hash: H256,
}

impl SignedTx {
    pub fn new(tx: TypedTransaction, signature: Signature) -> Self {
        let raw = tx.rlp_signed(&signature);
        let hash = tx.hash(&signature);
        SignedTx {
            tx,
            signature,
            raw,
            hash,
        }
    }

    /// The claimed sender of the transaction.
    pub fn from(&self) -> Option<Address> {
        self.tx.from().copied()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ethers::types::U64;

    use super::*;

    #[test]
    fn test_transfer_to_typed() {
        let from = Address::from_str("0x00a3e45aa16163F2663015b6695894D918866d19").unwrap();
        let to = Address::from_str("0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329").unwrap();
        let req = TransferRequest::new(from, to, U256::from(42))
            .with_fee_params(FeeParams::new(21000u64, 10u64));

        let tx = req.to_typed(U256::from(7), 9);
        assert_eq!(tx.from(), Some(&from));
        assert_eq!(tx.to_addr(), Some(&to));
        assert_eq!(tx.value(), Some(&U256::from(42)));
        assert_eq!(tx.nonce(), Some(&U256::from(7)));
        assert_eq!(tx.gas(), Some(&U256::from(21000)));
        assert_eq!(tx.gas_price(), Some(U256::from(10)));
        assert_eq!(tx.chain_id(), Some(U64::from(9)));
    }

    #[test]
    fn test_transfer_without_fee_params() {
        let req = TransferRequest::new(Address::zero(), Address::zero(), U256::one());
        let tx = req.to_typed(U256::zero(), 1);
        assert_eq!(tx.gas(), None);
        assert_eq!(tx.gas_price(), None);

        let draft = req.draft();
        assert_eq!(draft.nonce(), None);
        assert_eq!(draft.chain_id(), None);
    }
}
