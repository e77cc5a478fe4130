// Copyright 2024 qwallet Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use anyhow::anyhow;
use async_trait::async_trait;
use ethers::types::{H256, U256, U64};
use serde::Serialize;

use crate::message::SignedTx;

/// Controls how the provider waits for the result of a transaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum BroadcastMode {
    /// Return immediately after the transaction is accepted by the node.
    Async,
    /// Wait for the transaction to be included in a block before returning.
    #[default]
    Commit,
}

impl FromStr for BroadcastMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "async" => Self::Async,
            "commit" => Self::Commit,
            _ => return Err(anyhow!("invalid broadcast mode")),
        })
    }
}

/// The current status of a transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// The transaction is in the memory pool waiting to be included in a block.
    Pending,
    /// The transaction has been included in a block.
    Committed,
}

/// The receipt of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxReceipt {
    /// The transaction's current status.
    pub status: TxStatus,
    /// The hash of the transaction.
    pub hash: H256,
    /// The block number at which the transaction was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<U64>,
    /// Gas used by the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<U256>,
}

impl TxReceipt {
    /// Create a new receipt with status pending.
    pub fn pending(hash: H256) -> Self {
        TxReceipt {
            status: TxStatus::Pending,
            hash,
            block_number: None,
            gas_used: None,
        }
    }

    /// Create a new receipt with status committed.
    pub fn committed(hash: H256, block_number: Option<U64>, gas_used: Option<U256>) -> Self {
        TxReceipt {
            status: TxStatus::Committed,
            hash,
            block_number,
            gas_used,
        }
    }
}

/// Provider for submitting transactions.
#[async_trait]
pub trait TxProvider: Send + Sync {
    /// Broadcast a signed transaction.
    async fn perform(&self, tx: &SignedTx, broadcast_mode: BroadcastMode)
        -> anyhow::Result<TxReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_mode_parse() {
        assert_eq!(BroadcastMode::from_str("async").unwrap(), BroadcastMode::Async);
        assert_eq!(BroadcastMode::from_str("commit").unwrap(), BroadcastMode::Commit);
        assert!(BroadcastMode::from_str("sync").is_err());
        assert_eq!(BroadcastMode::default(), BroadcastMode::Commit);
    }

    #[test]
    fn test_receipt_json() {
        let pending = serde_json::to_value(TxReceipt::pending(H256::zero())).unwrap();
        assert_eq!(pending["status"], "pending");
        assert!(pending.get("block_number").is_none());

        let committed = TxReceipt::committed(H256::zero(), Some(U64::from(12)), None);
        let committed = serde_json::to_value(committed).unwrap();
        assert_eq!(committed["status"], "committed");
        assert_eq!(committed["block_number"], "0xc");
    }
}
