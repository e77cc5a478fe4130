// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use async_trait::async_trait;
use ethers::types::{Address, Block, H256, U256};

use crate::message::{FeeData, TransferRequest};
use crate::zone::Zone;

/// Provider for read-only chain queries.
///
/// Every call goes to the network; nothing is cached.
#[async_trait]
pub trait QueryProvider: Send + Sync {
    /// Balance of an account in the smallest network unit.
    async fn balance(&self, address: Address) -> anyhow::Result<U256>;

    /// Pending transaction count of an account.
    async fn nonce(&self, address: Address) -> anyhow::Result<U256>;

    /// Estimate the gas a transfer would consume.
    async fn estimate_gas(&self, request: &TransferRequest) -> anyhow::Result<U256>;

    /// Current fee market data of a zone.
    async fn fee_data(&self, zone: Zone) -> anyhow::Result<FeeData>;

    /// Latest block of a zone, with transaction hashes only.
    async fn latest_block(&self, zone: Zone) -> anyhow::Result<Block<H256>>;

    /// Current network expansion state.
    async fn protocol_expansion_number(&self) -> anyhow::Result<u64>;
}
