// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use qwallet_provider::{message::FeeParams, BroadcastMode};

pub mod account;
pub mod network;
pub mod sendable;

/// Arguments common to transactions.
#[derive(Clone, Default, Debug)]
pub struct TxArgs {
    /// Fee params. Estimated from the network when not set.
    pub fee_params: Option<FeeParams>,
    /// How long to wait on the broadcast.
    pub broadcast_mode: BroadcastMode,
}
