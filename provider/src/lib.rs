// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod json_rpc;
pub mod message;
mod provider;
pub mod query;
pub mod tx;
pub mod util;
pub mod zone;

pub use provider::*;
pub use query::QueryProvider;
pub use tx::{BroadcastMode, TxProvider, TxReceipt, TxStatus};
