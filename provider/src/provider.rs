// Copyright 2024 qwallet Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::query::QueryProvider;
use crate::tx::TxProvider;

/// Provider capable of submitting queries and transactions.
pub trait Provider: QueryProvider + TxProvider {}

impl<T> Provider for T where T: QueryProvider + TxProvider {}
