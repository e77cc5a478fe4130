// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod hd;
pub mod key;
mod signer;
mod wallet;

pub use hd::{AddressInfo, HdWallet};
pub use signer::{verify_transaction, Signer};
pub use wallet::Wallet;
