// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

//! Send the full balance of an account in one transaction.
//!
//! Reads `PRIVATE_KEY` and `RECIPIENT_ADDRESS` from the environment or a `.env` file.

use std::env;

use anyhow::Context;

use qwallet_provider::{json_rpc::JsonRpcProvider, util::parse_address, BroadcastMode};
use qwallet_sdk::{
    account::{Account, TransferError},
    network::Network,
};
use qwallet_signer::{key::parse_secret_key, Wallet};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let pk = parse_secret_key(&env::var("PRIVATE_KEY").context("PRIVATE_KEY not set")?)?;
    let to = parse_address(&env::var("RECIPIENT_ADDRESS").context("RECIPIENT_ADDRESS not set")?)?;

    // Use testnet network defaults
    let network = Network::Orchard;
    let provider = JsonRpcProvider::new_http(network.rpc_url()?, None)?;

    let mut signer = Wallet::new_secp256k1(pk, network.chain_id());
    signer.init_nonce(&provider).await?;

    match Account::send_full_balance(&provider, &mut signer, to, BroadcastMode::Commit).await {
        Ok(res) => {
            println!("Balance: {}", res.balance);
            println!("Sendable balance: {}", res.sendable);
            if let Some(block_number) = res.receipt.block_number {
                println!("Transaction included in block {}", block_number);
            }
            println!("Transaction hash: {:?}", res.receipt.hash);
            Ok(())
        }
        Err(TransferError::InsufficientFunds(_)) => {
            println!("Not enough balance to send");
            Ok(())
        }
        Err(TransferError::Provider(e)) => Err(e),
    }
}
