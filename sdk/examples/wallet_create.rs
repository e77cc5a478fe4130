// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use qwallet_provider::{json_rpc::JsonRpcProvider, zone::Zone, QueryProvider};
use qwallet_sdk::network::Network;
use qwallet_signer::HdWallet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Use testnet network defaults
    let network = Network::Orchard;
    let provider = JsonRpcProvider::new_http(network.rpc_url()?, None)?;

    // Generate a random mnemonic with 32 bytes of entropy
    let mut wallet = HdWallet::generate()?;
    println!("Mnemonic: {}", wallet.phrase());

    // First address in Cyprus1 for account index 0
    let info = wallet.next_address(0, Zone::Cyprus1)?;
    println!("Address info: {}", serde_json::to_string_pretty(&info)?);
    println!("Private key: {}", wallet.private_key(&info.address)?);

    let block = provider.latest_block(Zone::Cyprus1).await?;
    println!("Latest Cyprus1 block: {:?}", block.number);

    let expansion = provider.protocol_expansion_number().await?;
    println!("Protocol expansion number: {}", expansion);

    Ok(())
}
