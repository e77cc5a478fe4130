// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::{Args, Subcommand};
use serde::Serialize;

use qwallet_provider::zone::Zone;
use qwallet_signer::{AddressInfo, HdWallet};

use crate::print_json;

#[derive(Clone, Debug, Args)]
pub struct WalletArgs {
    #[command(subcommand)]
    command: WalletCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum WalletCommands {
    /// Create a wallet from a random mnemonic.
    New(DeriveArgs),
    /// Derive addresses from an existing mnemonic.
    Derive(RestoreArgs),
}

#[derive(Clone, Debug, Args)]
struct DeriveArgs {
    /// BIP-44 account index.
    #[arg(short, long, default_value_t = 0)]
    account: u32,
    /// Zone the derived addresses must belong to.
    #[arg(short, long, default_value_t = Zone::Cyprus1)]
    zone: Zone,
    /// Number of addresses to derive.
    #[arg(short, long, default_value_t = 1)]
    count: usize,
}

#[derive(Clone, Debug, Args)]
struct RestoreArgs {
    /// Mnemonic phrase to restore the wallet from.
    #[arg(short, long, env = "MNEMONIC", hide_env_values = true)]
    phrase: String,
    #[command(flatten)]
    derive: DeriveArgs,
}

#[derive(Serialize)]
struct DerivedAddress {
    #[serde(flatten)]
    info: AddressInfo,
    private_key: String,
}

#[derive(Serialize)]
struct WalletOutput {
    mnemonic: String,
    addresses: Vec<DerivedAddress>,
}

pub fn handle_wallet(args: &WalletArgs) -> anyhow::Result<()> {
    let (wallet, derive) = match &args.command {
        WalletCommands::New(args) => (HdWallet::generate()?, args),
        WalletCommands::Derive(args) => (HdWallet::from_phrase(&args.phrase)?, &args.derive),
    };
    let output = derive_addresses(wallet, derive)?;
    print_json(&output)
}

fn derive_addresses(mut wallet: HdWallet, args: &DeriveArgs) -> anyhow::Result<WalletOutput> {
    let mut addresses = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let info = wallet.next_address(args.account, args.zone)?;
        let private_key = wallet.private_key(&info.address)?;
        addresses.push(DerivedAddress { info, private_key });
    }
    Ok(WalletOutput {
        mnemonic: wallet.phrase().to_string(),
        addresses,
    })
}

#[cfg(test)]
mod tests {
    use qwallet_provider::zone::zone_for_address;

    use super::*;

    const PHRASE: &str = "stumble steel jeans emotion remind current remind viable what hood ladder lunch slush stable rough crew merge lyrics cabin bid between enough fault virtual";

    #[test]
    fn test_derive_addresses() {
        let wallet = HdWallet::from_phrase(PHRASE).unwrap();
        let args = DeriveArgs {
            account: 0,
            zone: Zone::Paxos1,
            count: 2,
        };

        let output = derive_addresses(wallet, &args).unwrap();
        assert_eq!(output.mnemonic, PHRASE);
        assert_eq!(output.addresses.len(), 2);
        for derived in &output.addresses {
            assert_eq!(zone_for_address(&derived.info.address), Some(Zone::Paxos1));
            assert!(derived.private_key.starts_with("0x"));
        }

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["addresses"][0]["zone"], "paxos1");
        assert!(json["addresses"][0]["private_key"].is_string());
    }
}
