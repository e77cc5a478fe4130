// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use ethers::core::k256::ecdsa::SigningKey;
use ethers::types::{Address, U256};
use reqwest::Url;
use serde::Serialize;
use stderrlog::Timestamp;

use qwallet_provider::json_rpc::JsonRpcProvider;
use qwallet_provider::util;
use qwallet_sdk::network::Network;
use qwallet_signer::{key::parse_secret_key, Wallet};

use crate::account::{handle_account, AccountArgs};
use crate::chain::{handle_chain, ChainArgs};
use crate::tx::{handle_tx, TxArgs};
use crate::wallet::{handle_wallet, WalletArgs};

mod account;
mod chain;
mod tx;
mod wallet;

/// Command line args
#[derive(Clone, Debug, Parser)]
#[command(name = "qwallet", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Network presets for RPC URL and chain ID
    #[arg(short, long, env, value_parser = parse_network, default_value = "orchard")]
    network: Network,
    /// Node JSON RPC URL; overrides the network preset
    #[arg(long, env)]
    rpc_url: Option<Url>,
    /// Chain ID used for signing; overrides the network preset
    #[arg(long, env)]
    chain_id: Option<u64>,
    /// Timeout for calls to the node
    #[arg(long, env, value_parser = humantime::parse_duration, default_value = "60s")]
    rpc_timeout: Duration,
    /// Wallet private key (ECDSA, secp256k1) for signing transactions
    #[arg(long, env = "PRIVATE_KEY", value_parser = parse_private_key, hide_env_values = true)]
    private_key: Option<SigningKey>,
    /// Logging verbosity (repeat for more verbose logging)
    #[arg(short, long, env, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Silence logging
    #[arg(short, long, env, default_value_t = false)]
    quiet: bool,
}

#[derive(Clone, Debug, Subcommand)]
enum Commands {
    /// Create and restore HD wallets.
    #[clap(alias = "wallets")]
    Wallet(WalletArgs),
    /// Query balances and send funds.
    #[clap(alias = "accounts")]
    Account(AccountArgs),
    /// Sign and verify transactions offline.
    Tx(TxArgs),
    /// Query chain state.
    Chain(ChainArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    stderrlog::new()
        .modules([
            module_path!(),
            "qwallet_provider",
            "qwallet_sdk",
            "qwallet_signer",
        ])
        .quiet(cli.quiet)
        .verbosity(cli.verbosity as usize)
        .timestamp(Timestamp::Millisecond)
        .init()?;

    match &cli.command.clone() {
        Commands::Wallet(args) => handle_wallet(args),
        Commands::Account(args) => handle_account(cli, args).await,
        Commands::Tx(args) => handle_tx(cli, args),
        Commands::Chain(args) => handle_chain(cli, args).await,
    }
}

impl Cli {
    fn chain_id(&self) -> u64 {
        self.chain_id.unwrap_or_else(|| self.network.chain_id())
    }

    fn provider(&self) -> anyhow::Result<JsonRpcProvider> {
        let url = match &self.rpc_url {
            Some(url) => url.clone(),
            None => self.network.rpc_url()?,
        };
        let provider = JsonRpcProvider::new_http(url, Some(self.rpc_timeout))?;
        Ok(if self.network.zone_routing() {
            provider
        } else {
            provider.without_zone_routing()
        })
    }
}

async fn get_signer(provider: &JsonRpcProvider, cli: &Cli) -> anyhow::Result<Wallet> {
    let sk = signer_key(cli)?;
    let mut wallet = Wallet::new_secp256k1(sk, cli.chain_id());
    wallet.init_nonce(provider).await?;
    Ok(wallet)
}

fn signer_key(cli: &Cli) -> anyhow::Result<SigningKey> {
    cli.private_key
        .clone()
        .ok_or_else(|| anyhow!("--private-key <PRIVATE_KEY> is required to sign transactions"))
}

fn parse_network(s: &str) -> Result<Network, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_private_key(s: &str) -> Result<SigningKey, String> {
    parse_secret_key(s).map_err(|e| format!("{}", e))
}

pub fn parse_address(s: &str) -> Result<Address, String> {
    util::parse_address(s).map_err(|e| format!("{}", e))
}

pub fn parse_value(s: &str) -> Result<U256, String> {
    util::parse_value(s).map_err(|e| format!("{}", e))
}

pub fn parse_gas_price(s: &str) -> Result<U256, String> {
    util::parse_gas_price(s).map_err(|e| format!("{}", e))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&value)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_send_all_args() {
        let cli = Cli::try_parse_from([
            "qwallet",
            "--network",
            "mainnet",
            "account",
            "send-all",
            "--to",
            "0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329",
        ])
        .unwrap();
        assert_eq!(cli.network, Network::Mainnet);
        assert_eq!(cli.chain_id(), 9);
        assert_eq!(cli.rpc_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_transfer_gas_price_is_plain_integer() {
        let args = |gas_price: &'static str| {
            Cli::try_parse_from([
                "qwallet",
                "account",
                "transfer",
                "--to",
                "0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329",
                "1quai",
                "--gas-limit",
                "21000",
                "--gas-price",
                gas_price,
            ])
        };
        assert!(args("30000000000000").is_ok());
        assert!(args("1quai").is_err());
    }

    #[test]
    fn test_chain_id_override() {
        let cli = Cli::try_parse_from([
            "qwallet",
            "--chain-id",
            "969",
            "chain",
            "expansion",
        ])
        .unwrap();
        assert_eq!(cli.chain_id(), 969);
    }
}
