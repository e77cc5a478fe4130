// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::{Args, Subcommand};
use ethers::types::{Address, U256};
use serde_json::json;

use qwallet_provider::{message::FeeParams, util::format_value, BroadcastMode};
use qwallet_sdk::{
    account::{Account, TransferError},
    TxArgs,
};
use qwallet_signer::Signer;

use crate::{
    get_signer, parse_address, parse_gas_price, parse_value, print_json, signer_key, Cli,
};

#[derive(Clone, Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    command: AccountCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum AccountCommands {
    /// Get the balance of an account.
    Balance(BalanceArgs),
    /// Transfer funds to another account.
    Transfer(TransferArgs),
    /// Transfer the entire balance, minus the fee, to another account.
    SendAll(SendAllArgs),
}

#[derive(Clone, Debug, Args)]
struct BalanceArgs {
    /// Account address. The signer address is used if no address is given.
    #[arg(short, long, value_parser = parse_address)]
    address: Option<Address>,
}

#[derive(Clone, Debug, Args)]
struct TransferArgs {
    /// The recipient account address.
    #[arg(long, value_parser = parse_address)]
    to: Address,
    /// The amount to transfer in base units, or whole QUAI with a `quai` suffix.
    #[arg(value_parser = parse_value)]
    amount: U256,
    /// Gas limit. Estimated if not given.
    #[arg(long, requires = "gas_price")]
    gas_limit: Option<u64>,
    /// Gas price in base units. Uses the zone's current price if not given.
    #[arg(long, requires = "gas_limit", value_parser = parse_gas_price)]
    gas_price: Option<U256>,
    /// Broadcast mode for the transaction.
    #[arg(short, long, default_value = "commit")]
    broadcast_mode: BroadcastMode,
}

#[derive(Clone, Debug, Args)]
struct SendAllArgs {
    /// The recipient account address.
    #[arg(long, env = "RECIPIENT_ADDRESS", value_parser = parse_address)]
    to: Address,
    /// Broadcast mode for the transaction.
    #[arg(short, long, default_value = "commit")]
    broadcast_mode: BroadcastMode,
}

pub async fn handle_account(cli: Cli, args: &AccountArgs) -> anyhow::Result<()> {
    let provider = cli.provider()?;

    match &args.command {
        AccountCommands::Balance(args) => {
            let address = match args.address {
                Some(addr) => addr,
                None => ethers::utils::secret_key_to_address(&signer_key(&cli)?),
            };
            let balance = Account::balance(&provider, address).await?;

            print_json(&json!({
                "address": address,
                "balance": balance.to_string(),
                "formatted": format_value(balance),
            }))
        }
        AccountCommands::Transfer(args) => {
            let mut signer = get_signer(&provider, &cli).await?;
            let fee_params = match (args.gas_limit, args.gas_price) {
                (Some(gas_limit), Some(gas_price)) => Some(FeeParams::new(gas_limit, gas_price)),
                _ => None,
            };
            let tx_args = TxArgs {
                fee_params,
                broadcast_mode: args.broadcast_mode,
            };

            let tx = Account::transfer(&provider, &mut signer, args.to, args.amount, tx_args).await?;

            print_json(&tx)
        }
        AccountCommands::SendAll(args) => {
            let mut signer = get_signer(&provider, &cli).await?;
            log::info!("Sending full balance of {:?} to {:?}", signer.address(), args.to);

            match Account::send_full_balance(
                &provider,
                &mut signer,
                args.to,
                args.broadcast_mode,
            )
            .await
            {
                Ok(res) => print_json(&res),
                Err(TransferError::InsufficientFunds(e)) => {
                    log::warn!("{}", e);
                    println!("Not enough balance to send");
                    Ok(())
                }
                Err(TransferError::Provider(e)) => Err(e),
            }
        }
    }
}
