// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::{Args, Subcommand};
use ethers::types::{Address, U256};
use serde_json::json;

use qwallet_provider::message::{FeeParams, SignedTx, TransferRequest};
use qwallet_signer::{verify_transaction, Signer, Wallet};

use crate::{parse_address, parse_gas_price, parse_value, print_json, signer_key, Cli};

#[derive(Clone, Debug, Args)]
pub struct TxArgs {
    #[command(subcommand)]
    command: TxCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum TxCommands {
    /// Sign a transfer offline and verify the signature by recovering the signer.
    Sign(SignArgs),
}

#[derive(Clone, Debug, Args)]
struct SignArgs {
    /// The recipient account address.
    #[arg(long, value_parser = parse_address)]
    to: Address,
    /// The amount to transfer in base units, or whole QUAI with a `quai` suffix.
    #[arg(long, value_parser = parse_value)]
    value: U256,
    /// Sender account nonce.
    #[arg(long, default_value_t = 0)]
    nonce: u64,
    /// Gas limit.
    #[arg(long, default_value_t = 1_000_000)]
    gas_limit: u64,
    /// Gas price in base units.
    #[arg(long, value_parser = parse_gas_price)]
    gas_price: U256,
}

pub fn handle_tx(cli: Cli, args: &TxArgs) -> anyhow::Result<()> {
    match &args.command {
        TxCommands::Sign(args) => {
            let mut signer = Wallet::new_secp256k1(signer_key(&cli)?, cli.chain_id());
            let signed = sign(&mut signer, args)?;
            let recovered = verify_transaction(&signed)?;

            print_json(&json!({
                "from": recovered,
                "hash": signed.hash,
                "raw": signed.raw,
                "valid": true,
            }))
        }
    }
}

fn sign(signer: &mut Wallet, args: &SignArgs) -> anyhow::Result<SignedTx> {
    signer.set_nonce(U256::from(args.nonce));
    let request = TransferRequest::new(signer.address(), args.to, args.value)
        .with_fee_params(FeeParams::new(args.gas_limit, args.gas_price));
    signer.transaction(request)
}
