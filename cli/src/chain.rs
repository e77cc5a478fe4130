// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use clap::{Args, Subcommand};
use serde_json::json;

use qwallet_provider::{zone::Zone, QueryProvider};

use crate::{print_json, Cli};

#[derive(Clone, Debug, Args)]
pub struct ChainArgs {
    #[command(subcommand)]
    command: ChainCommands,
}

#[derive(Clone, Debug, Subcommand)]
enum ChainCommands {
    /// Get the latest block of a zone.
    Block(BlockArgs),
    /// Get the current protocol expansion number.
    Expansion,
}

#[derive(Clone, Debug, Args)]
struct BlockArgs {
    /// Zone to query.
    #[arg(short, long, default_value_t = Zone::Cyprus1)]
    zone: Zone,
}

pub async fn handle_chain(cli: Cli, args: &ChainArgs) -> anyhow::Result<()> {
    let provider = cli.provider()?;

    match &args.command {
        ChainCommands::Block(args) => {
            let block = provider.latest_block(args.zone).await?;
            print_json(&block)
        }
        ChainCommands::Expansion => {
            let number = provider.protocol_expansion_number().await?;
            print_json(&json!({ "protocol_expansion_number": number }))
        }
    }
}
