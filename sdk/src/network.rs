// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use anyhow::anyhow;
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const MAINNET_RPC_URL: &str = "https://rpc.quai.network";
pub const ORCHARD_RPC_URL: &str = "https://orchard.rpc.quai.network";
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:9001";

pub const MAINNET_CHAIN_ID: u64 = 9;
pub const ORCHARD_CHAIN_ID: u64 = 15000;
pub const LOCAL_CHAIN_ID: u64 = 1337;

/// Network presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Network presets for mainnet.
    Mainnet,
    /// Network presets for the Orchard testnet.
    #[default]
    Orchard,
    /// Network presets for a local single-zone node.
    Local,
}

impl Network {
    pub fn rpc_url(&self) -> anyhow::Result<Url> {
        let url = match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Orchard => ORCHARD_RPC_URL,
            Network::Local => LOCAL_RPC_URL,
        };
        Ok(Url::parse(url)?)
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Orchard => ORCHARD_CHAIN_ID,
            Network::Local => LOCAL_CHAIN_ID,
        }
    }

    /// Whether requests are routed to per-zone endpoints.
    pub fn zone_routing(&self) -> bool {
        !matches!(self, Network::Local)
    }
}

impl FromStr for Network {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "mainnet" => Network::Mainnet,
            "orchard" | "testnet" => Network::Orchard,
            "local" | "localnet" => Network::Local,
            _ => return Err(anyhow!("invalid network")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_presets() {
        assert_eq!(Network::default(), Network::Orchard);
        assert_eq!(Network::Mainnet.chain_id(), 9);
        assert_eq!(
            Network::Orchard.rpc_url().unwrap().as_str(),
            "https://orchard.rpc.quai.network/"
        );
        assert!(Network::Orchard.zone_routing());
        assert!(!Network::Local.zone_routing());
    }

    #[test]
    fn test_network_parse() {
        assert_eq!(Network::from_str("Testnet").unwrap(), Network::Orchard);
        assert_eq!(Network::from_str("local").unwrap(), Network::Local);
        assert!(Network::from_str("devnet").is_err());

        let network: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(network, Network::Mainnet);
    }
}
