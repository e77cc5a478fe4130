// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt::Display;
use std::str::FromStr;

use anyhow::anyhow;
use ethers::types::Address;
use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

/// A routing region of the network.
///
/// Every address belongs to exactly one zone, encoded in its first byte as
/// `region << 4 | zone`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    #[default]
    Cyprus1,
    Cyprus2,
    Cyprus3,
    Paxos1,
    Paxos2,
    Paxos3,
    Hydra1,
    Hydra2,
    Hydra3,
}

/// Address space an address belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ledger {
    /// Account based ledger.
    Quai,
    /// UTXO based ledger.
    Qi,
}

impl Zone {
    pub const ALL: [Zone; 9] = [
        Zone::Cyprus1,
        Zone::Cyprus2,
        Zone::Cyprus3,
        Zone::Paxos1,
        Zone::Paxos2,
        Zone::Paxos3,
        Zone::Hydra1,
        Zone::Hydra2,
        Zone::Hydra3,
    ];

    /// Zone prefix byte.
    pub fn byte(&self) -> u8 {
        match self {
            Zone::Cyprus1 => 0x00,
            Zone::Cyprus2 => 0x01,
            Zone::Cyprus3 => 0x02,
            Zone::Paxos1 => 0x10,
            Zone::Paxos2 => 0x11,
            Zone::Paxos3 => 0x12,
            Zone::Hydra1 => 0x20,
            Zone::Hydra2 => 0x21,
            Zone::Hydra3 => 0x22,
        }
    }

    /// Decode a zone from an address prefix byte.
    pub fn from_byte(b: u8) -> Option<Self> {
        Zone::ALL.into_iter().find(|z| z.byte() == b)
    }

    /// Path segment used to route RPC requests to this zone.
    pub fn slug(&self) -> &'static str {
        match self {
            Zone::Cyprus1 => "cyprus1",
            Zone::Cyprus2 => "cyprus2",
            Zone::Cyprus3 => "cyprus3",
            Zone::Paxos1 => "paxos1",
            Zone::Paxos2 => "paxos2",
            Zone::Paxos3 => "paxos3",
            Zone::Hydra1 => "hydra1",
            Zone::Hydra2 => "hydra2",
            Zone::Hydra3 => "hydra3",
        }
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Zone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "");
        Zone::ALL
            .into_iter()
            .find(|z| z.slug() == normalized)
            .ok_or_else(|| anyhow!("invalid zone: {}", s))
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(|e| Error::custom(format!("{e}")))
    }
}

impl Serialize for Zone {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.slug().serialize(serializer)
    }
}

/// Resolve the zone an address lives in.
///
/// Returns `None` if the first byte does not encode a known zone.
pub fn zone_for_address(address: &Address) -> Option<Zone> {
    Zone::from_byte(address.as_bytes()[0])
}

/// Resolve the ledger of an address from the top bit of its second byte.
pub fn ledger_for_address(address: &Address) -> Ledger {
    if address.as_bytes()[1] & 0x80 != 0 {
        Ledger::Qi
    } else {
        Ledger::Quai
    }
}

/// Whether the address is a Quai ledger address in the given zone.
pub fn is_quai_address_in_zone(address: &Address, zone: Zone) -> bool {
    zone_for_address(address) == Some(zone) && ledger_for_address(address) == Ledger::Quai
}
