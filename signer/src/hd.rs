// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeMap;
use std::ops::Range;

use anyhow::{anyhow, Context};
use coins_bip32::prelude::*;
use ethers::core::k256::ecdsa::SigningKey;
use ethers::signers::coins_bip39::{English, Mnemonic};
use ethers::types::Address;
use ethers::utils::secret_key_to_address;
use serde::Serialize;

use qwallet_provider::zone::{is_quai_address_in_zone, Zone};

use crate::key::encode_secret_key;
use crate::wallet::Wallet;

/// BIP-44 coin type registered for Quai.
pub const QUAI_COIN_TYPE: u32 = 994;
/// Number of words of generated mnemonics (32 bytes of entropy).
const MNEMONIC_WORD_COUNT: usize = 24;
/// Upper bound on child indices tried when searching for an address in a zone.
/// On average one in 512 children lands in a given zone on the Quai ledger.
const MAX_ADDRESS_DERIVATION_ATTEMPTS: u32 = 10_000;
/// First hardened child index. Address indices must stay below it.
const HARDENED_INDEX: u32 = 1 << 31;

/// An address derived from an [`HdWallet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressInfo {
    pub address: Address,
    pub account: u32,
    pub index: u32,
    pub zone: Zone,
    pub derivation_path: String,
}

/// A hierarchical deterministic wallet backed by a BIP-39 mnemonic.
///
/// Addresses are derived at `m/44'/994'/{account}'/0/{index}`. Only children
/// that land in the requested zone on the Quai ledger are handed out.
#[derive(Clone)]
pub struct HdWallet {
    phrase: String,
    master: XPriv,
    derived: BTreeMap<Address, (AddressInfo, SigningKey)>,
}

impl std::fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdWallet")
            .field("derived", &self.derived.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl HdWallet {
    /// Create a wallet from a fresh random mnemonic.
    pub fn generate() -> anyhow::Result<Self> {
        let mut rng = rand::thread_rng();
        let mnemonic = Mnemonic::<English>::new_with_count(&mut rng, MNEMONIC_WORD_COUNT)
            .context("failed to generate mnemonic")?;
        Self::from_mnemonic(mnemonic)
    }

    /// Restore a wallet from an existing mnemonic phrase.
    pub fn from_phrase(phrase: &str) -> anyhow::Result<Self> {
        let mnemonic = Mnemonic::<English>::new_from_phrase(phrase.trim())
            .context("invalid mnemonic phrase")?;
        Self::from_mnemonic(mnemonic)
    }

    fn from_mnemonic(mnemonic: Mnemonic<English>) -> anyhow::Result<Self> {
        let master = mnemonic
            .master_key(None)
            .context("failed to derive master key")?;
        Ok(HdWallet {
            phrase: mnemonic.to_phrase(),
            master,
            derived: BTreeMap::new(),
        })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Derive the next unused address of an account in the given zone.
    pub fn next_address(&mut self, account: u32, zone: Zone) -> anyhow::Result<AddressInfo> {
        let start = self
            .derived
            .values()
            .filter(|(info, _)| info.account == account)
            .map(|(info, _)| info.index + 1)
            .max()
            .unwrap_or_default();

        let account_path = format!("m/44'/{}'/{}'/0", QUAI_COIN_TYPE, account);
        let account_key = self
            .master
            .derive_path(account_path.as_str())
            .with_context(|| format!("failed to derive {}", account_path))?;

        for index in search_range(start) {
            let child = account_key.derive_child(index)?;
            let key: &coins_bip32::prelude::SigningKey = child.as_ref();
            let sk = SigningKey::from_bytes(&key.to_bytes())?;
            let address = secret_key_to_address(&sk);
            if !is_quai_address_in_zone(&address, zone) {
                continue;
            }

            let info = AddressInfo {
                address,
                account,
                index,
                zone,
                derivation_path: format!("{}/{}", account_path, index),
            };
            tracing::debug!("Derived {:?} at {}", address, info.derivation_path);
            self.derived.insert(address, (info.clone(), sk));
            return Ok(info);
        }

        Err(anyhow!(
            "no address in zone {} found for account {} after {} attempts",
            zone,
            account,
            MAX_ADDRESS_DERIVATION_ATTEMPTS
        ))
    }

    /// Addresses derived so far.
    pub fn addresses(&self) -> Vec<AddressInfo> {
        self.derived.values().map(|(info, _)| info.clone()).collect()
    }

    /// Hex-encoded private key of a previously derived address.
    pub fn private_key(&self, address: &Address) -> anyhow::Result<String> {
        Ok(encode_secret_key(self.signing_key(address)?))
    }

    /// A single-key [`Wallet`] for a previously derived address.
    pub fn wallet(&self, address: &Address, chain_id: u64) -> anyhow::Result<Wallet> {
        let sk = self.signing_key(address)?.clone();
        Ok(Wallet::new_secp256k1(sk, chain_id))
    }

    fn signing_key(&self, address: &Address) -> anyhow::Result<&SigningKey> {
        self.derived
            .get(address)
            .map(|(_, sk)| sk)
            .ok_or_else(|| anyhow!("address {:?} was not derived by this wallet", address))
    }
}

/// Non-hardened child indices tried by a zone search starting at `start`.
fn search_range(start: u32) -> Range<u32> {
    start..start
        .saturating_add(MAX_ADDRESS_DERIVATION_ATTEMPTS)
        .min(HARDENED_INDEX)
}
