// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::anyhow;
use ethers::core::k256::ecdsa::SigningKey;
use ethers::types::{transaction::eip2718::TypedTransaction, Address};

use qwallet_provider::message::{SignedTx, TransferRequest};

pub trait Signer: Clone + Send + Sync {
    fn address(&self) -> Address;

    fn chain_id(&self) -> u64;

    fn secret_key(&self) -> Option<SigningKey>;

    /// Sign a transfer using, and then advancing, the signer's local nonce.
    fn transaction(&mut self, request: TransferRequest) -> anyhow::Result<SignedTx>;

    /// Sign an already built transaction as is.
    fn sign_transaction(&self, tx: TypedTransaction) -> anyhow::Result<SignedTx>;
}

/// Recover the signer of a transaction and check it matches the sender.
///
/// Returns the recovered address.
pub fn verify_transaction(signed: &SignedTx) -> anyhow::Result<Address> {
    let from = signed
        .from()
        .ok_or_else(|| anyhow!("transaction has no sender to verify against"))?;
    let recovered = signed.signature.recover(signed.tx.sighash())?;
    if recovered != from {
        return Err(anyhow!(
            "signature is invalid; recovered {:?}, expected {:?}",
            recovered,
            from
        ));
    }
    Ok(recovered)
}
