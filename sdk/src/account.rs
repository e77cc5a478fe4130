// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::anyhow;
use ethers::types::{Address, U256};
use serde::Serialize;
use thiserror::Error;

use qwallet_provider::{
    message::{FeeParams, TransferRequest},
    zone::{zone_for_address, Zone},
    BroadcastMode, Provider, QueryProvider, TxProvider, TxReceipt,
};
use qwallet_signer::Signer;

use crate::sendable::{compute_sendable, InsufficientFunds};
use crate::TxArgs;

/// The full balance is estimated against a draft transfer of this fraction of it.
///
/// Gas usage can depend on the encoded length of the value, so the estimate
/// for the draft may differ slightly from the real transfer.
pub const ESTIMATE_VALUE_DIVISOR: u64 = 10;

/// Errors of the transfer workflows.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFunds),
    /// Failure of the provider or signer, passed through unchanged.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

/// Outcome of [`Account::send_full_balance`].
#[derive(Debug, Clone, Serialize)]
pub struct FullBalanceTransfer {
    /// Balance before the transfer.
    pub balance: U256,
    pub fee_params: FeeParams,
    /// Value sent to the recipient.
    pub sendable: U256,
    pub receipt: TxReceipt,
}

/// A static wrapper around account methods.
pub struct Account {}

impl Account {
    /// Get the balance of an address.
    pub async fn balance(provider: &impl QueryProvider, address: Address) -> anyhow::Result<U256> {
        provider.balance(address).await
    }

    /// Transfer `value` from a [`Signer`] to an address.
    ///
    /// Fee params are estimated when `args` doesn't carry any.
    pub async fn transfer(
        provider: &impl Provider,
        signer: &mut impl Signer,
        to: Address,
        value: U256,
        args: TxArgs,
    ) -> anyhow::Result<TxReceipt> {
        let request = TransferRequest::new(signer.address(), to, value);
        let fee_params = match args.fee_params {
            Some(fee_params) => fee_params,
            None => estimate_fee_params(provider, &request).await?,
        };
        let signed = signer.transaction(request.with_fee_params(fee_params))?;
        tracing::info!("Broadcasting transaction {:?}", signed.hash);
        provider.perform(&signed, args.broadcast_mode).await
    }

    /// Transfer everything a [`Signer`] holds to an address, minus the
    /// transaction's own fee.
    ///
    /// Nothing is signed or broadcast if the balance doesn't cover the fee.
    pub async fn send_full_balance(
        provider: &impl Provider,
        signer: &mut impl Signer,
        to: Address,
        broadcast_mode: BroadcastMode,
    ) -> Result<FullBalanceTransfer, TransferError> {
        let from = signer.address();
        let balance = provider.balance(from).await?;
        tracing::info!("Balance of {:?}: {}", from, balance);

        let draft = TransferRequest::new(from, to, balance / ESTIMATE_VALUE_DIVISOR);
        let fee_params = estimate_fee_params(provider, &draft).await?;

        let sendable = compute_sendable(balance, &fee_params)?;
        tracing::info!("Sendable balance: {}", sendable);

        let request = TransferRequest::new(from, to, sendable).with_fee_params(fee_params.clone());
        let signed = signer.transaction(request)?;
        tracing::info!("Transaction {:?} broadcasted", signed.hash);
        let receipt = provider.perform(&signed, broadcast_mode).await?;
        if let Some(block_number) = receipt.block_number {
            tracing::info!("Transaction included in block {}", block_number);
        }

        Ok(FullBalanceTransfer {
            balance,
            fee_params,
            sendable,
            receipt,
        })
    }
}

/// Zone of the sender of a transfer.
fn sender_zone(request: &TransferRequest) -> anyhow::Result<Zone> {
    zone_for_address(&request.from)
        .ok_or_else(|| anyhow!("sender {:?} is not in a known zone", request.from))
}

/// Estimate gas for a transfer and price it at the sender zone's gas price.
async fn estimate_fee_params(
    provider: &impl QueryProvider,
    request: &TransferRequest,
) -> anyhow::Result<FeeParams> {
    let gas_limit = provider.estimate_gas(request).await?;
    let zone = sender_zone(request)?;
    let fee_data = provider.fee_data(zone).await?;
    Ok(FeeParams {
        gas_limit,
        gas_price: fee_data.gas_price,
    })
}
