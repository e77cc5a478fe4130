// Copyright 2024 qwallet Contributors
// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use ethers::providers::{Http, Middleware, Provider as EthProvider};
use ethers::types::{Address, Block, BlockNumber, H256, U256, U64};
use reqwest::{Client, Url};

use crate::message::{FeeData, SignedTx, TransferRequest};
use crate::query::QueryProvider;
use crate::tx::{BroadcastMode, TxProvider, TxReceipt};
use crate::zone::{zone_for_address, Zone};

/// Polling interval used while waiting for pending transactions.
const ETH_PROVIDER_POLLING_TIME: Duration = Duration::from_secs(1);
/// Maximum number of retries to fetch a transaction receipt.
/// Together with the polling time this bounds how long `Commit`
/// broadcasts wait for inclusion.
const TRANSACTION_RECEIPT_RETRIES: usize = 200;

/// A JSON RPC chain provider that routes each request to the endpoint of
/// the zone it concerns.
#[derive(Clone, Debug)]
pub struct JsonRpcProvider {
    url: Url,
    client: Client,
    zone_routing: bool,
}

impl JsonRpcProvider {
    /// Create a provider for the given base URL.
    ///
    /// Requests for a zone go to `<url>/<zone>`, e.g. `https://rpc.quai.network/cyprus1`.
    pub fn new_http(url: Url, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut client = Client::builder();
        if let Some(timeout) = timeout {
            client = client.timeout(timeout);
        }
        let client = client.build()?;

        Ok(Self {
            url,
            client,
            zone_routing: true,
        })
    }

    /// Send every request to the base URL regardless of zone.
    ///
    /// Useful for single-zone local nodes.
    pub fn without_zone_routing(mut self) -> Self {
        self.zone_routing = false;
        self
    }

    /// Endpoint serving the given zone.
    pub fn zone_url(&self, zone: Zone) -> anyhow::Result<Url> {
        if !self.zone_routing {
            return Ok(self.url.clone());
        }
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("cannot route zone requests via {}", self.url))?
            .pop_if_empty()
            .push(zone.slug());
        Ok(url)
    }

    /// An `ethers` provider bound to the endpoint of the given zone.
    pub fn zone_provider(&self, zone: Zone) -> anyhow::Result<EthProvider<Http>> {
        let url = self.zone_url(zone)?;
        tracing::debug!("Using HTTP client to submit request to: {}", url);

        let http = Http::new_with_client(url, self.client.clone());
        let mut provider = EthProvider::new(http);
        provider.set_interval(ETH_PROVIDER_POLLING_TIME);

        Ok(provider)
    }

    fn address_provider(&self, address: &Address) -> anyhow::Result<EthProvider<Http>> {
        let zone = zone_for_address(address)
            .ok_or_else(|| anyhow!("address {:?} is not in a known zone", address))?;
        self.zone_provider(zone)
    }
}

#[async_trait]
impl QueryProvider for JsonRpcProvider {
    async fn balance(&self, address: Address) -> anyhow::Result<U256> {
        let provider = self.address_provider(&address)?;
        let balance = provider
            .get_balance(address, None)
            .await
            .with_context(|| format!("failed to get balance of {:?}", address))?;
        Ok(balance)
    }

    async fn nonce(&self, address: Address) -> anyhow::Result<U256> {
        let provider = self.address_provider(&address)?;
        let nonce = provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .with_context(|| format!("failed to get nonce of {:?}", address))?;
        Ok(nonce)
    }

    async fn estimate_gas(&self, request: &TransferRequest) -> anyhow::Result<U256> {
        let provider = self.address_provider(&request.from)?;
        let gas = provider
            .estimate_gas(&request.draft(), None)
            .await
            .context("failed to estimate gas")?;
        Ok(gas)
    }

    async fn fee_data(&self, zone: Zone) -> anyhow::Result<FeeData> {
        let provider = self.zone_provider(zone)?;
        let gas_price = provider
            .get_gas_price()
            .await
            .with_context(|| format!("failed to get gas price in {}", zone))?;
        Ok(FeeData { gas_price })
    }

    async fn latest_block(&self, zone: Zone) -> anyhow::Result<Block<H256>> {
        let provider = self.zone_provider(zone)?;
        provider
            .get_block(BlockNumber::Latest)
            .await?
            .ok_or_else(|| anyhow!("latest block not found in {}", zone))
    }

    async fn protocol_expansion_number(&self) -> anyhow::Result<u64> {
        let provider = self.zone_provider(Zone::default())?;
        let number: U64 = provider
            .request("quai_getProtocolExpansionNumber", ())
            .await
            .context("failed to get protocol expansion number")?;
        Ok(number.as_u64())
    }
}

#[async_trait]
impl TxProvider for JsonRpcProvider {
    async fn perform(
        &self,
        tx: &SignedTx,
        broadcast_mode: BroadcastMode,
    ) -> anyhow::Result<TxReceipt> {
        let from = tx
            .from()
            .ok_or_else(|| anyhow!("signed transaction is missing a sender"))?;
        let provider = self.address_provider(&from)?;

        let pending = provider.send_raw_transaction(tx.raw.clone()).await?;
        let hash = pending.tx_hash();
        tracing::debug!("Broadcasted transaction {:?}", hash);

        match broadcast_mode {
            BroadcastMode::Async => Ok(TxReceipt::pending(hash)),
            BroadcastMode::Commit => {
                match pending.retries(TRANSACTION_RECEIPT_RETRIES).await? {
                    Some(receipt) => Ok(TxReceipt::committed(
                        receipt.transaction_hash,
                        receipt.block_number,
                        receipt.gas_used,
                    )),
                    None => Err(anyhow!(
                        "txn sent to network, but receipt cannot be obtained, please check scanner"
                    )),
                }
            }
        }
    }
}
