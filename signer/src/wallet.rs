// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use ethers::core::k256::ecdsa::SigningKey;
use ethers::signers::{LocalWallet, Signer as EthSigner};
use ethers::types::{transaction::eip2718::TypedTransaction, Address, U256};

use qwallet_provider::message::{SignedTx, TransferRequest};
use qwallet_provider::QueryProvider;

use crate::signer::Signer;

/// A signer holding a single secp256k1 key.
#[derive(Debug, Clone)]
pub struct Wallet {
    inner: LocalWallet,
    nonce: U256,
}

impl Signer for Wallet {
    fn address(&self) -> Address {
        self.inner.address()
    }

    fn chain_id(&self) -> u64 {
        self.inner.chain_id()
    }

    fn secret_key(&self) -> Option<SigningKey> {
        Some(self.inner.signer().clone())
    }

    fn transaction(&mut self, request: TransferRequest) -> anyhow::Result<SignedTx> {
        let tx = request.to_typed(self.nonce, self.chain_id());
        let signed = self.sign_transaction(tx)?;
        self.nonce += U256::one();
        Ok(signed)
    }

    fn sign_transaction(&self, tx: TypedTransaction) -> anyhow::Result<SignedTx> {
        let signature = self.inner.sign_transaction_sync(&tx)?;
        Ok(SignedTx::new(tx, signature))
    }
}

impl Wallet {
    pub fn new_secp256k1(sk: SigningKey, chain_id: u64) -> Self {
        Wallet {
            inner: LocalWallet::from(sk).with_chain_id(chain_id),
            nonce: U256::zero(),
        }
    }

    /// Initialize the nonce from the account's pending transaction count.
    pub async fn init_nonce(&mut self, provider: &impl QueryProvider) -> anyhow::Result<()> {
        // Using the pending count in case other transactions are in flight for the signer.
        self.nonce = provider.nonce(self.address()).await?;
        tracing::debug!("Initialized nonce of {:?} to {}", self.address(), self.nonce);
        Ok(())
    }

    /// Set the nonce to an arbitrary value.
    pub fn set_nonce(&mut self, nonce: U256) {
        self.nonce = nonce;
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use async_trait::async_trait;
    use ethers::types::{Block, H256};
    use qwallet_provider::message::{FeeData, FeeParams};
    use qwallet_provider::zone::Zone;

    use super::*;
    use crate::key::parse_secret_key;
    use crate::signer::verify_transaction;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    struct NonceProvider(U256);

    #[async_trait]
    impl QueryProvider for NonceProvider {
        async fn balance(&self, _address: Address) -> anyhow::Result<U256> {
            unimplemented!()
        }

        async fn nonce(&self, _address: Address) -> anyhow::Result<U256> {
            Ok(self.0)
        }

        async fn estimate_gas(&self, _request: &TransferRequest) -> anyhow::Result<U256> {
            unimplemented!()
        }

        async fn fee_data(&self, _zone: Zone) -> anyhow::Result<FeeData> {
            unimplemented!()
        }

        async fn latest_block(&self, _zone: Zone) -> anyhow::Result<Block<H256>> {
            unimplemented!()
        }

        async fn protocol_expansion_number(&self) -> anyhow::Result<u64> {
            unimplemented!()
        }
    }

    fn wallet() -> Wallet {
        Wallet::new_secp256k1(parse_secret_key(KEY).unwrap(), 969)
    }

    fn request(from: Address) -> TransferRequest {
        let to = Address::from_str("0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329").unwrap();
        TransferRequest::new(from, to, U256::from(4_200_000u64))
            .with_fee_params(FeeParams::new(1_000_000u64, 30_000_000_000_000u64))
    }

    #[test]
    fn test_transaction_advances_nonce() {
        let mut wallet = wallet();
        let req = request(wallet.address());

        let first = wallet.transaction(req.clone()).unwrap();
        let second = wallet.transaction(req).unwrap();

        assert_eq!(first.tx.nonce(), Some(&U256::zero()));
        assert_eq!(second.tx.nonce(), Some(&U256::one()));
        assert_eq!(wallet.nonce(), U256::from(2));
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_signed_transaction_verifies() {
        let mut wallet = wallet();
        let signed = wallet.transaction(request(wallet.address())).unwrap();

        assert_eq!(verify_transaction(&signed).unwrap(), wallet.address());
        assert_eq!(signed.tx.chain_id().map(|c| c.as_u64()), Some(969));
    }

    #[test]
    fn test_tampered_transaction_fails_verification() {
        let mut wallet = wallet();
        let mut signed = wallet.transaction(request(wallet.address())).unwrap();
        signed.tx.set_value(U256::from(1));

        assert!(verify_transaction(&signed).is_err());
    }

    #[tokio::test]
    async fn test_init_nonce() {
        let mut wallet = wallet();
        wallet.init_nonce(&NonceProvider(U256::from(5))).await.unwrap();
        assert_eq!(wallet.nonce(), U256::from(5));

        let signed = wallet.transaction(request(wallet.address())).unwrap();
        assert_eq!(signed.tx.nonce(), Some(&U256::from(5)));

        wallet.set_nonce(U256::zero());
        assert_eq!(wallet.nonce(), U256::zero());
    }
}
