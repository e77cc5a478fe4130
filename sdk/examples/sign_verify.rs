// Copyright 2024 qwallet Contributors
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use ethers::types::{Address, U256};

use qwallet_provider::{
    message::{FeeParams, TransferRequest},
    zone::Zone,
};
use qwallet_signer::{verify_transaction, HdWallet, Signer};

const PHRASE: &str = "stumble steel jeans emotion remind current remind viable what hood ladder lunch slush stable rough crew merge lyrics cabin bid between enough fault virtual";

fn main() -> anyhow::Result<()> {
    let mut hd = HdWallet::from_phrase(PHRASE)?;
    let info = hd.next_address(0, Zone::Cyprus1)?;
    println!("Signer address (from): {:?}", info.address);

    let mut signer = hd.wallet(&info.address, 969)?;
    let to = Address::from_str("0x002F4783248e2D6FF1aa6482A8C0D7a76de3C329")?;
    let request = TransferRequest::new(signer.address(), to, U256::from(4_200_000u64))
        .with_fee_params(FeeParams::new(1_000_000u64, 30_000_000_000_000u64));

    let signed = signer.transaction(request)?;
    println!("Signed tx: {}", signed.raw);

    match verify_transaction(&signed) {
        Ok(_) => println!("Signature is valid"),
        Err(e) => println!("Signature is invalid: {}", e),
    }

    Ok(())
}
