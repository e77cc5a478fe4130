// Copyright 2022-2024 Protocol Labs
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context;
use ethers::core::k256::ecdsa::SigningKey;

/// Parse a hex-encoded secp256k1 private key, with or without `0x` prefix.
pub fn parse_secret_key(hex_str: &str) -> anyhow::Result<SigningKey> {
    let mut hex_str = hex_str.trim();
    if hex_str.starts_with("0x") {
        hex_str = &hex_str[2..];
    }
    let raw_secret = hex::decode(hex_str).context("cannot decode hex private key")?;
    let sk = SigningKey::from_slice(&raw_secret).context("failed to parse secret key")?;
    Ok(sk)
}

/// Hex-encode a private key with `0x` prefix.
pub fn encode_secret_key(sk: &SigningKey) -> String {
    format!("0x{}", hex::encode(sk.to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_parse_secret_key() {
        let sk = parse_secret_key(KEY).unwrap();
        assert_eq!(encode_secret_key(&sk), KEY);

        let unprefixed = parse_secret_key(&format!("  {}\n", &KEY[2..])).unwrap();
        assert_eq!(unprefixed.to_bytes(), sk.to_bytes());
    }

    #[test]
    fn test_parse_invalid_secret_key() {
        assert!(parse_secret_key("0xzz").is_err());
        assert!(parse_secret_key("0x1234").is_err());
        assert!(parse_secret_key(&format!("0x{}", "00".repeat(32))).is_err());
    }
}
