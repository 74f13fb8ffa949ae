// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Provider setup and configuration for Monad RPC.

use crate::config::Config;
use crate::error::KuruError;
use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    signers::{local::PrivateKeySigner, Signer},
    transports::http::reqwest::Url,
};

/// Configuration for RPC connection.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub rpc_url: String,
    pub private_key: String,
    pub chain_id: u64,
}

impl From<&Config> for RpcConfig {
    fn from(config: &Config) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            private_key: config.private_key.clone(),
            chain_id: config.chain_id,
        }
    }
}

/// Create a provider with signer from config.
///
/// Returns the provider and the address of the signing wallet.
pub fn create_provider(config: &RpcConfig) -> Result<(impl Provider + Clone, Address), KuruError> {
    let mut signer: PrivateKeySigner = config
        .private_key
        .trim()
        .parse()
        .map_err(|e| KuruError::Config(format!("Invalid private key: {e}")))?;
    signer.set_chain_id(Some(config.chain_id));
    let address = signer.address();

    let wallet = EthereumWallet::from(signer);

    let url: Url = config
        .rpc_url
        .parse()
        .map_err(|e| KuruError::Config(format!("Invalid RPC URL: {e}")))?;

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok((provider, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known anvil account #0.
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn wallet_address_is_derived_from_key() {
        let config = RpcConfig {
            rpc_url: "http://localhost:8545".to_string(),
            private_key: KEY.to_string(),
            chain_id: 10143,
        };
        let (_, address) = create_provider(&config).unwrap();
        assert_eq!(
            address,
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse::<Address>().unwrap()
        );
    }

    #[test]
    fn bad_key_is_a_config_error() {
        let config = RpcConfig {
            rpc_url: "http://localhost:8545".to_string(),
            private_key: "nope".to_string(),
            chain_id: 10143,
        };
        assert!(matches!(create_provider(&config), Err(KuruError::Config(_))));
    }
}
