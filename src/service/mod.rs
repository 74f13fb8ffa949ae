// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Swap service facade.

pub mod explorer;
pub mod swap_service;

pub use swap_service::{KuruSwapService, ServiceSettings, SwapOutcome, SwapStatus};

use crate::config::Config;
use crate::error::Result;
use crate::kuru::{AlloyChain, KuruMarketApi, KuruSwapContract};
use crate::rpc::{create_provider, RpcConfig};
use alloy::providers::Provider;
use tracing::info;

/// Build the service against the configured RPC node and market API.
pub fn connect(config: &Config) -> Result<KuruSwapService<AlloyChain<impl Provider + Clone>, KuruMarketApi>> {
    let (provider, wallet_address) = create_provider(&RpcConfig::from(config))?;
    info!("👛 Wallet: {}", wallet_address);

    let chain = AlloyChain::new(
        provider,
        wallet_address,
        config.router_address,
        config.utils_address,
    );
    let markets = KuruMarketApi::new(&config.api_url, config.api_timeout_secs)?;

    let contract = KuruSwapContract::new(chain, markets, config.native_address)
        .with_gas_limits(config.gas_limit_range)
        .with_slippage_keep_pct(config.slippage_keep_pct)?;

    Ok(KuruSwapService::new(
        contract,
        ServiceSettings {
            target_token: config.target_token,
            unwrap_amount: config.unwrap_amount,
            explorer_url: config.explorer_url.clone(),
            max_gas_price: config.max_gas_price_wei(),
        },
    ))
}
