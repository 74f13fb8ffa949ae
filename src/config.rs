// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration module - loads settings from environment variables.

use crate::error::KuruError;
use crate::gas::{GasLimitRange, DEFAULT_GAS_LIMIT_RANGE};
use crate::kuru::quote::{validate_keep_pct, SLIPPAGE_NUMERATOR};
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use std::str::FromStr;

/// Kuru uses the zero address for native MON.
pub const NATIVE_ADDRESS: Address = Address::ZERO;

/// Default market API host (Monad testnet).
pub const DEFAULT_KURU_API_URL: &str = "https://api.testnet.kuru.io";

pub const DEFAULT_EXPLORER_URL: &str = "https://testnet.monadexplorer.com";

/// Fixed amount swapped back by `unwrap_native` (0.01 token, 18 decimals).
pub const DEFAULT_UNWRAP_AMOUNT: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

/// Main configuration for the swap client.
#[derive(Debug, Clone)]
pub struct Config {
    // RPC
    pub rpc_url: String,
    pub chain_id: u64,

    // Wallet
    pub private_key: String,

    // Contracts
    pub router_address: Address,
    pub utils_address: Address,
    pub target_token: Address,
    pub native_address: Address,

    // Market API
    pub api_url: String,
    pub api_timeout_secs: u64,

    // Explorer
    pub explorer_url: String,

    // Gas
    pub max_gas_price_gwei: u64,
    pub gas_limit_range: GasLimitRange,

    // Swap
    pub slippage_keep_pct: u64,
    pub unwrap_amount: U256,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, KuruError> {
        dotenvy::dotenv().ok();

        let slippage_keep_pct = validate_keep_pct(parse_num("SLIPPAGE_KEEP_PCT", SLIPPAGE_NUMERATOR)?)?;

        let gas_limit_range = GasLimitRange::new(
            parse_num("GAS_LIMIT_MIN", DEFAULT_GAS_LIMIT_RANGE.min)?,
            parse_num("GAS_LIMIT_MAX", DEFAULT_GAS_LIMIT_RANGE.max)?,
        )?;

        let unwrap_amount = match std::env::var("UNWRAP_AMOUNT") {
            Ok(s) => parse_ether(&s)
                .map_err(|e| KuruError::Config(format!("Invalid UNWRAP_AMOUNT {}: {}", s, e)))?,
            Err(_) => DEFAULT_UNWRAP_AMOUNT,
        };

        Ok(Self {
            // RPC
            rpc_url: env_var("MONAD_RPC_URL")?,
            chain_id: parse_num("CHAIN_ID", 10143)?,

            // Wallet
            private_key: env_var("PRIVATE_KEY")?,

            // Contracts
            router_address: parse_address(&env_var("KURU_ROUTER_ADDRESS")?)?,
            utils_address: parse_address(&env_var("KURU_UTILS_ADDRESS")?)?,
            target_token: parse_address(&env_var("KURU_TARGET_TOKEN")?)?,
            native_address: parse_address(&env_var_or(
                "KURU_NATIVE_ADDRESS",
                "0x0000000000000000000000000000000000000000",
            ))?,

            // Market API
            api_url: env_var_or("KURU_API_URL", DEFAULT_KURU_API_URL),
            api_timeout_secs: parse_num("KURU_API_TIMEOUT_SECS", 15)?,

            // Explorer
            explorer_url: env_var_or("EXPLORER_URL", DEFAULT_EXPLORER_URL),

            // Gas
            max_gas_price_gwei: parse_num("MAX_GAS_PRICE_GWEI", 200)?,
            gas_limit_range,

            // Swap
            slippage_keep_pct,
            unwrap_amount,
        })
    }

    /// Gas price ceiling in wei.
    pub fn max_gas_price_wei(&self) -> u128 {
        self.max_gas_price_gwei as u128 * 1_000_000_000
    }
}

fn env_var(name: &str) -> Result<String, KuruError> {
    std::env::var(name).map_err(|_| KuruError::Config(format!("{} not set", name)))
}

fn env_var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_num(name: &str, default: u64) -> Result<u64, KuruError> {
    parse_num_value(name, std::env::var(name).ok(), default)
}

/// Unset falls back to `default`; a set but unparsable value is an error.
fn parse_num_value(name: &str, raw: Option<String>, default: u64) -> Result<u64, KuruError> {
    match raw {
        Some(s) => s
            .trim()
            .parse()
            .map_err(|e| KuruError::Config(format!("Invalid {} {}: {}", name, s, e))),
        None => Ok(default),
    }
}

pub(crate) fn parse_address(s: &str) -> Result<Address, KuruError> {
    Address::from_str(s.trim()).map_err(|e| KuruError::Config(format!("Invalid address {}: {}", s, e)))
}
