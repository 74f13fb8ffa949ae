// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error type shared by the Kuru adapter and the swap service.

use alloy::primitives::{Address, U256};

#[derive(Debug, thiserror::Error)]
pub enum KuruError {
    #[error("Kuru API request failed: {0}")]
    Network(String),

    #[error("No pool found for the token pair {base} / {quote}")]
    PoolNotFound { base: Address, quote: Address },

    #[error("Contract call failed: {0}")]
    ContractCall(String),

    #[error("Token approval failed: {0}")]
    Approval(String),

    #[error("Gas price too high: {current} wei (max {max} wei)")]
    GasPriceTooHigh { current: u128, max: u128 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(U256),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for KuruError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, KuruError>;
