// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! KuruSwap service: gas pre-flight, swap delegation and result normalization.

use super::explorer;
use crate::error::Result;
use crate::gas::GasPriceGuard;
use crate::kuru::{KuruChain, KuruSwapContract, MarketDiscovery, TxReceipt};
use alloy::primitives::utils::format_ether;
use alloy::primitives::{Address, U256};
use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwapStatus {
    Success,
    Failed,
}

/// Normalized swap result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOutcome {
    pub status: SwapStatus,
    pub tx_hash: String,
    pub url: String,
}

impl SwapOutcome {
    pub fn from_receipt(receipt: &TxReceipt, explorer_url: &str) -> Self {
        let tx_hash = format!("{:?}", receipt.transaction_hash);
        let status = if receipt.is_success() {
            SwapStatus::Success
        } else {
            SwapStatus::Failed
        };

        Self {
            status,
            url: explorer::log_transaction(explorer_url, &tx_hash),
            tx_hash,
        }
    }
}

/// Settings the service needs beyond the contract adapter.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Token bought by `wrap_native` and sold by `unwrap_native`.
    pub target_token: Address,
    pub unwrap_amount: U256,
    pub explorer_url: String,
    pub max_gas_price: u128,
}

pub struct KuruSwapService<C: KuruChain, M: MarketDiscovery> {
    contract: KuruSwapContract<C, M>,
    gas_guard: GasPriceGuard,
    settings: ServiceSettings,
}

impl<C: KuruChain, M: MarketDiscovery> KuruSwapService<C, M> {
    pub fn new(contract: KuruSwapContract<C, M>, settings: ServiceSettings) -> Self {
        Self {
            contract,
            gas_guard: GasPriceGuard::new(settings.max_gas_price),
            settings,
        }
    }

    pub fn contract(&self) -> &KuruSwapContract<C, M> {
        &self.contract
    }

    fn wallet(&self) -> Address {
        self.contract.chain().wallet_address()
    }

    /// Swap native MON for the configured target token.
    pub async fn wrap_native(&self, amount: U256) -> Result<SwapOutcome> {
        let result: Result<TxReceipt> = async {
            self.gas_guard.check(self.contract.chain()).await?;
            info!(
                "Swapping {} MON to {} via KuruSwap",
                format_ether(amount),
                self.settings.target_token
            );
            self.contract
                .swap_exact_native_for_tokens(self.settings.target_token, amount, self.wallet())
                .await
        }
        .await;

        self.normalize(result, "Error swapping MON to target token")
    }

    /// Swap the configured target token back to MON.
    ///
    /// Always sells the fixed `unwrap_amount`; `amount` is not used.
    pub async fn unwrap_native(&self, amount: U256) -> Result<SwapOutcome> {
        let result: Result<TxReceipt> = async {
            self.gas_guard.check(self.contract.chain()).await?;
            let fixed = self.settings.unwrap_amount;
            if amount != fixed {
                warn!(
                    "Requested {} but unwrap sells the fixed {}",
                    format_ether(amount),
                    format_ether(fixed)
                );
            }
            info!("Swapping {} to MON via KuruSwap", self.settings.target_token);
            self.contract
                .swap_exact_tokens_for_native(self.settings.target_token, fixed, self.wallet())
                .await
        }
        .await;

        self.normalize(result, "Error swapping target token to MON")
    }

    pub async fn swap_exact_native_for_tokens(&self, token: Address, amount: U256) -> Result<SwapOutcome> {
        let result: Result<TxReceipt> = async {
            self.gas_guard.check(self.contract.chain()).await?;
            info!("Swapping {} MON for tokens via KuruSwap", format_ether(amount));
            self.contract
                .swap_exact_native_for_tokens(token, amount, self.wallet())
                .await
        }
        .await;

        self.normalize(result, "Error in MON to Token swap")
    }

    pub async fn swap_exact_tokens_for_native(&self, token: Address, amount: U256) -> Result<SwapOutcome> {
        let result: Result<TxReceipt> = async {
            self.gas_guard.check(self.contract.chain()).await?;
            info!("Swapping tokens for MON via KuruSwap");
            self.contract
                .swap_exact_tokens_for_native(token, amount, self.wallet())
                .await
        }
        .await;

        self.normalize(result, "Error in Token to MON swap")
    }

    fn normalize(&self, result: Result<TxReceipt>, context: &str) -> Result<SwapOutcome> {
        match result {
            Ok(receipt) => Ok(SwapOutcome::from_receipt(&receipt, &self.settings.explorer_url)),
            Err(e) => {
                error!("{}: {}", context, e);
                Err(e)
            }
        }
    }
}
