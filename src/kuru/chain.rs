// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Chain access used by the Kuru adapter.
//!
//! [`KuruChain`] is the seam between the swap logic and the RPC node. The
//! production implementation, [`AlloyChain`], drives the contract bindings
//! through an alloy provider with a signing wallet attached.

use super::contracts::{IKuruRouter, IKuruUtils, IERC20};
use crate::error::{KuruError, Result};
use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use async_trait::async_trait;
use tracing::{debug, info};

/// Receipt fields the swap flow cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: B256,
    /// 1 on success, 0 on revert.
    pub status: u64,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

impl TxReceipt {
    pub fn is_success(&self) -> bool {
        self.status == 1
    }
}

impl From<&TransactionReceipt> for TxReceipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            status: u64::from(receipt.status()),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        }
    }
}

/// Arguments of a single `anyToAnySwap` submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyToAnySwap {
    pub pools: Vec<Address>,
    pub is_buy: Vec<bool>,
    pub native_send: Vec<bool>,
    pub debit_token: Address,
    pub credit_token: Address,
    pub amount_in: U256,
    pub min_amount_out: U256,
    /// Native value attached to the transaction.
    pub value: Option<U256>,
    pub gas_limit: u64,
}

#[async_trait]
pub trait KuruChain: Send + Sync {
    /// Address of the signing wallet.
    fn wallet_address(&self) -> Address;

    /// Address of the Kuru router (approval spender).
    fn router_address(&self) -> Address;

    async fn gas_price(&self) -> Result<u128>;

    async fn token_decimals(&self, token: Address) -> Result<u8>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Send `approve(spender, amount)` and wait for inclusion.
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt>;

    async fn calculate_price_over_route(&self, pools: Vec<Address>, is_buy: Vec<bool>) -> Result<U256>;

    /// Send the swap and wait for inclusion.
    async fn any_to_any_swap(&self, swap: AnyToAnySwap) -> Result<TxReceipt>;
}

/// [`KuruChain`] backed by an alloy provider.
pub struct AlloyChain<P: Provider + Clone> {
    provider: P,
    wallet_address: Address,
    router: Address,
    utils: Address,
}

impl<P: Provider + Clone> AlloyChain<P> {
    pub fn new(provider: P, wallet_address: Address, router: Address, utils: Address) -> Self {
        Self {
            provider,
            wallet_address,
            router,
            utils,
        }
    }
}

#[async_trait]
impl<P: Provider + Clone> KuruChain for AlloyChain<P> {
    fn wallet_address(&self) -> Address {
        self.wallet_address
    }

    fn router_address(&self) -> Address {
        self.router
    }

    async fn gas_price(&self) -> Result<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| KuruError::ContractCall(format!("Failed to get gas price: {}", e)))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        IERC20::new(token, &self.provider)
            .decimals()
            .call()
            .await
            .map_err(|e| KuruError::ContractCall(format!("decimals() failed for {}: {}", token, e)))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        IERC20::new(token, &self.provider)
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| KuruError::Approval(format!("allowance() failed for {}: {}", token, e)))
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt> {
        let pending = IERC20::new(token, &self.provider)
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| KuruError::Approval(format!("Failed to send approve tx: {}", e)))?;

        info!("📤 Approve TX sent: {:?}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| KuruError::Approval(format!("Failed to get approve receipt: {}", e)))?;

        Ok(TxReceipt::from(&receipt))
    }

    async fn calculate_price_over_route(&self, pools: Vec<Address>, is_buy: Vec<bool>) -> Result<U256> {
        IKuruUtils::new(self.utils, &self.provider)
            .calculatePriceOverRoute(pools, is_buy)
            .call()
            .await
            .map_err(|e| KuruError::ContractCall(format!("calculatePriceOverRoute failed: {}", e)))
    }

    async fn any_to_any_swap(&self, swap: AnyToAnySwap) -> Result<TxReceipt> {
        let router = IKuruRouter::new(self.router, &self.provider);

        let mut call = router
            .anyToAnySwap(
                swap.pools,
                swap.is_buy,
                swap.native_send,
                swap.debit_token,
                swap.credit_token,
                swap.amount_in,
                swap.min_amount_out,
            )
            .gas(swap.gas_limit);

        if let Some(value) = swap.value {
            call = call.value(value);
        }

        let pending = call
            .send()
            .await
            .map_err(|e| KuruError::ContractCall(format!("Failed to send swap tx: {}", e)))?;

        info!("📤 Swap TX sent: {:?}", pending.tx_hash());

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| KuruError::ContractCall(format!("Failed to get swap receipt: {}", e)))?;

        debug!(
            "Swap included in block {:?}, gas used {}",
            receipt.block_number, receipt.gas_used
        );

        Ok(TxReceipt::from(&receipt))
    }
}
