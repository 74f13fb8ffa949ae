// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory chain and market API used by unit tests.

use super::chain::{AnyToAnySwap, KuruChain, TxReceipt};
use super::market::MarketDiscovery;
use crate::error::{KuruError, Result};
use crate::gas::{GasLimitRange, GasLimitSource};
use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub const WALLET: Address = Address::repeat_byte(0x0a);
pub const ROUTER: Address = Address::repeat_byte(0x0b);
pub const SWAP_TX: B256 = B256::repeat_byte(0xab);
pub const APPROVE_TX: B256 = B256::repeat_byte(0xcd);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainCall {
    GasPrice,
    Decimals(Address),
    Allowance {
        token: Address,
        owner: Address,
        spender: Address,
    },
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    Price {
        pools: Vec<Address>,
        is_buy: Vec<bool>,
    },
    Swap(AnyToAnySwap),
}

pub struct FakeChain {
    gas_price: u128,
    decimals: HashMap<Address, u8>,
    allowance: Option<U256>,
    approve_status: u64,
    price: U256,
    swap_status: u64,
    calls: Mutex<Vec<ChainCall>>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self {
            gas_price: 50_000_000_000,
            decimals: HashMap::new(),
            allowance: Some(U256::MAX),
            approve_status: 1,
            price: U256::from(1_000_000_000_000_000_000u128),
            swap_status: 1,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeChain {
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_decimals(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }

    /// `None` makes the allowance read fail.
    pub fn with_allowance(mut self, allowance: Option<U256>) -> Self {
        self.allowance = allowance;
        self
    }

    pub fn with_approve_status(mut self, status: u64) -> Self {
        self.approve_status = status;
        self
    }

    pub fn with_price(mut self, price: U256) -> Self {
        self.price = price;
        self
    }

    pub fn with_swap_status(mut self, status: u64) -> Self {
        self.swap_status = status;
        self
    }

    pub fn calls(&self) -> Vec<ChainCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn swaps(&self) -> Vec<AnyToAnySwap> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ChainCall::Swap(swap) => Some(swap),
                _ => None,
            })
            .collect()
    }

    pub fn approvals(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ChainCall::Approve { .. }))
            .count()
    }

    fn record(&self, call: ChainCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl KuruChain for FakeChain {
    fn wallet_address(&self) -> Address {
        WALLET
    }

    fn router_address(&self) -> Address {
        ROUTER
    }

    async fn gas_price(&self) -> Result<u128> {
        self.record(ChainCall::GasPrice);
        Ok(self.gas_price)
    }

    async fn token_decimals(&self, token: Address) -> Result<u8> {
        self.record(ChainCall::Decimals(token));
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| KuruError::ContractCall("execution reverted".to_string()))
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        self.record(ChainCall::Allowance {
            token,
            owner,
            spender,
        });
        self.allowance
            .ok_or_else(|| KuruError::Approval("allowance() failed".to_string()))
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt> {
        self.record(ChainCall::Approve {
            token,
            spender,
            amount,
        });
        Ok(TxReceipt {
            transaction_hash: APPROVE_TX,
            status: self.approve_status,
            block_number: Some(1),
            gas_used: 46_000,
        })
    }

    async fn calculate_price_over_route(&self, pools: Vec<Address>, is_buy: Vec<bool>) -> Result<U256> {
        self.record(ChainCall::Price { pools, is_buy });
        Ok(self.price)
    }

    async fn any_to_any_swap(&self, swap: AnyToAnySwap) -> Result<TxReceipt> {
        let gas_used = swap.gas_limit / 2;
        self.record(ChainCall::Swap(swap));
        Ok(TxReceipt {
            transaction_hash: SWAP_TX,
            status: self.swap_status,
            block_number: Some(2),
            gas_used,
        })
    }
}

#[derive(Default)]
pub struct FakeMarkets {
    markets: HashMap<(Address, Address), Vec<Address>>,
    fail: bool,
    queries: Mutex<Vec<(Address, Address)>>,
}

impl FakeMarkets {
    pub fn with_market(mut self, base: Address, quote: Address, market: Address) -> Self {
        self.markets.entry((base, quote)).or_default().push(market);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<(Address, Address)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDiscovery for FakeMarkets {
    async fn filtered_markets(&self, base: Address, quote: Address) -> Result<Vec<Address>> {
        self.queries.lock().unwrap().push((base, quote));
        if self.fail {
            return Err(KuruError::Network("connection refused".to_string()));
        }
        Ok(self.markets.get(&(base, quote)).cloned().unwrap_or_default())
    }
}

/// Always returns the same gas limit.
pub struct FixedGasLimit(pub u64);

impl GasLimitSource for FixedGasLimit {
    fn gas_limit(&self, _range: GasLimitRange) -> u64 {
        self.0
    }
}
