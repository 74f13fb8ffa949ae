// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! KuruSwap contract adapter: pool lookup, pricing, approval and swap submission.

use super::chain::{AnyToAnySwap, KuruChain, TxReceipt};
use super::market::MarketDiscovery;
use super::quote::{validate_keep_pct, PriceQuote, SLIPPAGE_NUMERATOR};
use crate::error::{KuruError, Result};
use crate::gas::{GasLimitRange, GasLimitSource, UniformGasLimit, DEFAULT_GAS_LIMIT_RANGE};
use alloy::primitives::{Address, U256};
use tracing::{debug, error, info, warn};

/// Decimals assumed for native MON and for tokens whose lookup failed.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Result of a decimals lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDecimals {
    pub decimals: u8,
    /// Set when the lookup failed and [`DEFAULT_DECIMALS`] was substituted.
    pub assumed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    NativeToToken,
    TokenToNative,
}

impl SwapDirection {
    /// `isBuy` flag for `calculatePriceOverRoute`.
    fn price_is_buy(self) -> bool {
        matches!(self, Self::TokenToNative)
    }

    /// `isBuy` and `nativeSend` flags for `anyToAnySwap`.
    fn route_flag(self) -> bool {
        matches!(self, Self::NativeToToken)
    }
}

/// One single-pool swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub source_token: Address,
    pub target_token: Address,
    pub amount_in: U256,
    pub direction: SwapDirection,
}

impl SwapRequest {
    pub fn native_to_token(native: Address, token: Address, amount_in: U256) -> Self {
        Self {
            source_token: native,
            target_token: token,
            amount_in,
            direction: SwapDirection::NativeToToken,
        }
    }

    pub fn token_to_native(token: Address, native: Address, amount_in: U256) -> Self {
        Self {
            source_token: token,
            target_token: native,
            amount_in,
            direction: SwapDirection::TokenToNative,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.amount_in.is_zero() {
            return Err(KuruError::InvalidAmount(self.amount_in));
        }
        Ok(())
    }
}

/// Wraps the Kuru router and KuruUtils contracts.
pub struct KuruSwapContract<C: KuruChain, M: MarketDiscovery> {
    chain: C,
    markets: M,
    native: Address,
    gas_limits: GasLimitRange,
    gas_source: Box<dyn GasLimitSource>,
    slippage_keep_pct: u64,
}

impl<C: KuruChain, M: MarketDiscovery> KuruSwapContract<C, M> {
    pub fn new(chain: C, markets: M, native: Address) -> Self {
        Self {
            chain,
            markets,
            native,
            gas_limits: DEFAULT_GAS_LIMIT_RANGE,
            gas_source: Box::new(UniformGasLimit),
            slippage_keep_pct: SLIPPAGE_NUMERATOR,
        }
    }

    pub fn with_gas_limits(mut self, range: GasLimitRange) -> Self {
        self.gas_limits = range;
        self
    }

    pub fn with_gas_source(mut self, source: impl GasLimitSource + 'static) -> Self {
        self.gas_source = Box::new(source);
        self
    }

    /// Share of the expected output kept as `minAmountOut`, in `1..=100`.
    pub fn with_slippage_keep_pct(mut self, keep_pct: u64) -> Result<Self> {
        self.slippage_keep_pct = validate_keep_pct(keep_pct)?;
        Ok(self)
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    pub fn native_address(&self) -> Address {
        self.native
    }

    /// Token decimals, falling back to 18 (flagged as assumed) on any failure.
    pub async fn get_token_decimals(&self, token: Address) -> TokenDecimals {
        if token == self.native {
            return TokenDecimals {
                decimals: DEFAULT_DECIMALS,
                assumed: false,
            };
        }

        match self.chain.token_decimals(token).await {
            Ok(decimals) => TokenDecimals {
                decimals,
                assumed: false,
            },
            Err(e) => {
                error!("Error getting token decimals for {}: {}", token, e);
                warn!("Assuming {} decimals for {}", DEFAULT_DECIMALS, token);
                TokenDecimals {
                    decimals: DEFAULT_DECIMALS,
                    assumed: true,
                }
            }
        }
    }

    /// Approve the router for `U256::MAX` when the allowance is below `amount`.
    pub async fn approve_token_if_needed(&self, token: Address, amount: U256) -> Result<()> {
        self.approve_inner(token, amount).await.map_err(|e| {
            error!("Error approving token: {}", e);
            e
        })
    }

    async fn approve_inner(&self, token: Address, amount: U256) -> Result<()> {
        let router = self.chain.router_address();
        let allowance = self
            .chain
            .allowance(token, self.chain.wallet_address(), router)
            .await?;

        if allowance >= amount {
            debug!("Allowance {} covers {} for {}", allowance, amount, token);
            return Ok(());
        }

        info!("Approving token {} for KuruSwap", token);
        let receipt = self.chain.approve(token, router, U256::MAX).await?;
        if !receipt.is_success() {
            return Err(KuruError::Approval(format!(
                "approve tx {:?} reverted",
                receipt.transaction_hash
            )));
        }
        info!("Token approved for KuruSwap");

        Ok(())
    }

    /// Market for the pair, trying `(source, target)` then `(target, source)`.
    pub async fn find_pool(&self, source: Address, target: Address) -> Result<Address> {
        self.find_pool_inner(source, target).await.map_err(|e| {
            error!("Error finding pool: {}", e);
            e
        })
    }

    async fn find_pool_inner(&self, source: Address, target: Address) -> Result<Address> {
        if let Some(pool) = self.markets.filtered_markets(source, target).await?.first() {
            return Ok(*pool);
        }

        debug!("No market for {} / {}, trying inverted pair", source, target);

        if let Some(pool) = self.markets.filtered_markets(target, source).await?.first() {
            return Ok(*pool);
        }

        Err(KuruError::PoolNotFound {
            base: source,
            quote: target,
        })
    }

    /// Resolve the pool and price the request without sending anything.
    pub async fn quote(&self, request: &SwapRequest) -> Result<PriceQuote> {
        request.validate()?;

        let pool = self
            .find_pool(request.source_token, request.target_token)
            .await?;
        info!("Using pool: {}", pool);

        let price = self
            .chain
            .calculate_price_over_route(vec![pool], vec![request.direction.price_is_buy()])
            .await?;

        let quote = PriceQuote::new(pool, request.amount_in, price, self.slippage_keep_pct)?;
        debug!(
            "Price {} -> expected {}, min {}",
            quote.price_per_unit, quote.expected_out, quote.min_amount_out
        );
        info!("Expected output: {}", quote.min_amount_out);

        Ok(quote)
    }

    pub async fn swap_exact_native_for_tokens(
        &self,
        token: Address,
        amount_in: U256,
        receiver: Address,
    ) -> Result<TxReceipt> {
        info!("Preparing MON to token swap on KuruSwap");
        let request = SwapRequest::native_to_token(self.native, token, amount_in);

        self.execute(&request, receiver).await.map_err(|e| {
            error!("KuruSwap MON to token error: {}", e);
            e
        })
    }

    pub async fn swap_exact_tokens_for_native(
        &self,
        token: Address,
        amount_in: U256,
        receiver: Address,
    ) -> Result<TxReceipt> {
        info!("Preparing token to MON swap on KuruSwap");
        let request = SwapRequest::token_to_native(token, self.native, amount_in);

        self.execute(&request, receiver).await.map_err(|e| {
            error!("KuruSwap token to MON error: {}", e);
            e
        })
    }

    async fn execute(&self, request: &SwapRequest, receiver: Address) -> Result<TxReceipt> {
        request.validate()?;
        // The router credits msg.sender; receiver is informational.
        debug!("Swap receiver: {}", receiver);

        if request.direction == SwapDirection::TokenToNative {
            self.approve_token_if_needed(request.source_token, request.amount_in)
                .await?;
        }

        let quote = self.quote(request).await?;
        let flag = request.direction.route_flag();
        let gas_limit = self.gas_source.gas_limit(self.gas_limits);

        let swap = AnyToAnySwap {
            pools: vec![quote.pool],
            is_buy: vec![flag],
            native_send: vec![flag],
            debit_token: request.source_token,
            credit_token: request.target_token,
            amount_in: request.amount_in,
            min_amount_out: quote.min_amount_out,
            value: match request.direction {
                SwapDirection::NativeToToken => Some(request.amount_in),
                SwapDirection::TokenToNative => None,
            },
            gas_limit,
        };
        debug!("anyToAnySwap with gas limit {}", gas_limit);

        self.chain.any_to_any_swap(swap).await
    }
}
