// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Expected output and slippage math.

use crate::error::{KuruError, Result};
use alloy::primitives::{ruint::UintTryFrom, Address, U256, U512};

/// Share of the expected output kept as `minAmountOut` (85 / 100 = 15% slippage).
pub const SLIPPAGE_NUMERATOR: u64 = 85;
pub const SLIPPAGE_DENOMINATOR: u64 = 100;

/// KuruUtils prices are fixed-point with 18 decimals.
pub const PRICE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Price of a route and the amounts derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub pool: Address,
    pub price_per_unit: U256,
    pub amount_in: U256,
    pub expected_out: U256,
    pub min_amount_out: U256,
}

impl PriceQuote {
    pub fn new(pool: Address, amount_in: U256, price_per_unit: U256, keep_pct: u64) -> Result<Self> {
        let expected_out = expected_out(amount_in, price_per_unit)?;
        let min_amount_out = apply_slippage(expected_out, keep_pct)?;

        Ok(Self {
            pool,
            price_per_unit,
            amount_in,
            expected_out,
            min_amount_out,
        })
    }
}

/// `amount_in * price / 1e18`, truncating. The product is computed at full width.
pub fn expected_out(amount_in: U256, price_per_unit: U256) -> Result<U256> {
    let wide: U512 = amount_in.widening_mul(price_per_unit);
    U256::uint_try_from(wide / U512::from(PRICE_SCALE))
        .ok()
        .ok_or_else(|| {
            KuruError::ContractCall(format!(
                "Quote overflow: {} * {}",
                amount_in, price_per_unit
            ))
        })
}

/// `expected * keep_pct / 100`, truncating.
pub fn apply_slippage(expected: U256, keep_pct: u64) -> Result<U256> {
    let wide: U512 = expected.widening_mul(U256::from(keep_pct));
    U256::uint_try_from(wide / U512::from(SLIPPAGE_DENOMINATOR))
        .ok()
        .ok_or_else(|| KuruError::ContractCall(format!("Slippage overflow: {}", expected)))
}

/// Rejects a kept share outside `1..=100`.
pub fn validate_keep_pct(keep_pct: u64) -> Result<u64> {
    if keep_pct == 0 || keep_pct > SLIPPAGE_DENOMINATOR {
        return Err(KuruError::Config(format!(
            "Slippage keep percentage must be within 1..=100, got {}",
            keep_pct
        )));
    }
    Ok(keep_pct)
}
