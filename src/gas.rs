// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gas limit selection and gas price pre-flight check.

use crate::error::{KuruError, Result};
use crate::kuru::KuruChain;
use rand::Rng;
use tracing::{debug, warn};

/// Inclusive gas limit range for `anyToAnySwap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasLimitRange {
    pub min: u64,
    pub max: u64,
}

pub const DEFAULT_GAS_LIMIT_RANGE: GasLimitRange = GasLimitRange {
    min: 180_000,
    max: 280_000,
};

impl GasLimitRange {
    pub fn new(min: u64, max: u64) -> Result<Self> {
        if min > max {
            return Err(KuruError::Config(format!(
                "Gas limit range is empty: {} > {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Uniform draw from `[min, max]`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u64 {
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, gas_limit: u64) -> bool {
        (self.min..=self.max).contains(&gas_limit)
    }
}

impl Default for GasLimitRange {
    fn default() -> Self {
        DEFAULT_GAS_LIMIT_RANGE
    }
}

/// Picks the gas limit attached to each swap.
pub trait GasLimitSource: Send + Sync {
    fn gas_limit(&self, range: GasLimitRange) -> u64;
}

/// Thread-local RNG, uniform over the range.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformGasLimit;

impl GasLimitSource for UniformGasLimit {
    fn gas_limit(&self, range: GasLimitRange) -> u64 {
        range.sample(&mut rand::rng())
    }
}

/// Rejects swaps while the network gas price is above a ceiling.
#[derive(Debug, Clone, Copy)]
pub struct GasPriceGuard {
    max_gas_price: u128,
}

impl GasPriceGuard {
    pub fn new(max_gas_price: u128) -> Self {
        Self { max_gas_price }
    }

    /// Returns the current gas price when acceptable.
    pub async fn check<C: KuruChain + ?Sized>(&self, chain: &C) -> Result<u128> {
        let current = chain.gas_price().await?;

        if current > self.max_gas_price {
            warn!(
                "⛽ Gas price {} wei above limit {} wei",
                current, self.max_gas_price
            );
            return Err(KuruError::GasPriceTooHigh {
                current,
                max: self.max_gas_price,
            });
        }

        debug!("Gas price OK: {} wei", current);
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kuru::testing::FakeChain;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_within_inclusive_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let gas = DEFAULT_GAS_LIMIT_RANGE.sample(&mut rng);
            assert!((180_000..=280_000).contains(&gas), "{}", gas);
        }
    }

    #[test]
    fn degenerate_range_always_returns_its_value() {
        let range = GasLimitRange::new(200_000, 200_000).unwrap();
        assert_eq!(UniformGasLimit.gas_limit(range), 200_000);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            GasLimitRange::new(280_000, 180_000),
            Err(KuruError::Config(_))
        ));
    }

    #[tokio::test]
    async fn guard_passes_price_at_limit() {
        let chain = FakeChain::default().with_gas_price(100);
        assert_eq!(GasPriceGuard::new(100).check(&chain).await.unwrap(), 100);
    }

    #[tokio::test]
    async fn guard_rejects_price_above_limit() {
        let chain = FakeChain::default().with_gas_price(101);
        let err = GasPriceGuard::new(100).check(&chain).await.unwrap_err();
        assert!(matches!(
            err,
            KuruError::GasPriceTooHigh { current: 101, max: 100 }
        ));
    }
}
