// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! KuruSwap contract adapter and its chain / market API seams.

pub mod adapter;
pub mod chain;
pub mod contracts;
pub mod market;
pub mod quote;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{KuruSwapContract, SwapDirection, SwapRequest, TokenDecimals, DEFAULT_DECIMALS};
pub use chain::{AlloyChain, AnyToAnySwap, KuruChain, TxReceipt};
pub use market::{KuruMarketApi, MarketDiscovery};
pub use quote::PriceQuote;
