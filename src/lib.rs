// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! KuruSwap client for Monad.

pub mod config;
pub mod error;
pub mod gas;
pub mod kuru;
pub mod rpc;
pub mod service;

pub use config::Config;
pub use error::KuruError;
pub use service::{connect, KuruSwapService, SwapOutcome, SwapStatus};
