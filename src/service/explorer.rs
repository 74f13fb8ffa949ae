// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Block explorer links.

use tracing::info;

/// `{base}/tx/{tx_hash}`.
pub fn tx_url(base: &str, tx_hash: &str) -> String {
    format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash)
}

/// Log the explorer link for a transaction and return it.
pub fn log_transaction(base: &str, tx_hash: &str) -> String {
    let url = tx_url(base, tx_hash);
    info!("🔗 Transaction: {}", url);
    url
}
