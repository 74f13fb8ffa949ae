// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Kuru market discovery API.

use crate::error::{KuruError, Result};
use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

const FILTERED_MARKETS_PATH: &str = "/api/v1/markets/filtered";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/133.0.0.0 Safari/537.36";

#[derive(Debug, Serialize)]
struct FilteredMarketsRequest {
    pairs: Vec<PairFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PairFilter {
    base_token: String,
    quote_token: String,
}

#[derive(Debug, Deserialize)]
struct FilteredMarketsResponse {
    #[serde(default)]
    data: Option<Vec<MarketEntry>>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    market: String,
}

/// Lookup of markets listed for an ordered (base, quote) pair.
#[async_trait]
pub trait MarketDiscovery: Send + Sync {
    /// Markets for exactly this orientation of the pair. Empty when none.
    async fn filtered_markets(&self, base: Address, quote: Address) -> Result<Vec<Address>>;
}

/// HTTP client for `POST /api/v1/markets/filtered`.
pub struct KuruMarketApi {
    client: reqwest::Client,
    url: String,
}

impl KuruMarketApi {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| KuruError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}{}", api_url.trim_end_matches('/'), FILTERED_MARKETS_PATH),
        })
    }
}

#[async_trait]
impl MarketDiscovery for KuruMarketApi {
    async fn filtered_markets(&self, base: Address, quote: Address) -> Result<Vec<Address>> {
        let body = FilteredMarketsRequest {
            pairs: vec![PairFilter {
                base_token: base.to_checksum(None),
                quote_token: quote.to_checksum(None),
            }],
        };

        debug!("POST {} base={} quote={}", self.url, base, quote);

        let response: FilteredMarketsResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_markets(response)
    }
}

/// The first entry is the one swaps route through and must parse. Later
/// malformed entries are skipped.
fn parse_markets(response: FilteredMarketsResponse) -> Result<Vec<Address>> {
    let mut entries = response.data.unwrap_or_default().into_iter();

    let Some(first) = entries.next() else {
        return Ok(Vec::new());
    };
    let first = Address::from_str(&first.market)
        .map_err(|e| KuruError::Network(format!("Invalid market address {}: {}", first.market, e)))?;

    let mut markets = vec![first];
    markets.extend(entries.filter_map(|entry| match Address::from_str(&entry.market) {
        Ok(market) => Some(market),
        Err(e) => {
            warn!("Skipping invalid market address {:?}: {}", entry.market, e);
            None
        }
    }));
    Ok(markets)
}
