// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

//! KuruSwap CLI - swap MON and tokens on Kuru from the command line.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, U256};
use anyhow::Context;
use clap::{Parser, Subcommand};
use kuru_swap::kuru::SwapRequest;
use kuru_swap::{connect, Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kuru-swap", version, about = "Swap MON and tokens on KuruSwap")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Swap MON for the configured target token
    Wrap {
        #[arg(value_parser = parse_amount)]
        amount: U256,
    },
    /// Swap the fixed unwrap amount of the target token back to MON
    Unwrap {
        #[arg(value_parser = parse_amount)]
        amount: Option<U256>,
    },
    /// Swap MON for a token
    Buy {
        token: Address,
        #[arg(value_parser = parse_amount)]
        amount: U256,
    },
    /// Swap a token for MON
    Sell {
        token: Address,
        #[arg(value_parser = parse_amount)]
        amount: U256,
    },
    /// Look up the Kuru market for a pair
    Pool { base: Address, quote: Address },
    /// Price a swap without sending it
    Quote {
        token: Address,
        #[arg(value_parser = parse_amount)]
        amount: U256,
        /// Price token -> MON instead of MON -> token
        #[arg(long)]
        sell: bool,
    },
    /// Show a token's decimals
    Decimals { token: Address },
}

fn parse_amount(s: &str) -> Result<U256, String> {
    let amount = parse_ether(s).map_err(|e| format!("Invalid amount {}: {}", s, e))?;
    if amount.is_zero() {
        return Err("Amount must be greater than zero".to_string());
    }
    Ok(amount)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().map_err(|e| {
        error!("Failed to load config: {}", e);
        e
    })?;

    info!("📡 RPC: {}", config.rpc_url);
    let service = connect(&config).context("Failed to connect to Monad RPC")?;

    let output = match cli.command {
        Command::Wrap { amount } => serde_json::to_value(service.wrap_native(amount).await?)?,
        Command::Unwrap { amount } => {
            let amount = amount.unwrap_or(config.unwrap_amount);
            serde_json::to_value(service.unwrap_native(amount).await?)?
        }
        Command::Buy { token, amount } => {
            serde_json::to_value(service.swap_exact_native_for_tokens(token, amount).await?)?
        }
        Command::Sell { token, amount } => {
            serde_json::to_value(service.swap_exact_tokens_for_native(token, amount).await?)?
        }
        Command::Pool { base, quote } => {
            let pool = service.contract().find_pool(base, quote).await?;
            serde_json::json!({ "pool": pool.to_checksum(None) })
        }
        Command::Quote { token, amount, sell } => {
            let native = service.contract().native_address();
            let request = if sell {
                SwapRequest::token_to_native(token, native, amount)
            } else {
                SwapRequest::native_to_token(native, token, amount)
            };
            let quote = service.contract().quote(&request).await?;
            serde_json::json!({
                "pool": quote.pool.to_checksum(None),
                "pricePerUnit": quote.price_per_unit.to_string(),
                "amountIn": quote.amount_in.to_string(),
                "expectedOut": quote.expected_out.to_string(),
                "minAmountOut": quote.min_amount_out.to_string(),
            })
        }
        Command::Decimals { token } => {
            let decimals = service.contract().get_token_decimals(token).await;
            serde_json::json!({ "decimals": decimals.decimals, "assumed": decimals.assumed })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
