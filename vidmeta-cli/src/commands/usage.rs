//! Usage command handler

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;

/// Show remaining free credits and total generations
pub async fn show_usage(config: &Config) -> Result<()> {
    let client = config.client();
    let token = config.token_provider().token().await;

    let usage = client
        .usage_stats(token.as_deref())
        .await
        .context("Failed to fetch usage")?;

    println!("{}", "Usage:".bold());
    let credits = usage.free_credits_remaining.to_string();
    println!(
        "  Free credits remaining: {}",
        if usage.is_exhausted() {
            credits.red()
        } else {
            credits.green()
        }
    );
    println!("  Total generations:      {}", usage.total_generations);

    Ok(())
}
