//! Simulate command implementation.

use anyhow::{Context, Result};
use bourse_config::{load_or_default, AppConfig};
use bourse_core::types::Settlement;
use bourse_exchange::{Company, Exchange, Member};
use bourse_strategies::StrategyRegistry;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::SimulateArgs;

/// Final state after replaying a price sequence.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub company: String,
    pub rule: String,
    pub prices_applied: usize,
    pub final_price: Decimal,
    pub history: Vec<Decimal>,
    pub shares_remaining: u64,
    pub balance_remaining: Decimal,
    pub settlements: Vec<Settlement>,
    pub rejections: Vec<String>,
}

impl SimulationReport {
    /// Human-readable summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Company:          {}\n", self.company));
        out.push_str(&format!("Rule:             {}\n", self.rule));
        out.push_str(&format!("Prices applied:   {}\n", self.prices_applied));
        out.push_str(&format!("Final price:      {}\n", self.final_price));
        out.push_str(&format!("History:          {:?}\n", self.history));
        out.push_str(&format!("Shares remaining: {}\n", self.shares_remaining));
        out.push_str(&format!("Balance:          {}\n", self.balance_remaining));
        out.push_str(&format!("Settlements:      {}\n", self.settlements.len()));
        for settlement in &self.settlements {
            out.push_str(&format!("  {}\n", settlement));
        }
        for rejection in &self.rejections {
            out.push_str(&format!("  rejected: {}\n", rejection));
        }
        out
    }
}

pub fn run(args: SimulateArgs, config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path).context("Failed to load configuration")?;
    let output = args.output.clone();
    let report = simulate(args, &config)?;

    match output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", report.summary()),
    }

    Ok(())
}

fn simulate(args: SimulateArgs, config: &AppConfig) -> Result<SimulationReport> {
    let rule_key = args.rule.unwrap_or_else(|| config.strategy.rule.clone());
    let rule = StrategyRegistry::new()
        .create(&rule_key)
        .context("Failed to create buy rule")?;
    let rule_name = rule.name().to_string();

    let exchange = Arc::new(Exchange::new());
    let company = Company::new(
        &exchange,
        args.company,
        args.shares.unwrap_or(config.listing.default_shares),
        args.price.unwrap_or(config.listing.default_price),
    )
    .context("Failed to list company")?;
    let member = Member::with_rule(
        &exchange,
        args.balance.unwrap_or(config.member.default_balance),
        &[company.clone()],
        args.order_size.unwrap_or(config.member.default_order_size),
        rule,
    )
    .context("Failed to create member")?;

    info!(
        company = company.identifier(),
        prices = args.prices.len(),
        rule = %rule_name,
        "Starting simulation"
    );

    let mut rejections = Vec::new();
    let mut applied = 0;
    for price in &args.prices {
        match company.update_price(*price) {
            Ok(()) => {}
            Err(e) if e.is_settlement_rejection() && args.continue_on_reject => {
                warn!(price = %price, error = %e, "Continuing after rejected settlement");
                rejections.push(e.to_string());
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("Price update to {} failed", price)));
            }
        }
        applied += 1;
    }

    Ok(SimulationReport {
        company: company.identifier().to_string(),
        rule: rule_name,
        prices_applied: applied,
        final_price: company.current_price(),
        history: company.history().as_slice().to_vec(),
        shares_remaining: company.outstanding_shares(),
        balance_remaining: member.cash_balance(),
        settlements: member.settlements(),
        rejections,
    })
}
