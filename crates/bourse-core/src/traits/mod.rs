//! Core traits for the trading venue.

mod buy_rule;

pub use buy_rule::BuyRule;
