//! Core types and traits for the trading venue.
//!
//! This crate provides the building blocks shared by the exchange and its
//! participants:
//! - Bounded price history used for trend detection
//! - Settlement receipts
//! - The buy rule trait that members consult on every price notification
//! - Error types

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ExchangeError, ExchangeResult, StrategyError};
pub use traits::*;
pub use types::*;
