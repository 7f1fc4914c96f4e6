//! Error types for the trading venue.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the exchange, companies and members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown entity: no route for '{0}'")]
    UnknownEntity(String),

    #[error("Insufficient inventory for '{company}': requested {requested}, outstanding {outstanding}")]
    InsufficientInventory {
        company: String,
        requested: u64,
        outstanding: u64,
    },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
}

impl ExchangeError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        ExchangeError::InvalidArgument(reason.into())
    }

    /// Whether a settlement was refused for lack of shares or cash.
    ///
    /// Both leave the company and member untouched.
    pub fn is_settlement_rejection(&self) -> bool {
        matches!(
            self,
            ExchangeError::InsufficientInventory { .. } | ExchangeError::InsufficientFunds { .. }
        )
    }
}

/// Buy rule errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Strategy not found: {0}")]
    NotFound(String),
}

/// Result type alias for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;
