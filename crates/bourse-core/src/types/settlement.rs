//! Settlement receipts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of an accepted trade between a company and a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique settlement ID
    pub id: Uuid,
    /// Identifier of the company whose shares were sold
    pub company: String,
    /// Shares transferred
    pub quantity: u64,
    /// Price per share at settlement time
    pub price: Decimal,
    /// Cash debited from the member (quantity * price)
    pub total: Decimal,
    /// Company's outstanding shares after the trade
    pub shares_remaining: u64,
    /// Member's cash balance after the trade
    pub balance_remaining: Decimal,
    /// When the trade settled
    pub settled_at: DateTime<Utc>,
}

impl Settlement {
    /// Create a receipt stamped with a fresh ID and the current time.
    ///
    /// `total` is the amount debited, as computed by the settling exchange.
    pub fn new(
        company: impl Into<String>,
        quantity: u64,
        price: Decimal,
        total: Decimal,
        shares_remaining: u64,
        balance_remaining: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company: company.into(),
            quantity,
            price,
            total,
            shares_remaining,
            balance_remaining,
            settled_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BUY {} {} @ {} = {} (shares left {}, balance {})",
            self.quantity,
            self.company,
            self.price,
            self.total,
            self.shares_remaining,
            self.balance_remaining
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_settlement_total() {
        let receipt = Settlement::new("Green Bank", 10, dec!(73), dec!(730), 90, dec!(9270));
        assert_eq!(receipt.total, dec!(730));
        assert_eq!(receipt.company, "Green Bank");
    }

    #[test]
    fn test_settlement_display() {
        let receipt = Settlement::new("Green Bank", 10, dec!(73), dec!(730), 90, dec!(9270));
        assert_eq!(
            receipt.to_string(),
            "BUY 10 Green Bank @ 73 = 730 (shares left 90, balance 9270)"
        );
    }

    #[test]
    fn test_settlement_serializes_decimals() {
        let receipt = Settlement::new("Acme", 2, dec!(1.5), dec!(3.0), 8, dec!(7));
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["company"], "Acme");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["total"], "3.0");
    }
}
