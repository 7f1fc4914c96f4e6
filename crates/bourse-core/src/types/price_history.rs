//! Bounded price history used for trend detection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of prices retained by a [`PriceHistory`].
pub const HISTORY_LEN: usize = 3;

/// Sliding window over the last three prices, oldest first.
///
/// The window is seeded with the listing price so that trend checks are
/// well-defined from the first update and never fire on a fresh listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    prices: [Decimal; HISTORY_LEN],
}

impl PriceHistory {
    /// Create a window filled with `price`.
    pub fn seeded(price: Decimal) -> Self {
        Self {
            prices: [price; HISTORY_LEN],
        }
    }

    /// Build a window from explicit prices, oldest first.
    pub fn from_prices(prices: [Decimal; HISTORY_LEN]) -> Self {
        Self { prices }
    }

    /// Drop the oldest price and append `price` as the newest.
    pub fn push(&mut self, price: Decimal) {
        self.prices.rotate_left(1);
        self.prices[HISTORY_LEN - 1] = price;
    }

    /// Oldest retained price.
    pub fn oldest(&self) -> Decimal {
        self.prices[0]
    }

    /// Middle price.
    pub fn middle(&self) -> Decimal {
        self.prices[1]
    }

    /// Most recent price.
    pub fn latest(&self) -> Decimal {
        self.prices[HISTORY_LEN - 1]
    }

    /// All retained prices, oldest first.
    pub fn as_slice(&self) -> &[Decimal] {
        &self.prices
    }

    /// Price fell into the middle slot and rose out of it: `h0 > h1 < h2`.
    pub fn is_local_minimum(&self) -> bool {
        let [h0, h1, h2] = self.prices;
        h0 > h1 && h1 < h2
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::seeded(Decimal::ZERO)
    }
}
