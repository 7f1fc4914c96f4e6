//! Dip-then-rise buy rule.
//!
//! Fires on a strict local minimum over the last three prices: the price
//! fell into the middle slot and rose out of it into the newest one.

use bourse_core::{traits::BuyRule, types::PriceHistory};
use tracing::trace;

/// Buy the dip: `h0 > h1 && h1 < h2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DipThenRise;

impl DipThenRise {
    /// Create the rule.
    pub fn new() -> Self {
        Self
    }
}

impl BuyRule for DipThenRise {
    fn name(&self) -> &str {
        "Dip Then Rise"
    }

    fn description(&self) -> &str {
        "Buys when the price falls into a strict local minimum and then rises"
    }

    fn should_buy(&self, history: &PriceHistory) -> bool {
        let signal = history.is_local_minimum();
        trace!(
            oldest = %history.oldest(),
            middle = %history.middle(),
            latest = %history.latest(),
            signal,
            "Evaluated dip-then-rise"
        );
        signal
    }
}
