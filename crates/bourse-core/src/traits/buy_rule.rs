//! Buy rule trait definition.

use crate::types::PriceHistory;

/// Decision policy a member applies whenever a watched company's price moves.
///
/// Rules only decide; the exchange owns the settlement mechanics, so a rule
/// can be swapped without touching how trades are validated and executed.
pub trait BuyRule: Send + Sync {
    /// Get the unique name of this rule.
    fn name(&self) -> &str;

    /// Whether the member should attempt a purchase given the latest history.
    fn should_buy(&self, history: &PriceHistory) -> bool;

    /// Get a description of the rule.
    fn description(&self) -> &str {
        ""
    }
}
