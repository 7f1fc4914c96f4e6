//! Core data types for the trading venue.

mod price_history;
mod settlement;

pub use price_history::{PriceHistory, HISTORY_LEN};
pub use settlement::Settlement;
