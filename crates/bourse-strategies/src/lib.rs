//! Buy rule implementations.
//!
//! The canonical rule is [`DipThenRise`]: buy once the price has fallen into
//! a strict local minimum and started to recover. Further rules are
//! registered by name in [`StrategyRegistry`].

mod dip_then_rise;
mod registry;

pub use dip_then_rise::DipThenRise;
pub use registry::{StrategyInfo, StrategyRegistry, DEFAULT_RULE};
