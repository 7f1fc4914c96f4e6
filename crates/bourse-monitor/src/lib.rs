//! Logging for the trading venue.

mod logging;

pub use logging::setup_logging;
