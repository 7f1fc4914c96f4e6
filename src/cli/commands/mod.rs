//! CLI command implementations.

pub mod simulate;
pub mod strategies;
pub mod validate;
