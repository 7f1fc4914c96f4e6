//! Buy rule registry for selecting rules by name.

use crate::DipThenRise;
use bourse_core::{error::StrategyError, traits::BuyRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the rule members use unless configured otherwise.
pub const DEFAULT_RULE: &str = "dip_then_rise";

/// Information about a registered rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Registry key
    pub key: String,
    /// Display name
    pub name: String,
    /// Rule description
    pub description: String,
}

/// Registry of available buy rules.
pub struct StrategyRegistry {
    strategies: BTreeMap<String, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a registry with all built-in rules.
    pub fn new() -> Self {
        let mut strategies = BTreeMap::new();

        let dip = DipThenRise;
        strategies.insert(
            DEFAULT_RULE.to_string(),
            StrategyInfo {
                key: DEFAULT_RULE.to_string(),
                name: dip.name().to_string(),
                description: dip.description().to_string(),
            },
        );

        Self { strategies }
    }

    /// List all available rules, ordered by key.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get rule info by key.
    pub fn get(&self, key: &str) -> Option<&StrategyInfo> {
        self.strategies.get(key)
    }

    /// Check if a rule exists.
    pub fn exists(&self, key: &str) -> bool {
        self.strategies.contains_key(key)
    }

    /// Create a rule instance by key.
    pub fn create(&self, key: &str) -> Result<Box<dyn BuyRule>, StrategyError> {
        match key {
            DEFAULT_RULE => Ok(Box::new(DipThenRise::new())),
            _ => Err(StrategyError::NotFound(key.to_string())),
        }
    }

    /// Create the default rule.
    pub fn create_default(&self) -> Box<dyn BuyRule> {
        Box::new(DipThenRise::new())
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
