//! Configuration structures.

use bourse_strategies::StrategyRegistry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub listing: ListingSettings,
    #[serde(default)]
    pub member: MemberSettings,
    #[serde(default)]
    pub strategy: StrategySettings,
}

impl AppConfig {
    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.member.default_order_size == 0 {
            return Err(SettingsError::Invalid(
                "member.default_order_size must be positive".into(),
            ));
        }
        if self.member.default_balance < Decimal::ZERO {
            return Err(SettingsError::Invalid(
                "member.default_balance must not be negative".into(),
            ));
        }
        if self.listing.default_price < Decimal::ZERO {
            return Err(SettingsError::Invalid(
                "listing.default_price must not be negative".into(),
            ));
        }
        if !StrategyRegistry::new().exists(&self.strategy.rule) {
            return Err(SettingsError::Invalid(format!(
                "unknown strategy.rule '{}'",
                self.strategy.rule
            )));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "bourse".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Defaults for newly listed companies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSettings {
    pub default_shares: u64,
    pub default_price: Decimal,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_shares: 0,
            default_price: Decimal::ZERO,
        }
    }
}

/// Defaults for new members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSettings {
    pub default_balance: Decimal,
    pub default_order_size: u64,
}

impl Default for MemberSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            default_balance: dec!(10000),
            default_order_size: 10,
        }
    }
}

/// Buy rule selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySettings {
    pub rule: String,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            rule: bourse_strategies::DEFAULT_RULE.to_string(),
        }
    }
}
