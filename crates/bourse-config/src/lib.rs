//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, ListingSettings, LoggingConfig, MemberSettings, SettingsError,
    StrategySettings,
};

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and `BOURSE__`-prefixed environment variables.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    build(Some(path))
}

/// Like [`load_config`], but a missing file means built-in defaults.
pub fn load_or_default(path: &Path) -> Result<AppConfig, SettingsError> {
    if path.exists() {
        build(Some(path))
    } else {
        build(None)
    }
}

fn build(path: Option<&Path>) -> Result<AppConfig, SettingsError> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix("BOURSE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
