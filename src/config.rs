//! Cart configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{notifications::DEFAULT_NOTIFICATION_DURATION, storage::FileStore};

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Flat shipping fee for a non-empty cart, in minor units.
pub const DEFAULT_SHIPPING_FEE: u64 = 30_000;

/// Errors raised while resolving configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The currency code is not a known ISO 4217 code.
    #[error("unknown currency code {0:?}")]
    UnknownCurrency(String),

    /// The storage key is empty.
    #[error("storage key cannot be empty")]
    EmptyStorageKey,

    /// The storage key cannot name a file in the data directory.
    #[error("invalid storage key {0:?}: use ASCII letters, digits, '-', '_' or '.'")]
    InvalidStorageKey(String),
}

/// Settings the cart aggregate runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSettings {
    /// Store key holding the serialized cart
    pub storage_key: String,

    /// How long a notification stays visible
    pub notification_duration: Duration,

    /// Currency of all prices
    pub currency: &'static Currency,

    /// Flat shipping fee for a non-empty cart
    pub shipping_fee: u64,
}

impl Default for CartSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            currency: iso::VND,
            shipping_fee: DEFAULT_SHIPPING_FEE,
        }
    }
}

/// Cart settings read from CLI arguments and the environment.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Directory the cart is persisted in
    #[arg(long, env = "TROLLEY_DATA_DIR", default_value = ".trolley")]
    pub data_dir: PathBuf,

    /// Key the cart is stored under
    #[arg(long, env = "TROLLEY_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Notification display time in milliseconds
    #[arg(long, env = "TROLLEY_NOTIFICATION_MS", default_value_t = 3_000_u64)]
    pub notification_ms: u64,

    /// ISO 4217 currency code for prices
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "VND")]
    pub currency: String,

    /// Flat shipping fee in minor units
    #[arg(long, env = "TROLLEY_SHIPPING_FEE", default_value_t = DEFAULT_SHIPPING_FEE)]
    pub shipping_fee: u64,
}

impl CartConfig {
    /// Resolves the settings for the cart aggregate.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the currency code is unknown, or if the
    /// storage key is empty or unusable as a [`FileStore`] key.
    pub fn settings(&self) -> Result<CartSettings, ConfigError> {
        let currency = iso::find(self.currency.trim())
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))?;

        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }

        if !FileStore::is_valid_key(&self.storage_key) {
            return Err(ConfigError::InvalidStorageKey(self.storage_key.clone()));
        }

        Ok(CartSettings {
            storage_key: self.storage_key.clone(),
            notification_duration: Duration::from_millis(self.notification_ms),
            currency,
            shipping_fee: self.shipping_fee,
        })
    }
}

/// How the CLI formats its diagnostics on stderr.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for reading in a terminal.
    Compact,

    /// One JSON object per event, for piping into log tooling.
    Json,
}

/// Diagnostics settings for the CLI.
///
/// Only warnings and errors are shown by default so the receipt on stdout is
/// not drowned out; `--log-level debug` traces every cart mutation and store
/// write.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Filter directive for cart diagnostics (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Diagnostics format on stderr (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn config() -> CartConfig {
        CartConfig {
            data_dir: PathBuf::from(".trolley"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notification_ms: 3_000,
            currency: "VND".to_string(),
            shipping_fee: DEFAULT_SHIPPING_FEE,
        }
    }

    #[test]
    fn defaults_match_storefront() {
        let settings = CartSettings::default();

        assert_eq!(settings.storage_key, "cart");
        assert_eq!(settings.notification_duration, Duration::from_secs(3));
        assert_eq!(settings.currency, iso::VND);
        assert_eq!(settings.shipping_fee, 30_000);
    }

    #[test]
    fn config_resolves_to_default_settings() -> TestResult {
        assert_eq!(config().settings()?, CartSettings::default());

        Ok(())
    }

    #[test]
    fn config_resolves_other_currency() -> TestResult {
        let settings = CartConfig {
            currency: "GBP".to_string(),
            notification_ms: 500,
            ..config()
        }
        .settings()?;

        assert_eq!(settings.currency, iso::GBP);
        assert_eq!(settings.notification_duration, Duration::from_millis(500));

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        let result = CartConfig {
            currency: "XYZ1".to_string(),
            ..config()
        }
        .settings();

        assert_eq!(
            result,
            Err(ConfigError::UnknownCurrency("XYZ1".to_string()))
        );
    }

    #[test]
    fn empty_storage_key_is_rejected() {
        let result = CartConfig {
            storage_key: "  ".to_string(),
            ..config()
        }
        .settings();

        assert_eq!(result, Err(ConfigError::EmptyStorageKey));
    }

    #[test]
    fn storage_key_unusable_as_file_name_is_rejected() {
        for key in ["my cart", "../cart", "carts/guest", ".cart"] {
            let result = CartConfig {
                storage_key: key.to_string(),
                ..config()
            }
            .settings();

            assert_eq!(
                result,
                Err(ConfigError::InvalidStorageKey(key.to_string())),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn storage_key_with_dashes_and_dots_is_accepted() -> TestResult {
        let settings = CartConfig {
            storage_key: "guest-cart.v2".to_string(),
            ..config()
        }
        .settings()?;

        assert_eq!(settings.storage_key, "guest-cart.v2");

        Ok(())
    }
}
