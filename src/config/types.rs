//! Configuration types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::errors::{ClientError, Result};
use crate::common::types::ProductCode;
use crate::strategy::{SizingRules, StrategyId};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// bitFlyer connection settings
    #[serde(default)]
    pub bitflyer: BitflyerConfig,
    /// What to buy and how to price it
    #[serde(default)]
    pub buy: BuyConfig,
    /// Exchange sizing limits
    #[serde(default)]
    pub sizing: SizingRules,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

impl AppConfig {
    /// Reject values that would only fail later, mid-invocation
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.bitflyer.rest_url).map_err(|e| {
            ClientError::Configuration(format!("Invalid rest_url '{}': {}", self.bitflyer.rest_url, e))
        })?;

        if let Some(budget) = self.buy.budget {
            if budget <= Decimal::ZERO {
                return Err(ClientError::Configuration(format!(
                    "Budget must be positive, got {}",
                    budget
                )));
            }
        }

        if self.sizing.minimum_size <= Decimal::ZERO {
            return Err(ClientError::Configuration(format!(
                "Minimum size must be positive, got {}",
                self.sizing.minimum_size
            )));
        }

        if self.settings.ticker_timeout_seconds == 0 {
            return Err(ClientError::Configuration(
                "ticker_timeout_seconds must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// bitFlyer platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitflyerConfig {
    /// Base URL for the REST API
    #[serde(default = "default_rest_url")]
    pub rest_url: String,
    /// Secret-store name of the API key
    #[serde(default = "default_api_key_parameter")]
    pub api_key_parameter: String,
    /// Secret-store name of the API secret
    #[serde(default = "default_api_secret_parameter")]
    pub api_secret_parameter: String,
}

impl Default for BitflyerConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            api_key_parameter: default_api_key_parameter(),
            api_secret_parameter: default_api_secret_parameter(),
        }
    }
}

fn default_rest_url() -> String {
    crate::bitflyer::rest::DEFAULT_BASE_URL.to_string()
}

fn default_api_key_parameter() -> String {
    "buy_btc_api_key".to_string()
}

fn default_api_secret_parameter() -> String {
    "buy_btc_api_secret".to_string()
}

/// Order parameters for one invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyConfig {
    /// Product to buy
    #[serde(default)]
    pub product_code: ProductCode,
    /// Quote-currency amount to spend; required before running
    #[serde(default)]
    pub budget: Option<Decimal>,
    /// Pricing strategy id
    #[serde(default = "default_strategy")]
    pub strategy: StrategyId,
}

impl Default for BuyConfig {
    fn default() -> Self {
        Self {
            product_code: ProductCode::default(),
            budget: None,
            strategy: default_strategy(),
        }
    }
}

fn default_strategy() -> StrategyId {
    1
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Upper bound on the ticker fetch, in seconds
    #[serde(default = "default_ticker_timeout")]
    pub ticker_timeout_seconds: u64,
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn ticker_timeout(&self) -> Duration {
        Duration::from_secs(self.ticker_timeout_seconds)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
            ticker_timeout_seconds: default_ticker_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_ticker_timeout() -> u64 {
    10
}
