//! Secret providers for the exchange API key and secret

use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

use super::types::BitflyerConfig;
use crate::bitflyer::auth::ApiCredentials;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::SecretProvider;

/// Reads parameters from the process environment
///
/// A parameter name maps to the upper-cased environment variable, so
/// `buy_btc_api_key` is read from `BUY_BTC_API_KEY`. A `.env` file is
/// loaded on construction if present.
#[derive(Debug, Clone, Default)]
pub struct EnvSecretProvider {
    prefix: Option<String>,
}

impl EnvSecretProvider {
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self { prefix: None }
    }

    /// Prepend `prefix` to every variable name
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        dotenvy::dotenv().ok();
        Self {
            prefix: Some(prefix.into()),
        }
    }

    fn variable_name(&self, name: &str) -> String {
        let name = name.to_ascii_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, name),
            None => name,
        }
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        let variable = self.variable_name(name);
        debug!(parameter = name, variable = %variable, "Reading secret from environment");

        match std::env::var(&variable) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) | Err(std::env::VarError::NotPresent) => Err(ClientError::SecretNotFound(name.to_string())),
            Err(std::env::VarError::NotUnicode(_)) => Err(ClientError::Configuration(format!(
                "Secret {} is not valid unicode",
                name
            ))),
        }
    }
}

/// Fixed in-memory parameters
#[derive(Clone, Default)]
pub struct StaticSecretProvider {
    values: HashMap<String, String>,
}

impl StaticSecretProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl std::fmt::Debug for StaticSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecretProvider")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl SecretProvider for StaticSecretProvider {
    async fn get_parameter(&self, name: &str) -> Result<String> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::SecretNotFound(name.to_string()))
    }
}

/// Fetch the API key and secret named in the configuration
pub async fn load_credentials<P>(provider: &P, config: &BitflyerConfig) -> Result<ApiCredentials>
where
    P: SecretProvider + ?Sized,
{
    let api_key = provider.get_parameter(&config.api_key_parameter).await?;
    let api_secret = provider.get_parameter(&config.api_secret_parameter).await?;
    Ok(ApiCredentials::new(api_key, api_secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::traits::MockSecretProvider;

    #[tokio::test]
    async fn test_env_provider_reads_upper_cased_variable() {
        std::env::set_var("BUY_BTC_TEST_ENV_PARAM", "value-from-env");
        let provider = EnvSecretProvider::new();

        let value = provider.get_parameter("buy_btc_test_env_param").await.unwrap();
        assert_eq!(value, "value-from-env");
    }

    #[tokio::test]
    async fn test_env_provider_missing_variable() {
        let provider = EnvSecretProvider::with_prefix("BUY_BTC_TEST_MISSING_");
        let result = provider.get_parameter("nothing_here").await;
        assert!(matches!(result, Err(ClientError::SecretNotFound(name)) if name == "nothing_here"));
    }

    #[tokio::test]
    async fn test_load_credentials() {
        let provider = StaticSecretProvider::new()
            .with("buy_btc_api_key", "key-123")
            .with("buy_btc_api_secret", "secret-456");

        let creds = load_credentials(&provider, &BitflyerConfig::default()).await.unwrap();
        assert_eq!(creds.api_key, "key-123");
        assert_eq!(creds.api_secret(), "secret-456");
    }

    #[tokio::test]
    async fn test_load_credentials_missing_secret() {
        let provider = StaticSecretProvider::new().with("buy_btc_api_key", "key-123");
        let result = load_credentials(&provider, &BitflyerConfig::default()).await;
        assert!(matches!(result, Err(ClientError::SecretNotFound(name)) if name == "buy_btc_api_secret"));
    }

    #[tokio::test]
    async fn test_access_denied_propagates() {
        let mut provider = MockSecretProvider::new();
        provider
            .expect_get_parameter()
            .returning(|name| Err(ClientError::AccessDenied(name.to_string())));

        let result = load_credentials(&provider, &BitflyerConfig::default()).await;
        assert!(matches!(result, Err(ClientError::AccessDenied(_))));
    }
}
