//! Invocation entry point: secrets → pipeline → status/body response

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument};

use super::buyer::SpotBuyer;
use crate::bitflyer::rest::BitflyerRestClient;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::SecretProvider;
use crate::common::types::ProductCode;
use crate::config::secrets::load_credentials;
use crate::config::types::AppConfig;
use crate::strategy::{PricingStrategy, StrategyId, StrategyRegistry};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// What a single invocation should buy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub product_code: ProductCode,
    pub budget: Decimal,
    pub strategy: StrategyId,
    /// Compute the quote but do not submit
    #[serde(default)]
    pub dry_run: bool,
}

impl InvocationRequest {
    /// Request built from the `[buy]` section of the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let budget = config
            .buy
            .budget
            .ok_or_else(|| ClientError::Configuration("No budget configured".to_string()))?;

        Ok(Self {
            product_code: config.buy.product_code,
            budget,
            strategy: config.buy.strategy,
            dry_run: false,
        })
    }
}

/// Status code and body handed back to the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.into(),
        }
    }

    /// Every failure maps to 400 with the error message as body
    pub fn error(err: &ClientError) -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            body: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}

/// Run one invocation and map the result to a response
///
/// The error kind is logged; the caller only sees the message.
#[instrument(skip(config, secrets, registry), fields(product_code = %request.product_code, budget = %request.budget))]
pub async fn handle_invocation<P>(
    config: &AppConfig,
    secrets: &P,
    registry: &StrategyRegistry,
    request: &InvocationRequest,
) -> InvocationResponse
where
    P: SecretProvider + ?Sized,
{
    let strategy = registry.select(request.strategy);

    match execute(config, secrets, strategy, request).await {
        Ok(body) => {
            info!("Invocation succeeded");
            InvocationResponse::ok(body)
        }
        Err(e) => {
            error!(kind = %e.kind(), error = %e, "Invocation failed");
            InvocationResponse::error(&e)
        }
    }
}

async fn execute<P>(
    config: &AppConfig,
    secrets: &P,
    strategy: PricingStrategy,
    request: &InvocationRequest,
) -> Result<String>
where
    P: SecretProvider + ?Sized,
{
    let client = BitflyerRestClient::with_timeout(
        &config.bitflyer.rest_url,
        config.settings.request_timeout(),
    )?;

    let client = if request.dry_run {
        client
    } else {
        let credentials = load_credentials(secrets, &config.bitflyer).await?;
        client.with_credentials(credentials)
    };

    let client = Arc::new(client);
    let buyer = SpotBuyer::new(Arc::clone(&client), client)
        .with_product(request.product_code)
        .with_strategy(strategy)
        .with_sizing(config.sizing)
        .with_ticker_timeout(config.settings.ticker_timeout());

    if request.dry_run {
        let quote = buyer.quote(request.budget).await?;
        return Ok(format!(
            "Dry run: {} {} via {} (notional {})",
            request.product_code,
            quote,
            strategy.name,
            quote.notional()
        ));
    }

    let outcome = buyer.run(request.budget).await?;
    Ok(format!("Order Response: {}", outcome.acceptance))
}
