//! REST API client for bitFlyer Lightning

use async_trait::async_trait;
use reqwest::{Client, Response};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::auth::{generate_auth_headers, ApiCredentials};
use super::messages::{Order, OrderAcceptance, Ticker};
use crate::common::errors::{ClientError, Result};
use crate::common::traits::{MarketData, OrderExecutor};
use crate::common::types::ProductCode;

pub const DEFAULT_BASE_URL: &str = "https://api.bitflyer.com";

const TICKER_PATH: &str = "/v1/ticker";
const SEND_CHILD_ORDER_PATH: &str = "/v1/me/sendchildorder";
const PRODUCT_CODE_KEY: &str = "product_code";

/// REST API client for bitFlyer
#[derive(Debug, Clone)]
pub struct BitflyerRestClient {
    /// HTTP client
    client: Client,
    /// Base URL, no trailing slash
    base_url: String,
    /// Optional API credentials for private endpoints
    credentials: Option<ApiCredentials>,
}

impl BitflyerRestClient {
    /// Create a new REST client (unauthenticated)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Set API credentials for private requests
    pub fn with_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Public Endpoints (No Authentication Required)
    // ========================================================================

    /// Get the current ticker for a product
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, product_code: ProductCode) -> Result<Ticker> {
        let url = format!("{}{}", self.base_url, TICKER_PATH);
        debug!("Fetching ticker from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[(PRODUCT_CODE_KEY, product_code.as_str())])
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let ticker: Ticker = serde_json::from_str(&body).map_err(|e| {
            warn!(body = %body, error = %e, "Failed to parse ticker");
            ClientError::Decode(e)
        })?;

        debug!(ltp = %ticker.ltp, best_ask = %ticker.best_ask, tick_id = ticker.tick_id, "Ticker received");
        Ok(ticker)
    }

    // ========================================================================
    // Private Endpoints (Signed)
    // ========================================================================

    /// Submit a limit buy: LIMIT / BUY / GTC, expiring after 1440 minutes
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        product_code: ProductCode,
        price: Decimal,
        size: Decimal,
    ) -> Result<OrderAcceptance> {
        let order = Order::limit_buy(product_code, price, size);
        self.send_child_order(&order).await
    }

    /// Submit an arbitrary child order
    ///
    /// No idempotency key is sent: retrying after a timeout may place the
    /// order twice.
    #[instrument(skip(self, order), fields(product_code = %order.product_code, side = %order.side))]
    pub async fn send_child_order(&self, order: &Order) -> Result<OrderAcceptance> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ClientError::Configuration("API credentials are required to place orders".to_string())
        })?;

        let body = serde_json::to_vec(order).map_err(ClientError::Encode)?;
        let headers = generate_auth_headers(credentials, "POST", SEND_CHILD_ORDER_PATH, &body)?;

        let url = format!("{}{}", self.base_url, SEND_CHILD_ORDER_PATH);
        debug!("Sending child order to: {}", url);

        let request = headers.apply_to_request(self.client.post(&url)).body(body);
        let response = request.send().await?;
        let body = Self::success_body(response).await?;

        let acceptance = OrderAcceptance::from_response_body(&body)?;
        info!(acceptance_id = %acceptance.id(), price = %order.price, size = %order.size, "Order accepted");
        Ok(acceptance)
    }

    // ========================================================================
    // Helper Methods
    // ========================================================================

    /// Read the body of a successful response, or turn the status into an error
    async fn success_body(response: Response) -> Result<String> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketData for BitflyerRestClient {
    async fn get_ticker(&self, product_code: ProductCode) -> Result<Ticker> {
        BitflyerRestClient::get_ticker(self, product_code).await
    }
}

#[async_trait]
impl OrderExecutor for BitflyerRestClient {
    async fn place_order(
        &self,
        product_code: ProductCode,
        price: Decimal,
        size: Decimal,
    ) -> Result<OrderAcceptance> {
        BitflyerRestClient::place_order(self, product_code, price, size).await
    }
}
