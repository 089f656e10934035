//! Common test utilities and fixtures

#![allow(dead_code)]

use buy_btc::config::StaticSecretProvider;
use buy_btc::AppConfig;

pub const TEST_API_KEY: &str = "test_api_key";
pub const TEST_API_SECRET: &str = "test_api_secret";

/// Ticker response body with the given last trade and best ask
pub fn ticker_body(product_code: &str, ltp: u64, best_ask: u64) -> String {
    format!(
        r#"{{
            "product_code": "{}",
            "state": "RUNNING",
            "timestamp": "2021-03-01T12:34:56.789",
            "tick_id": 3579,
            "best_bid": {},
            "best_ask": {},
            "best_bid_size": 0.1,
            "best_ask_size": 0.2,
            "total_bid_depth": 1500.5,
            "total_ask_depth": 1200.25,
            "ltp": {},
            "volume": 25000.1,
            "volume_by_product": 20000.5
        }}"#,
        product_code,
        best_ask - 1000,
        best_ask,
        ltp
    )
}

/// Send-order response carrying an acceptance id
pub fn acceptance_body(id: &str) -> String {
    format!(r#"{{"child_order_acceptance_id":"{}"}}"#, id)
}

/// Configuration pointing at a mock server
pub fn test_config(rest_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.bitflyer.rest_url = rest_url.to_string();
    config.settings.request_timeout_seconds = 5;
    config.settings.ticker_timeout_seconds = 5;
    config
}

/// Secret provider holding the test key pair under the default names
pub fn test_secrets() -> StaticSecretProvider {
    StaticSecretProvider::new()
        .with("buy_btc_api_key", TEST_API_KEY)
        .with("buy_btc_api_secret", TEST_API_SECRET)
}

pub mod api_responses {
    /// bitFlyer error payload for an order below the minimum size
    pub const ORDER_SIZE_TOO_SMALL: &str =
        r#"{"status":-110,"error_message":"The minimum order size is 0.001 BTC.","data":null}"#;

    pub const EMPTY_ACCEPTANCE: &str = r#"{"child_order_acceptance_id":""}"#;
}
