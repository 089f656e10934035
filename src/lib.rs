//! buy-btc Library
//!
//! An automated spot-buy client for bitFlyer: fetch the ticker, compute a
//! limit price and size from a pricing strategy, sign and submit the order.

pub mod bitflyer;
pub mod common;
pub mod config;
pub mod execution;
pub mod strategy;

// Re-export commonly used types
pub use bitflyer::auth::ApiCredentials;
pub use bitflyer::messages::{Order, OrderAcceptance, Ticker};
pub use bitflyer::rest::BitflyerRestClient;
pub use common::errors::{ClientError, ErrorKind, Result};
pub use common::traits::{MarketData, OrderExecutor, SecretProvider};
pub use common::types::{OrderType, ProductCode, Side, TimeInForce};
pub use config::types::AppConfig;
pub use execution::{handle_invocation, BuyOutcome, InvocationRequest, InvocationResponse, SpotBuyer};

// Strategy types
pub use strategy::{
    compute_size, round_price, select_strategy, BuyQuote, PricingStrategy, SizingRules,
    StrategyId, StrategyRegistry,
};
