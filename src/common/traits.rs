//! Trait definitions for the collaborators of the buy pipeline

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::errors::Result;
use super::types::ProductCode;
use crate::bitflyer::messages::{OrderAcceptance, Ticker};

/// Source of market snapshots
///
/// Implementations must be safe to call concurrently; each call is an
/// independent read with no side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the current ticker for a product
    async fn get_ticker(&self, product_code: ProductCode) -> Result<Ticker>;
}

/// Places limit buy orders on the exchange
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submit a limit buy and return the exchange's acceptance
    ///
    /// Calling this twice places two orders; there is no idempotency key.
    async fn place_order(
        &self,
        product_code: ProductCode,
        price: Decimal,
        size: Decimal,
    ) -> Result<OrderAcceptance>;
}

/// Resolves named secrets (API key, API secret)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Look up a parameter by its logical name
    ///
    /// # Errors
    /// `SecretNotFound` if the parameter does not exist, `AccessDenied` if
    /// the store refuses to hand it out.
    async fn get_parameter(&self, name: &str) -> Result<String>;
}
