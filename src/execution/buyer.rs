//! One-shot buy pipeline: ticker → strategy → limit order

use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, instrument};

use crate::bitflyer::messages::{OrderAcceptance, Ticker};
use crate::common::errors::{ClientError, Result};
use crate::common::traits::{MarketData, OrderExecutor};
use crate::common::types::ProductCode;
use crate::strategy::{BuyQuote, PricingStrategy, SizingRules, BEST_ASK};

/// Default upper bound on the ticker fetch
pub const DEFAULT_TICKER_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a completed buy
#[derive(Debug, Clone, PartialEq)]
pub struct BuyOutcome {
    pub quote: BuyQuote,
    pub acceptance: OrderAcceptance,
}

/// Fetches a ticker, prices the order and submits it
///
/// Each `run` does exactly one ticker read and at most one order
/// submission. Nothing is retried.
pub struct SpotBuyer<M, O> {
    market_data: Arc<M>,
    executor: Arc<O>,
    product_code: ProductCode,
    strategy: PricingStrategy,
    sizing: SizingRules,
    ticker_timeout: Duration,
}

impl<M, O> SpotBuyer<M, O>
where
    M: MarketData + 'static,
    O: OrderExecutor,
{
    /// BTC_JPY buyer using the best-ask strategy and default sizing
    pub fn new(market_data: Arc<M>, executor: Arc<O>) -> Self {
        Self {
            market_data,
            executor,
            product_code: ProductCode::BtcJpy,
            strategy: BEST_ASK,
            sizing: SizingRules::default(),
            ticker_timeout: DEFAULT_TICKER_TIMEOUT,
        }
    }

    pub fn with_product(mut self, product_code: ProductCode) -> Self {
        self.product_code = product_code;
        self
    }

    pub fn with_strategy(mut self, strategy: PricingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingRules) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_ticker_timeout(mut self, ticker_timeout: Duration) -> Self {
        self.ticker_timeout = ticker_timeout;
        self
    }

    pub fn strategy(&self) -> PricingStrategy {
        self.strategy
    }

    /// Fetch the ticker on its own task, bounded by the ticker timeout
    #[instrument(skip(self), fields(product_code = %self.product_code))]
    pub async fn fetch_ticker(&self) -> Result<Ticker> {
        let market_data = Arc::clone(&self.market_data);
        let product_code = self.product_code;

        let handle = tokio::spawn(async move { market_data.get_ticker(product_code).await });
        let abort = handle.abort_handle();

        match timeout(self.ticker_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ClientError::Internal(format!(
                "Ticker task failed: {}",
                join_error
            ))),
            Err(_) => {
                abort.abort();
                Err(ClientError::Timeout(format!(
                    "Ticker fetch for {} exceeded {:?}",
                    product_code, self.ticker_timeout
                )))
            }
        }
    }

    /// Fetch the ticker and price the order without submitting it
    #[instrument(skip(self), fields(strategy = self.strategy.name))]
    pub async fn quote(&self, budget: Decimal) -> Result<BuyQuote> {
        if budget <= Decimal::ZERO {
            return Err(ClientError::Configuration(format!(
                "Budget must be positive, got {}",
                budget
            )));
        }

        let ticker = self.fetch_ticker().await?;
        let quote = self.strategy.quote(budget, &ticker, &self.sizing)?;
        debug!(
            ltp = %ticker.ltp,
            best_ask = %ticker.best_ask,
            price = %quote.price,
            size = %quote.size,
            "Quote computed"
        );
        Ok(quote)
    }

    /// Run the whole pipeline once
    #[instrument(skip(self), fields(product_code = %self.product_code, strategy = self.strategy.name))]
    pub async fn run(&self, budget: Decimal) -> Result<BuyOutcome> {
        let quote = self.quote(budget).await?;

        let acceptance = self
            .executor
            .place_order(self.product_code, quote.price, quote.size)
            .await
            .map_err(|e| {
                error!(kind = %e.kind(), error = %e, "Order placement failed");
                e
            })?;

        info!(
            acceptance_id = %acceptance.id(),
            price = %quote.price,
            size = %quote.size,
            "Buy order placed"
        );
        Ok(BuyOutcome { quote, acceptance })
    }
}
