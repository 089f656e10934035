use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::size_calculator::SizingRules;
use crate::bitflyer::messages::Ticker;
use crate::common::errors::Result;

/// Price and quantity for a limit buy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyQuote {
    pub price: Decimal,
    pub size: Decimal,
}

impl BuyQuote {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// Quote-currency amount the order commits
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

impl fmt::Display for BuyQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.size, self.price)
    }
}

/// Identifier used to pick a pricing strategy from configuration
pub type StrategyId = u32;

/// Pure pricing function: no I/O, no shared state
pub type PricingFn = fn(budget: Decimal, ticker: &Ticker, rules: &SizingRules) -> Result<BuyQuote>;

/// A named pricing function
#[derive(Clone, Copy)]
pub struct PricingStrategy {
    pub id: StrategyId,
    pub name: &'static str,
    pricing: PricingFn,
}

impl PricingStrategy {
    pub const fn new(id: StrategyId, name: &'static str, pricing: PricingFn) -> Self {
        Self { id, name, pricing }
    }

    /// Compute the buy quote for a budget and a ticker snapshot
    pub fn quote(&self, budget: Decimal, ticker: &Ticker, rules: &SizingRules) -> Result<BuyQuote> {
        (self.pricing)(budget, ticker, rules)
    }
}

impl fmt::Debug for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PricingStrategy")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
