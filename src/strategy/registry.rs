use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::warn;

use super::size_calculator::{round_price, SizingRules};
use super::types::{BuyQuote, PricingStrategy, StrategyId};
use crate::bitflyer::messages::Ticker;
use crate::common::errors::Result;

/// Share of the last traded price bid by the discount strategy
pub const LTP_DISCOUNT_RATIO: Decimal = dec!(0.985);

/// Buy at the best ask
pub const BEST_ASK: PricingStrategy = PricingStrategy::new(0, "best-ask", best_ask);

/// Buy at 98.5% of the last traded price
pub const DISCOUNT_FROM_LAST_TRADE: PricingStrategy =
    PricingStrategy::new(1, "discount-from-last-trade", discount_from_last_trade);

fn best_ask(budget: Decimal, ticker: &Ticker, rules: &SizingRules) -> Result<BuyQuote> {
    let price = round_price(ticker.best_ask);
    let size = rules.size_for(price, budget)?;
    Ok(BuyQuote::new(price, size))
}

fn discount_from_last_trade(budget: Decimal, ticker: &Ticker, rules: &SizingRules) -> Result<BuyQuote> {
    let price = round_price(ticker.ltp * LTP_DISCOUNT_RATIO);
    let size = rules.size_for(price, budget)?;
    Ok(BuyQuote::new(price, size))
}

/// Lookup table from strategy id to pricing function
///
/// Ids without an entry resolve to the fallback strategy (best ask).
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: BTreeMap<StrategyId, PricingStrategy>,
    fallback: PricingStrategy,
}

impl StrategyRegistry {
    /// Empty registry with the given fallback
    pub fn new(fallback: PricingStrategy) -> Self {
        Self {
            strategies: BTreeMap::new(),
            fallback,
        }
    }

    /// Registry with every built-in strategy
    pub fn builtin() -> Self {
        let mut registry = Self::new(BEST_ASK);
        registry.register(BEST_ASK);
        registry.register(DISCOUNT_FROM_LAST_TRADE);
        registry
    }

    /// Add or replace a strategy under its id
    pub fn register(&mut self, strategy: PricingStrategy) -> &mut Self {
        self.strategies.insert(strategy.id, strategy);
        self
    }

    pub fn contains(&self, id: StrategyId) -> bool {
        self.strategies.contains_key(&id)
    }

    /// Exact lookup
    pub fn get(&self, id: StrategyId) -> Option<PricingStrategy> {
        self.strategies.get(&id).copied()
    }

    /// Resolve an id, falling back for unknown ids
    pub fn select(&self, id: StrategyId) -> PricingStrategy {
        match self.get(id) {
            Some(strategy) => strategy,
            None => {
                warn!(
                    strategy_id = id,
                    fallback = self.fallback.name,
                    "Unknown strategy id, using fallback"
                );
                self.fallback
            }
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = StrategyId> + '_ {
        self.strategies.keys().copied()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Pick a built-in strategy by id
pub fn select_strategy(id: StrategyId) -> PricingStrategy {
    StrategyRegistry::builtin().select(id)
}
