//! Pricing strategies and order sizing
//!
//! A strategy turns a budget and a ticker snapshot into a [`BuyQuote`]
//! (limit price and quantity). Strategies are plain functions looked up by
//! id in a [`StrategyRegistry`]; they perform no I/O, so they can be tested
//! with a fixed [`Ticker`](crate::bitflyer::messages::Ticker).
//!
//! # Built-in strategies
//!
//! | id | name                       | price                          |
//! |----|----------------------------|--------------------------------|
//! | 0  | `best-ask`                 | `round(best_ask)`              |
//! | 1  | `discount-from-last-trade` | `round(ltp * 0.985)`           |
//!
//! Any other id resolves to `best-ask`. In every case the size is
//! `compute_size(price, budget, minimum_size, decimal_places)`.
//!
//! # Example
//!
//! ```ignore
//! use buy_btc::strategy::{select_strategy, SizingRules};
//!
//! let quote = select_strategy(1).quote(budget, &ticker, &SizingRules::default())?;
//! println!("buy {} BTC at {}", quote.size, quote.price);
//! ```

mod registry;
mod size_calculator;
mod types;

pub use registry::{
    select_strategy, StrategyRegistry, BEST_ASK, DISCOUNT_FROM_LAST_TRADE, LTP_DISCOUNT_RATIO,
};

pub use size_calculator::{
    compute_size, round_price, SizingRules, BTC_MINIMUM_SIZE, BTC_SIZE_DECIMAL_PLACES,
};

pub use types::{BuyQuote, PricingFn, PricingStrategy, StrategyId};
