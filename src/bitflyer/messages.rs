//! bitFlyer Lightning wire types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::errors::{ClientError, Result};
use crate::common::types::{OrderType, ProductCode, Side, TimeInForce};

/// Orders stay on the book for one day
pub const DEFAULT_MINUTE_TO_EXPIRE: u32 = 1440;

/// Market snapshot from `GET /v1/ticker`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub product_code: String,
    /// Board state, e.g. "RUNNING"
    #[serde(default)]
    pub state: String,
    pub timestamp: String,
    pub tick_id: u64,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
    pub best_bid_size: Decimal,
    pub best_ask_size: Decimal,
    pub total_bid_depth: Decimal,
    pub total_ask_depth: Decimal,
    /// Last traded price
    pub ltp: Decimal,
    pub volume: Decimal,
    pub volume_by_product: Decimal,
}

/// Body of `POST /v1/me/sendchildorder`
///
/// Price and size go out as JSON numbers, which is what the endpoint expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub product_code: ProductCode,
    pub child_order_type: OrderType,
    pub side: Side,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub size: Decimal,
    pub minute_to_expire: u32,
    pub time_in_force: TimeInForce,
}

impl Order {
    /// Good-till-canceled limit buy expiring after one day
    pub fn limit_buy(product_code: ProductCode, price: Decimal, size: Decimal) -> Self {
        Self {
            product_code,
            child_order_type: OrderType::Limit,
            side: Side::Buy,
            price,
            size,
            minute_to_expire: DEFAULT_MINUTE_TO_EXPIRE,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

/// Raw response of `POST /v1/me/sendchildorder`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendChildOrderResponse {
    #[serde(default)]
    pub child_order_acceptance_id: Option<String>,
}

/// Confirmation that the exchange received an order for processing
///
/// Only ever constructed with a non-empty id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAcceptance {
    child_order_acceptance_id: String,
}

impl OrderAcceptance {
    /// Interpret a send-order response body
    ///
    /// A body that parses but carries no acceptance id is a rejection, even
    /// when the HTTP status was 200. The raw body is kept on the error.
    pub fn from_response_body(body: &str) -> Result<Self> {
        let response: SendChildOrderResponse =
            serde_json::from_str(body).map_err(ClientError::Decode)?;

        match response.child_order_acceptance_id {
            Some(id) if !id.is_empty() => Ok(Self {
                child_order_acceptance_id: id,
            }),
            _ => Err(ClientError::OrderRejected {
                body: body.to_string(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.child_order_acceptance_id
    }
}

impl fmt::Display for OrderAcceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "child_order_acceptance_id={}", self.child_order_acceptance_id)
    }
}
