//! Exchange vocabulary shared by the client, strategies and configuration
//!
//! Every variant has exactly one canonical wire string. Parsing is strict:
//! an unknown string is an error rather than a silent default, since a
//! defaulted side or order type would still produce a valid-looking order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ClientError;

/// Tradable pair on bitFlyer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCode {
    #[default]
    BtcJpy,
    EthJpy,
    FxBtcJpy,
    EthBtc,
    BchBtc,
}

impl ProductCode {
    pub const ALL: [ProductCode; 5] = [
        ProductCode::BtcJpy,
        ProductCode::EthJpy,
        ProductCode::FxBtcJpy,
        ProductCode::EthBtc,
        ProductCode::BchBtc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCode::BtcJpy => "BTC_JPY",
            ProductCode::EthJpy => "ETH_JPY",
            ProductCode::FxBtcJpy => "FX_BTC_JPY",
            ProductCode::EthBtc => "ETH_BTC",
            ProductCode::BchBtc => "BCH_BTC",
        }
    }
}

/// Order type: limit or market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::Market => "MARKET",
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// Execution condition for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

macro_rules! wire_enum {
    ($ty:ident, [$($variant:path),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_uppercase();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        ClientError::Configuration(format!(
                            "Unknown {} '{}'",
                            stringify!($ty),
                            s
                        ))
                    })
            }
        }
    };
}

wire_enum!(ProductCode, [
    ProductCode::BtcJpy,
    ProductCode::EthJpy,
    ProductCode::FxBtcJpy,
    ProductCode::EthBtc,
    ProductCode::BchBtc,
]);
wire_enum!(OrderType, [OrderType::Limit, OrderType::Market]);
wire_enum!(Side, [Side::Buy, Side::Sell]);
wire_enum!(TimeInForce, [TimeInForce::Gtc, TimeInForce::Ioc, TimeInForce::Fok]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_code_wire_strings() {
        let wire: Vec<&str> = ProductCode::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(wire, ["BTC_JPY", "ETH_JPY", "FX_BTC_JPY", "ETH_BTC", "BCH_BTC"]);
    }

    #[test]
    fn test_serde_matches_as_str() {
        for code in ProductCode::ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
        assert_eq!(serde_json::to_string(&OrderType::Limit).unwrap(), "\"LIMIT\"");
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&TimeInForce::Fok).unwrap(), "\"FOK\"");
    }

    #[test]
    fn test_from_str_round_trip() {
        for code in ProductCode::ALL {
            assert_eq!(code.to_string().parse::<ProductCode>().unwrap(), code);
        }
        assert_eq!("fx_btc_jpy".parse::<ProductCode>().unwrap(), ProductCode::FxBtcJpy);
        assert_eq!("sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("IOC".parse::<TimeInForce>().unwrap(), TimeInForce::Ioc);
    }

    #[test]
    fn test_unknown_value_fails_closed() {
        assert!(matches!(
            "SHORT".parse::<Side>(),
            Err(ClientError::Configuration(_))
        ));
        assert!("DOGE_JPY".parse::<ProductCode>().is_err());
        assert!("STOP".parse::<OrderType>().is_err());
        assert!("GTD".parse::<TimeInForce>().is_err());
    }
}
