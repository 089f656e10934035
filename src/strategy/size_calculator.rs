use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{ClientError, Result};

/// bitFlyer minimum order quantity for BTC
pub const BTC_MINIMUM_SIZE: Decimal = dec!(0.001);

/// Decimal places kept when sizing a BTC order
pub const BTC_SIZE_DECIMAL_PLACES: u32 = 4;

/// Exchange limits applied when turning a budget into an order size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingRules {
    /// Smallest quantity the exchange accepts
    #[serde(default = "default_minimum_size")]
    pub minimum_size: Decimal,
    /// Decimal places of the computed size
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl SizingRules {
    pub fn new(minimum_size: Decimal, decimal_places: u32) -> Self {
        Self {
            minimum_size,
            decimal_places,
        }
    }

    /// Size for spending `budget` at `price`
    pub fn size_for(&self, price: Decimal, budget: Decimal) -> Result<Decimal> {
        compute_size(price, budget, self.minimum_size, self.decimal_places)
    }
}

impl Default for SizingRules {
    fn default() -> Self {
        Self::new(BTC_MINIMUM_SIZE, BTC_SIZE_DECIMAL_PLACES)
    }
}

fn default_minimum_size() -> Decimal {
    BTC_MINIMUM_SIZE
}

fn default_decimal_places() -> u32 {
    BTC_SIZE_DECIMAL_PLACES
}

/// Round a price to a whole unit of the quote currency
///
/// Halves round away from zero.
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Quantity bought with `budget` at `price`
///
/// The quotient is rounded up to `decimal_places` and never drops below
/// `minimum_size`, so the result may cost slightly more than the budget.
///
/// # Errors
/// `InvalidPrice` when `price <= 0`, `Internal` when `budget / price`
/// does not fit in a `Decimal`.
pub fn compute_size(
    price: Decimal,
    budget: Decimal,
    minimum_size: Decimal,
    decimal_places: u32,
) -> Result<Decimal> {
    if price <= Decimal::ZERO {
        return Err(ClientError::InvalidPrice(price));
    }

    let quotient = budget
        .checked_div(price)
        .ok_or_else(|| {
            ClientError::Internal(format!("Size overflows for budget {} at price {}", budget, price))
        })?;
    let size = quotient.round_dp_with_strategy(decimal_places, RoundingStrategy::ToPositiveInfinity);

    Ok(size.max(minimum_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(dec!(985000.4)), dec!(985000));
        assert_eq!(round_price(dec!(985000.5)), dec!(985001));
        assert_eq!(round_price(dec!(985001.5)), dec!(985002));
        assert_eq!(round_price(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn test_round_price_idempotent() {
        for x in [dec!(0), dec!(0.5), dec!(1.49), dec!(985000.5), dec!(1234567.891), dec!(-7.5)] {
            let once = round_price(x);
            assert_eq!(round_price(once), once);
        }
    }

    #[test]
    fn test_compute_size_rounds_up() {
        let size = compute_size(dec!(990000), dec!(4000), dec!(0.001), 4).unwrap();
        assert_eq!(size, dec!(0.0041));
    }

    #[test]
    fn test_compute_size_exact_quotient_unchanged() {
        let size = compute_size(dec!(1000000), dec!(5000), dec!(0.001), 4).unwrap();
        assert_eq!(size, dec!(0.005));
    }

    #[test]
    fn test_compute_size_clamps_to_minimum() {
        let size = compute_size(dec!(990000), dec!(500), dec!(0.001), 4).unwrap();
        assert_eq!(size, dec!(0.001));
    }

    #[test]
    fn test_compute_size_invalid_price() {
        assert!(matches!(
            compute_size(dec!(0), dec!(4000), dec!(0.001), 4),
            Err(ClientError::InvalidPrice(_))
        ));
        assert!(matches!(
            compute_size(dec!(-1), dec!(4000), dec!(0.001), 4),
            Err(ClientError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_compute_size_overflow_names_budget() {
        let err = compute_size(dec!(0.1), Decimal::MAX, dec!(0.001), 4).unwrap_err();
        match err {
            ClientError::Internal(msg) => assert!(msg.contains(&Decimal::MAX.to_string())),
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_compute_size_bounds() {
        let min = dec!(0.001);
        let places = 4;
        let prices = [dec!(1), dec!(3.7), dec!(512345), dec!(990000), dec!(7654321)];
        let budgets = [dec!(1), dec!(100), dec!(4000), dec!(12345.67), dec!(1000000)];

        for price in prices {
            for budget in budgets {
                let size = compute_size(price, budget, min, places).unwrap();
                let rounded_up = (budget / price)
                    .round_dp_with_strategy(places, RoundingStrategy::ToPositiveInfinity);

                assert!(size >= min, "size {} below minimum", size);
                assert!(size == min || size >= budget / price);
                assert!(size == min || size == rounded_up);
                assert!(size.scale() <= places || size == min);
            }
        }
    }

    #[test]
    fn test_sizing_rules_default() {
        let rules = SizingRules::default();
        assert_eq!(rules.minimum_size, dec!(0.001));
        assert_eq!(rules.decimal_places, 4);
        assert_eq!(rules.size_for(dec!(990000), dec!(4000)).unwrap(), dec!(0.0041));
    }
}
