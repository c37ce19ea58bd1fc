//! Money and percentage helpers
//!
//! All arithmetic is done with `Decimal` at full precision. Rounding to two
//! decimal places (half-up) happens only when a value is presented.

use rust_decimal::prelude::*;

/// Rounding strategy for presented values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Round a monetary amount or percentage for presentation
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `margin / sale_price × 100`
///
/// Undefined when `sale_price <= 0` or the ratio leaves the `Decimal` range.
pub fn margin_percentage(margin: Decimal, sale_price: Decimal) -> Option<Decimal> {
    if sale_price <= Decimal::ZERO {
        return None;
    }
    margin.checked_div(sale_price)?.checked_mul(HUNDRED)
}

/// Convert to f64 for logging, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_else(|| {
        tracing::error!(value = %value, "Decimal not representable as f64");
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_money(dec("2.345")), dec("2.35"));
        assert_eq!(round_money(dec("2.344999")), dec("2.34"));
        assert_eq!(round_money(dec("-2.345")), dec("-2.35"));
        assert_eq!(round_money(dec("6")), dec("6.00"));
    }

    #[test]
    fn test_margin_percentage() {
        assert_eq!(margin_percentage(dec("14"), dec("20")), Some(dec("70")));
        assert_eq!(
            margin_percentage(dec("1"), dec("3")).map(round_money),
            Some(dec("33.33"))
        );
        assert_eq!(margin_percentage(dec("-5"), dec("10")), Some(dec("-50")));
        assert_eq!(margin_percentage(dec("1"), Decimal::ZERO), None);
        assert_eq!(margin_percentage(Decimal::MAX, dec("0.5")), None);
    }

    #[test]
    fn test_accumulation_has_no_drift() {
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += dec("0.01");
        }
        assert_eq!(total, dec("10"));
        assert_eq!(to_f64(total), 10.0);
    }
}
