//! Prices

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// Converts an amount in minor units to [`Money`], saturating at `i64::MAX`.
pub fn to_money(minor: u64, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), currency)
}

/// Applies a fractional percentage to an amount in minor units.
///
/// Rounds half away from zero to whole minor units. Returns `None` if the
/// result overflows or is negative.
pub fn percent_of_minor(percent: Percentage, minor: u64) -> Option<u64> {
    (percent * Decimal::ONE)
        .checked_mul(Decimal::from(minor))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, VND};

    use super::*;

    #[test]
    fn to_money_keeps_minor_units() {
        assert_eq!(to_money(300_000, VND), Money::from_minor(300_000, VND));
        assert_eq!(to_money(150, GBP).to_minor_units(), 150);
    }

    #[test]
    fn to_money_saturates() {
        assert_eq!(to_money(u64::MAX, VND).to_minor_units(), i64::MAX);
    }

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() {
        let ten_percent = Percentage::from(Decimal::new(10, 2));

        assert_eq!(percent_of_minor(ten_percent, 300_000), Some(30_000));
        assert_eq!(percent_of_minor(ten_percent, 15), Some(2));
        assert_eq!(percent_of_minor(ten_percent, 14), Some(1));
        assert_eq!(percent_of_minor(ten_percent, 0), Some(0));
    }

    #[test]
    fn percent_of_minor_negative_result_is_none() {
        let negative = Percentage::from(Decimal::new(-10, 2));

        assert_eq!(percent_of_minor(negative, 100), None);
    }
}
