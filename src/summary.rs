//! Order summary
//!
//! Subtotal, shipping, coupon discount and grand total for the cart page.

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{items::CartItem, pricing::percent_of_minor};

/// Errors raised while redeeming a coupon code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// The code does not match any known coupon.
    #[error("unknown coupon code {0:?}")]
    Unknown(String),
}

/// A redeemable coupon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupon {
    /// 10% off the subtotal (`SALE10`)
    Sale10,
}

impl Coupon {
    /// The code customers enter.
    pub fn code(self) -> &'static str {
        match self {
            Self::Sale10 => "SALE10",
        }
    }

    /// Fraction of the subtotal taken off.
    pub fn percentage(self) -> Percentage {
        match self {
            Self::Sale10 => Percentage::from(Decimal::new(10, 2)),
        }
    }

    /// Discount for the given subtotal, in minor units.
    pub fn discount_on(self, subtotal: u64) -> u64 {
        percent_of_minor(self.percentage(), subtotal)
            .unwrap_or(0)
            .min(subtotal)
    }
}

impl FromStr for Coupon {
    type Err = CouponError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let code = code.trim();

        if code.eq_ignore_ascii_case(Self::Sale10.code()) {
            Ok(Self::Sale10)
        } else {
            Err(CouponError::Unknown(code.to_string()))
        }
    }
}

/// Totals shown alongside the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct line items
    pub line_count: usize,

    /// Sum of all quantities
    pub item_count: u64,

    /// Sum of line totals
    pub subtotal: u64,

    /// Flat shipping fee, zero for an empty cart
    pub shipping_fee: u64,

    /// Coupon applied, if any
    pub coupon: Option<Coupon>,

    /// Coupon discount
    pub discount: u64,

    /// Amount payable
    pub total: u64,
}

impl CartSummary {
    /// Builds the summary for `items`.
    pub fn new(items: &[CartItem], shipping_fee: u64, coupon: Option<Coupon>) -> Self {
        let subtotal = crate::items::total_amount(items);
        let shipping_fee = if items.is_empty() { 0 } else { shipping_fee };
        let discount = coupon.map_or(0, |coupon| coupon.discount_on(subtotal));

        Self {
            line_count: items.len(),
            item_count: crate::items::item_count(items),
            subtotal,
            shipping_fee,
            coupon,
            discount,
            total: subtotal
                .saturating_add(shipping_fee)
                .saturating_sub(discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn items() -> Vec<CartItem> {
        let three = NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN);

        vec![CartItem::new(
            &Product::new(1, "Linen Shirt", 100_000, "x"),
            three,
            "M",
            "Black",
        )]
    }

    #[test]
    fn coupon_codes_are_case_insensitive() -> TestResult {
        assert_eq!("SALE10".parse::<Coupon>()?, Coupon::Sale10);
        assert_eq!(" sale10 ".parse::<Coupon>()?, Coupon::Sale10);

        Ok(())
    }

    #[test]
    fn unknown_coupon_is_rejected() {
        assert_eq!(
            "FREESHIP".parse::<Coupon>(),
            Err(CouponError::Unknown("FREESHIP".to_string()))
        );
    }

    #[test]
    fn summary_without_coupon() {
        let summary = CartSummary::new(&items(), 30_000, None);

        assert_eq!(summary.line_count, 1);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, 300_000);
        assert_eq!(summary.shipping_fee, 30_000);
        assert_eq!(summary.discount, 0);
        assert_eq!(summary.total, 330_000);
    }

    #[test]
    fn summary_with_coupon() {
        let summary = CartSummary::new(&items(), 30_000, Some(Coupon::Sale10));

        assert_eq!(summary.discount, 30_000);
        assert_eq!(summary.total, 300_000);
    }

    #[test]
    fn empty_cart_has_no_shipping() {
        let summary = CartSummary::new(&[], 30_000, Some(Coupon::Sale10));

        assert_eq!(summary.shipping_fee, 0);
        assert_eq!(summary.discount, 0);
        assert_eq!(summary.total, 0);
    }
}
