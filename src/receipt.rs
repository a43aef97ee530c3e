//! Receipt
//!
//! Renders the cart as a table followed by the order summary.

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    clock::Clock,
    items::CartItem,
    pricing::to_money,
    storage::KeyValueStore,
    summary::{CartSummary, Coupon},
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The output could not be written.
    #[error("failed to write receipt")]
    IO,
}

/// Cart contents and summary ready for display.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    items: &'a [CartItem],
    summary: CartSummary,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Builds a receipt for `cart`, applying `coupon` if given.
    pub fn from_cart<S: KeyValueStore, C: Clock>(
        cart: &'a Cart<S, C>,
        coupon: Option<Coupon>,
    ) -> Self {
        Self {
            items: cart.items(),
            summary: cart.summary(coupon),
            currency: cart.currency(),
        }
    }

    /// The order summary.
    pub fn summary(&self) -> &CartSummary {
        &self.summary
    }

    /// Writes the receipt.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.items.is_empty() {
            return writeln!(out, "Your cart is empty.").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["Item", "Size", "Color", "Unit price", "Qty", "Line total"]);

        for item in self.items {
            builder.push_record([
                item.name().to_string(),
                item.size().to_string(),
                item.color().to_string(),
                self.unit_price_cell(item),
                item.quantity().to_string(),
                self.money(item.line_total()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..6), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let summary = &self.summary;
        let noun = match summary.line_count {
            1 => "item",
            _ => "items",
        };

        let mut lines = vec![
            (
                format!("Subtotal ({} {noun}):", summary.line_count),
                self.money(summary.subtotal),
            ),
            ("Shipping:".to_string(), self.money(summary.shipping_fee)),
        ];

        if let Some(coupon) = summary.coupon {
            lines.push((
                format!("Discount ({}):", coupon.code()),
                format!("-{}", self.money(summary.discount)),
            ));
        }

        lines.push(("Total:".to_string(), self.money(summary.total)));

        let label_width = lines
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let value_width = lines
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        Ok(())
    }

    fn unit_price_cell(&self, item: &CartItem) -> String {
        let price = self.money(item.unit_price());

        match (item.unit_savings(), item.original_unit_price()) {
            (Some(_), Some(original)) => format!("{price} (was {})", self.money(original)),
            _ => price,
        }
    }

    fn money(&self, minor: u64) -> String {
        to_money(minor, self.currency).to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use testresult::TestResult;

    use crate::{config::CartSettings, products::Product, storage::MemoryStore};

    use super::*;

    fn render(cart: &Cart<MemoryStore>, coupon: Option<Coupon>) -> TestResult<String> {
        let mut out = Vec::new();

        Receipt::from_cart(cart, coupon).write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn empty_cart_renders_single_line() -> TestResult {
        let cart = Cart::load(MemoryStore::new(), &CartSettings::default());

        assert_eq!(render(&cart, None)?, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn renders_items_and_summary() -> TestResult {
        let mut cart = Cart::load(MemoryStore::new(), &CartSettings::default());
        let two = NonZeroU32::new(2).unwrap_or(NonZeroU32::MIN);

        cart.add_items(
            &Product::new(1, "Linen Shirt", 100_000, "x").with_original_price(120_000),
            two,
            "M",
            "Black",
        );

        let output = render(&cart, Some(Coupon::Sale10))?;

        assert!(
            output.contains("Linen Shirt"),
            "missing item name:\n{output}"
        );
        assert!(output.contains("Black"), "missing color:\n{output}");
        assert!(
            output.contains("(was "),
            "missing original price:\n{output}"
        );
        assert!(
            output.contains("Subtotal (1 item):"),
            "missing subtotal:\n{output}"
        );
        assert!(
            output.contains("Discount (SALE10):"),
            "missing discount:\n{output}"
        );
        assert!(output.contains("Total:"), "missing total:\n{output}");

        Ok(())
    }

    #[test]
    fn discount_line_only_with_coupon() -> TestResult {
        let mut cart = Cart::load(MemoryStore::new(), &CartSettings::default());

        cart.add_item(&Product::new(1, "Cap", 90_000, "x"), "One", "Blue");

        let output = render(&cart, None)?;

        assert!(
            !output.contains("Discount"),
            "unexpected discount:\n{output}"
        );
        assert!(
            !output.contains("(was "),
            "unexpected original price:\n{output}"
        );

        Ok(())
    }

    #[test]
    fn subtotal_label_counts_distinct_lines() -> TestResult {
        let mut cart = Cart::load(MemoryStore::new(), &CartSettings::default());

        cart.add_item(&Product::new(1, "Cap", 90_000, "x"), "One", "Blue");
        cart.add_item(&Product::new(1, "Cap", 90_000, "x"), "One", "Red");
        cart.add_item(&Product::new(1, "Cap", 90_000, "x"), "One", "Red");

        let output = render(&cart, None)?;

        assert!(
            output.contains("Subtotal (2 items):"),
            "expected two lines in label:\n{output}"
        );

        Ok(())
    }

    #[test]
    fn summary_accessor_matches_cart() {
        let mut cart = Cart::load(MemoryStore::new(), &CartSettings::default());

        cart.add_item(&Product::new(1, "Cap", 90_000, "x"), "One", "Blue");

        assert_eq!(
            Receipt::from_cart(&cart, None).summary(),
            &cart.summary(None)
        );
    }
}
