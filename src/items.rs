//! Items

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// Identity of a line item: the product plus the chosen size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product identifier
    pub product_id: ProductId,

    /// Chosen size
    pub size: String,

    /// Chosen color
    pub color: String,
}

impl LineKey {
    /// Creates a new line key.
    pub fn new(
        product_id: impl Into<ProductId>,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.into(),
            color: color.into(),
        }
    }
}

/// A single cart entry.
///
/// Serialized with the field names the storefront has always used in local
/// storage, so existing carts keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id")]
    product_id: ProductId,

    name: String,

    #[serde(rename = "price")]
    unit_price: u64,

    #[serde(
        rename = "originalPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    original_unit_price: Option<u64>,

    image: String,

    size: String,

    color: String,

    quantity: NonZeroU32,
}

impl CartItem {
    /// Creates a line item from a product and the chosen options.
    pub fn new(
        product: &Product,
        quantity: NonZeroU32,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            original_unit_price: product.original_unit_price,
            image: product.image.clone(),
            size: size.into(),
            color: color.into(),
            quantity,
        }
    }

    /// Returns true if this item is identified by `key`.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Returns the identity key of the item.
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product_id.clone(),
            self.size.clone(),
            self.color.clone(),
        )
    }

    /// Returns the product identifier
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    /// Returns the pre-discount unit price, if any
    pub fn original_unit_price(&self) -> Option<u64> {
        self.original_unit_price
    }

    /// Returns the image reference
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns the chosen size
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Returns the chosen color
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the quantity
    pub fn quantity(&self) -> NonZeroU32 {
        self.quantity
    }

    /// Adds to the quantity, saturating at `u32::MAX`.
    pub(crate) fn increase_quantity(&mut self, by: NonZeroU32) {
        self.quantity = self.quantity.saturating_add(by.get());
    }

    pub(crate) fn set_quantity(&mut self, quantity: NonZeroU32) {
        self.quantity = quantity;
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> u64 {
        self.unit_price
            .saturating_mul(u64::from(self.quantity.get()))
    }

    /// Per-unit saving against the original price, when there is one.
    pub fn unit_savings(&self) -> Option<u64> {
        self.original_unit_price
            .filter(|original| *original > self.unit_price)
            .map(|original| original - self.unit_price)
    }
}

/// Sum of quantities across `items`.
pub fn item_count(items: &[CartItem]) -> u64 {
    items
        .iter()
        .map(|item| u64::from(item.quantity.get()))
        .sum()
}

/// Sum of line totals across `items`.
pub fn total_amount(items: &[CartItem]) -> u64 {
    items
        .iter()
        .fold(0, |acc: u64, item| acc.saturating_add(item.line_total()))
}
