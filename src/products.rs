//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque product identifier.
///
/// Deserializes from either a JSON string or a non-negative JSON integer and
/// always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawProductId", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Number(u64),
}

impl From<RawProductId> for ProductId {
    fn from(raw: RawProductId) -> Self {
        match raw {
            RawProductId::Text(id) => Self(id),
            RawProductId::Number(id) => Self::from(id),
        }
    }
}

/// A product as offered to the cart.
///
/// Prices are in the smallest unit of the cart currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Current unit price
    #[serde(rename = "price")]
    pub unit_price: u64,

    /// Pre-discount unit price, for display only
    #[serde(
        rename = "originalPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_unit_price: Option<u64>,

    /// Image reference
    pub image: String,
}

impl Product {
    /// Creates a product with no original price.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: u64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            original_unit_price: None,
            image: image.into(),
        }
    }

    /// Sets the pre-discount unit price.
    #[must_use]
    pub fn with_original_price(mut self, original_unit_price: u64) -> Self {
        self.original_unit_price = Some(original_unit_price);
        self
    }
}
