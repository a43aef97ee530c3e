//! Trolley
//!
//! Trolley is a shopping cart state container: line items merged by product,
//! size and color, derived totals, persistence to a key-value store, and
//! short-lived notifications for the presentation layer.

pub mod cart;
pub mod clock;
pub mod config;
pub mod items;
pub mod notifications;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod storage;
pub mod summary;
