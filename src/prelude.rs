//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    clock::{Clock, ManualClock, SystemClock},
    config::CartSettings,
    items::{CartItem, LineKey},
    notifications::{Notification, NotificationKind, Notifier},
    products::{Product, ProductId},
    receipt::{Receipt, ReceiptError},
    storage::{FileStore, KeyValueStore, MemoryStore, StoreError},
    summary::{CartSummary, Coupon, CouponError},
};
