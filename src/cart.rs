//! Cart
//!
//! The cart aggregate is the single owner of the line items. Every mutation
//! goes through it, is written back to the store in full, and may raise a
//! notification for the presentation layer.

use std::num::NonZeroU32;

use rusty_money::{Money, iso::Currency};
use tracing::{debug, error, warn};

use crate::{
    clock::{Clock, SystemClock},
    config::CartSettings,
    items::{self, CartItem, LineKey},
    notifications::{Notification, NotificationKind, Notifier},
    pricing::to_money,
    products::Product,
    storage::KeyValueStore,
    summary::{CartSummary, Coupon},
};

/// Message shown after an item is added.
pub const ITEM_ADDED_MESSAGE: &str = "Item added to cart!";

/// Message shown after an item is removed.
pub const ITEM_REMOVED_MESSAGE: &str = "Item removed from cart";

/// Message shown after the cart is emptied.
pub const CART_CLEARED_MESSAGE: &str = "Cart has been emptied";

/// Shopping cart backed by a key-value store.
#[derive(Debug)]
pub struct Cart<S, C = SystemClock> {
    items: Vec<CartItem>,
    store: S,
    storage_key: String,
    currency: &'static Currency,
    shipping_fee: u64,
    notifier: Notifier<C>,
}

impl<S: KeyValueStore> Cart<S> {
    /// Loads the cart from `store` using the wall clock for notifications.
    pub fn load(store: S, settings: &CartSettings) -> Self {
        Self::load_with_clock(store, SystemClock, settings)
    }
}

impl<S: KeyValueStore, C: Clock> Cart<S, C> {
    /// Loads the cart from `store`.
    ///
    /// A missing, unreadable or malformed payload yields an empty cart.
    pub fn load_with_clock(store: S, clock: C, settings: &CartSettings) -> Self {
        let items = read_items(&store, &settings.storage_key);

        debug!(
            key = %settings.storage_key,
            lines = items.len(),
            "loaded cart"
        );

        Self {
            items,
            store,
            storage_key: settings.storage_key.clone(),
            currency: settings.currency,
            shipping_fee: settings.shipping_fee,
            notifier: Notifier::new(clock, settings.notification_duration),
        }
    }

    /// Adds one unit of `product` in the given size and color.
    pub fn add_item(&mut self, product: &Product, size: &str, color: &str) {
        self.add_items(product, NonZeroU32::MIN, size, color);
    }

    /// Adds `quantity` units of `product` in the given size and color.
    ///
    /// Merges into the existing line item for the same product, size and
    /// color; otherwise appends a new one.
    pub fn add_items(&mut self, product: &Product, quantity: NonZeroU32, size: &str, color: &str) {
        let key = LineKey::new(product.id.clone(), size, color);

        if let Some(item) = self.find_mut(&key) {
            item.increase_quantity(quantity);
        } else {
            self.items.push(CartItem::new(product, quantity, size, color));
        }

        debug!(
            product = %key.product_id,
            size,
            color,
            quantity = quantity.get(),
            "added to cart"
        );

        self.persist();
        self.notifier
            .show(NotificationKind::Success, ITEM_ADDED_MESSAGE);
    }

    /// Sets the quantity of the line item identified by `key`.
    ///
    /// A quantity below one, or a key with no line item, leaves the cart
    /// untouched.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) {
        let Some(quantity) = NonZeroU32::new(quantity) else {
            return;
        };

        let Some(item) = self.find_mut(key) else {
            return;
        };

        item.set_quantity(quantity);

        debug!(
            product = %key.product_id,
            size = %key.size,
            color = %key.color,
            quantity = quantity.get(),
            "updated cart quantity"
        );

        self.persist();
    }

    /// Removes the line item identified by `key`, if present.
    pub fn remove_item(&mut self, key: &LineKey) {
        let before = self.items.len();

        self.items.retain(|item| !item.matches(key));

        debug!(
            product = %key.product_id,
            size = %key.size,
            color = %key.color,
            removed = before - self.items.len(),
            "removed from cart"
        );

        self.persist();
        self.notifier
            .show(NotificationKind::Info, ITEM_REMOVED_MESSAGE);
    }

    /// Removes every line item.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cleared cart");

        self.persist();
        self.notifier
            .show(NotificationKind::Info, CART_CLEARED_MESSAGE);
    }

    /// Hides the current notification.
    pub fn dismiss_notification(&mut self) {
        self.notifier.dismiss();
    }

    /// The current notification.
    pub fn notification(&self) -> Notification {
        self.notifier.current()
    }

    /// The notifier, for scheduling redraws against its deadline.
    pub fn notifier(&self) -> &Notifier<C> {
        &self.notifier
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the line item identified by `key`.
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        items::item_count(&self.items)
    }

    /// Sum of unit price times quantity over all line items.
    pub fn total_amount(&self) -> u64 {
        items::total_amount(&self.items)
    }

    /// The total as money in the cart currency.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        to_money(self.total_amount(), self.currency)
    }

    /// The cart currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Subtotal, shipping, discount and total for the cart page.
    pub fn summary(&self, coupon: Option<Coupon>) -> CartSummary {
        CartSummary::new(&self.items, self.shipping_fee, coupon)
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the cart, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn find_mut(&mut self, key: &LineKey) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.matches(key))
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(source) => {
                error!("failed to serialize cart: {source}");
                return;
            }
        };

        if let Err(source) = self.store.set(&self.storage_key, payload) {
            error!(key = %self.storage_key, "failed to persist cart: {source}");
        }
    }
}

fn read_items<S: KeyValueStore>(store: &S, key: &str) -> Vec<CartItem> {
    let payload = match store.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(source) => {
            warn!(key, "failed to read stored cart: {source}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(items) => merge_duplicates(items),
        Err(source) => {
            warn!(key, "discarding unreadable stored cart: {source}");
            Vec::new()
        }
    }
}

/// Folds any repeated keys in a stored payload into a single line item.
fn merge_duplicates(stored: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());

    for item in stored {
        let key = item.key();

        match items.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => existing.increase_quantity(item.quantity()),
            None => items.push(item),
        }
    }

    items
}
