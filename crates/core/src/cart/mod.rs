//! The shopping cart aggregate.
//!
//! [`Cart`] is the plain ordered collection of [`CartItem`]s with the merge
//! semantics; [`CartStore`] owns a cart, applies the mutations and announces
//! each effective change to its [`CartObserver`]s.
//!
//! ```rust
//! use atelier_core::{CartStore, Product};
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::default();
//! store.add_item(Product::new("A", "Sketch", Decimal::new(10, 0)), 2);
//! store.add_item(Product::new("B", "Print", Decimal::new(5, 0)), 1);
//! store.add_item(Product::new("A", "Sketch", Decimal::new(10, 0)), 3);
//!
//! assert_eq!(store.total_items(), 6);
//! assert_eq!(store.total_price(), Decimal::new(55, 0));
//! ```

mod event;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use event::{CartEvent, CartObserver};

use crate::types::{Product, ProductId};

/// Item quantity.
///
/// Signed because `update_quantity` stores whatever the caller passes,
/// including zero and negative values.
pub type Quantity = i64;

/// A product snapshot paired with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    #[must_use]
    pub const fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    /// Snapshot price times quantity, clamped to the `Decimal` range.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Ordered cart contents, at most one item per product id.
///
/// Items keep the order in which their products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from previously stored items.
    ///
    /// Later items repeating an earlier product id are dropped.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.product.id.clone()))
            .collect();
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    #[must_use]
    pub fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id.as_str() == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all items (not the number of distinct items).
    ///
    /// Saturates at the bounds of [`Quantity`].
    #[must_use]
    pub fn total_items(&self) -> Quantity {
        self.items
            .iter()
            .fold(0, |total: Quantity, item| total.saturating_add(item.quantity))
    }

    /// Sum of snapshot price times quantity across all items.
    ///
    /// Saturates at the bounds of `Decimal`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| {
                total.saturating_add(item.line_total())
            })
    }

    /// Add `quantity` units of `product`, merging into an existing item.
    ///
    /// Non-positive quantities are ignored. When the product is already in
    /// the cart, the stored snapshot is kept and only the quantity grows.
    pub fn add_item(&mut self, product: Product, quantity: Quantity) -> Option<CartEvent> {
        if quantity <= 0 {
            return None;
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return Some(CartEvent::ItemMerged {
                product_id: product.id,
                quantity: item.quantity,
            });
        }

        let product_id = product.id.clone();
        self.items.push(CartItem::new(product, quantity));
        Some(CartEvent::ItemAdded {
            product_id,
            quantity,
        })
    }

    /// Overwrite the quantity of the matching item, without validation.
    pub fn update_quantity(&mut self, product_id: &str, quantity: Quantity) -> Option<CartEvent> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.product.id.as_str() == product_id)?;
        item.quantity = quantity;
        Some(CartEvent::QuantityUpdated {
            product_id: item.product.id.clone(),
            quantity,
        })
    }

    pub fn remove_item(&mut self, product_id: &str) -> Option<CartEvent> {
        let index = self.position(product_id)?;
        let removed = self.items.remove(index);
        Some(CartEvent::ItemRemoved {
            product_id: removed.product.id,
        })
    }

    /// Remove every item. Clearing an empty cart still reports `Cleared`.
    pub fn clear(&mut self) -> CartEvent {
        self.items.clear();
        CartEvent::Cleared
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.id.as_str() == product_id)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The cart plus the observers that want to hear about its changes.
///
/// Owned by the application's composition root and passed by reference to
/// whatever needs to read or mutate the cart.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
    next_subscription: u64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl CartStore {
    /// Create a store around an existing (typically restored) cart.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register an observer for all subsequent changes.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Drop an observer. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn total_items(&self) -> Quantity {
        self.cart.total_items()
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    pub fn add_item(&mut self, product: Product, quantity: Quantity) {
        let event = self.cart.add_item(product, quantity);
        if event.is_none() {
            tracing::debug!(quantity, "ignoring add with non-positive quantity");
        }
        self.emit(event);
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: Quantity) {
        let event = self.cart.update_quantity(product_id, quantity);
        self.emit(event);
    }

    pub fn remove_item(&mut self, product_id: &str) {
        let event = self.cart.remove_item(product_id);
        self.emit(event);
    }

    pub fn clear(&mut self) {
        let event = self.cart.clear();
        self.emit(Some(event));
    }

    /// Consume the store, returning the cart.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    fn emit(&mut self, event: Option<CartEvent>) {
        let Some(event) = event else {
            return;
        };

        tracing::debug!(
            event = event.kind(),
            product_id = event.product_id().map(ProductId::as_str),
            total_items = self.cart.total_items(),
            "cart changed"
        );

        for (_, observer) in &mut self.observers {
            observer.on_cart_event(&event, &self.cart);
        }
    }
}
