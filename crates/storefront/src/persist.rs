//! The cart's persisted slot.
//!
//! [`CartPersistence`] is a [`CartObserver`] that writes the whole cart into
//! one storage slot after every change, and the loader that reads it back on
//! start-up.
//!
//! # Slot layout
//!
//! ```json
//! {"state":{"items":[{"product":{"id":"A","name":"Sketch","description":"",
//!   "price":"10","images":[],"category":""},"quantity":5}]},"version":0}
//! ```
//!
//! Loading never fails. A missing slot, unparseable JSON or an unknown
//! `version` all yield an empty cart; individual items that do not decode,
//! fail product validation or repeat an earlier product id are dropped.

use std::collections::HashSet;

use atelier_core::{Cart, CartEvent, CartItem, CartObserver, CartStore, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{KeyValueStorage, StorageError};

/// Slot name used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cart-storage";

/// Layout version written to, and required from, the slot.
pub const SLOT_VERSION: u32 = 0;

/// Errors that can occur when saving the cart.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SlotRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct StoredSlot {
    state: StoredState,
    #[serde(default)]
    version: u32,
}

#[derive(Deserialize)]
struct StoredState {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// Serialize `cart` into the slot layout.
///
/// # Errors
///
/// Returns a `serde_json` error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SlotRef {
        state: StateRef {
            items: cart.items(),
        },
        version: SLOT_VERSION,
    })
}

/// Rebuild a cart from slot contents, keeping every valid item.
#[must_use]
pub fn decode(raw: &str) -> Cart {
    let slot: StoredSlot = match serde_json::from_str(raw) {
        Ok(slot) => slot,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable cart slot");
            return Cart::new();
        }
    };

    if slot.version != SLOT_VERSION {
        tracing::warn!(
            found = slot.version,
            expected = SLOT_VERSION,
            "Discarding cart slot with unknown version"
        );
        return Cart::new();
    }

    let mut items: Vec<CartItem> = Vec::with_capacity(slot.state.items.len());
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(slot.state.items.len());
    for (index, value) in slot.state.items.into_iter().enumerate() {
        let item = match serde_json::from_value::<CartItem>(value) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping malformed cart item");
                continue;
            }
        };

        if !item.product.is_valid() {
            tracing::warn!(index, product_id = %item.product.id, "Dropping invalid cart item");
            continue;
        }

        if !seen.insert(item.product.id.clone()) {
            tracing::warn!(index, product_id = %item.product.id, "Dropping duplicate cart item");
            continue;
        }

        items.push(item);
    }

    Cart::from_items(items)
}

/// Keeps a storage slot in sync with the cart.
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Use the default slot name.
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Restore the cart from the slot, or an empty cart if that fails.
    #[must_use]
    pub fn load(&self) -> Cart {
        match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => {
                let cart = decode(&raw);
                tracing::debug!(key = %self.key, items = cart.len(), "Cart restored");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Cart slot unavailable, starting empty");
                Cart::new()
            }
        }
    }

    /// Write `cart` to the slot.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if serialization or the storage write fails.
    pub fn save(&mut self, cart: &Cart) -> Result<(), PersistError> {
        let raw = encode(cart)?;
        self.storage.set_item(&self.key, &raw)?;
        Ok(())
    }

    /// Empty the slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the storage backend fails.
    pub fn forget(&mut self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }
}

impl<S: KeyValueStorage + 'static> CartPersistence<S> {
    /// Restore the cart and return a store that saves it after every change.
    #[must_use]
    pub fn into_store(self) -> CartStore {
        let mut store = CartStore::new(self.load());
        store.subscribe(Box::new(self));
        store
    }
}

impl<S: KeyValueStorage> CartObserver for CartPersistence<S> {
    fn on_cart_event(&mut self, event: &CartEvent, cart: &Cart) {
        if let Err(e) = self.save(cart) {
            tracing::error!(
                key = %self.key,
                event = event.kind(),
                error = %e,
                "Failed to persist cart"
            );
        }
    }
}
