//! Cart change notifications.

use super::{Cart, Quantity};
use crate::types::ProductId;

/// A change applied to the cart.
///
/// Emitted once per effective mutation, after the change is visible in the
/// cart handed to observers. No-op operations emit nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product not previously in the cart was appended.
    ItemAdded {
        product_id: ProductId,
        quantity: Quantity,
    },
    /// More units of a product already in the cart were added.
    ///
    /// `quantity` is the new total for the item.
    ItemMerged {
        product_id: ProductId,
        quantity: Quantity,
    },
    /// The quantity of an item was overwritten.
    QuantityUpdated {
        product_id: ProductId,
        quantity: Quantity,
    },
    /// An item was removed.
    ItemRemoved { product_id: ProductId },
    /// Every item was removed.
    Cleared,
}

impl CartEvent {
    /// The product this event concerns, if it concerns a single one.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        match self {
            Self::ItemAdded { product_id, .. }
            | Self::ItemMerged { product_id, .. }
            | Self::QuantityUpdated { product_id, .. }
            | Self::ItemRemoved { product_id } => Some(product_id),
            Self::Cleared => None,
        }
    }

    /// Short name used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ItemAdded { .. } => "item_added",
            Self::ItemMerged { .. } => "item_merged",
            Self::QuantityUpdated { .. } => "quantity_updated",
            Self::ItemRemoved { .. } => "item_removed",
            Self::Cleared => "cleared",
        }
    }
}

/// Receives cart change notifications.
///
/// Observers run synchronously on the mutating call, in subscription order.
/// They cannot fail the mutation; an observer that does I/O handles its own
/// errors.
pub trait CartObserver {
    /// Called after `event` has been applied to `cart`.
    fn on_cart_event(&mut self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent, &Cart),
{
    fn on_cart_event(&mut self, event: &CartEvent, cart: &Cart) {
        self(event, cart);
    }
}
