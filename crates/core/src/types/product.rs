//! Product snapshot as captured by the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product.
///
/// The cart never looks products up again after they are added: a
/// `CartItem` owns its own copy, so later catalog edits (including price
/// changes) do not affect items already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image references, first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            images: Vec::new(),
            category: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Primary image reference, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the snapshot satisfies the catalog invariants: a non-empty id
    /// and a non-negative price.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !(self.price.is_sign_negative() && !self.price.is_zero())
    }
}
