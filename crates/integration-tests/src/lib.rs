//! Integration tests for Atelier.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart operations, totals and change notifications
//! - `cart_persistence` - Persisted slot round trips and recovery from bad data
//!
//! Shared fixtures live here so both suites build carts the same way.

use std::path::PathBuf;

use atelier_core::Product;
use rust_decimal::Decimal;

/// A product with a whole-unit price.
#[must_use]
pub fn product(id: &str, price: i64) -> Product {
    Product::new(id, format!("Product {id}"), Decimal::new(price, 0))
        .with_description(format!("Description of {id}"))
        .with_images(vec![format!("https://placehold.co/100x100?text={id}")])
        .with_category("Prints")
}

/// A fresh, not yet created directory under the system temp dir.
#[must_use]
pub fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("atelier-{label}-{}", uuid::Uuid::new_v4()))
}
