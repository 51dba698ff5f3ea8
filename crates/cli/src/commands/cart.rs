//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! atelier cart add --id canvas --name "Premium Art Canvas" --price 59.99 -q 2
//!
//! # Overwrite a quantity (zero and negative values are stored as given)
//! atelier cart update canvas 0
//!
//! # Show the cart, or the checkout summary
//! atelier cart show
//! atelier cart summary
//! ```
//!
//! Every mutating command goes through the [`CartStore`], so the persisted
//! slot is rewritten by the store's persistence observer.

use std::fmt::Write as _;

use atelier_core::{Cart, CartStore, Price, PriceError, Product, Quantity};
use atelier_storefront::{AppError, CheckoutSummary, PricingPolicy};
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The `--price` argument is not a usable amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The cart could not be rendered as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CartCommandError> for AppError {
    fn from(err: CartCommandError) -> Self {
        match err {
            CartCommandError::InvalidPrice(e) => Self::BadRequest(e.to_string()),
            CartCommandError::Json(e) => Self::Json(e),
        }
    }
}

/// Fields for the product snapshot taken by `cart add`.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub category: Option<String>,
}

impl ProductInput {
    /// Build the product snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CartCommandError::InvalidPrice`] for malformed or negative prices.
    pub fn into_product(self) -> Result<Product, CartCommandError> {
        let price = Price::parse_amount(&self.price)?;
        let mut product = Product::new(self.id, self.name, price).with_images(self.images);
        if let Some(description) = self.description {
            product = product.with_description(description);
        }
        if let Some(category) = self.category {
            product = product.with_category(category);
        }
        Ok(product)
    }
}

/// Add `quantity` units of the described product.
///
/// # Errors
///
/// Returns an error if the product input is invalid.
pub fn add(
    store: &mut CartStore,
    input: ProductInput,
    quantity: Quantity,
) -> Result<(), CartCommandError> {
    let product = input.into_product()?;
    let product_id = product.id.clone();
    store.add_item(product, quantity);

    match store.cart().item(product_id.as_str()) {
        Some(item) if quantity > 0 => {
            tracing::info!(%product_id, quantity = item.quantity, "Added to cart");
        }
        _ => tracing::warn!(%product_id, quantity, "Nothing added, quantity must be positive"),
    }
    Ok(())
}

pub fn update(store: &mut CartStore, product_id: &str, quantity: Quantity) {
    if store.cart().contains(product_id) {
        store.update_quantity(product_id, quantity);
        tracing::info!(product_id, quantity, "Quantity updated");
    } else {
        tracing::warn!(product_id, "Product is not in the cart");
    }
}

pub fn remove(store: &mut CartStore, product_id: &str) {
    if store.cart().contains(product_id) {
        store.remove_item(product_id);
        tracing::info!(product_id, "Removed from cart");
    } else {
        tracing::warn!(product_id, "Product is not in the cart");
    }
}

pub fn clear(store: &mut CartStore) {
    store.clear();
    tracing::info!("Cart cleared");
}

/// Render the cart as a table, or as the JSON item list.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn show(cart: &Cart, json: bool) -> Result<String, CartCommandError> {
    if json {
        return Ok(serde_json::to_string_pretty(cart.items())?);
    }
    Ok(render_items(cart))
}

#[must_use]
pub fn summary(cart: &Cart, policy: &PricingPolicy) -> String {
    render_summary(&CheckoutSummary::compute(cart, policy))
}

fn render_items(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        let unit = Price::usd(item.product.price);
        let line = Price::usd(item.line_total());
        let _ = writeln!(
            out,
            "{:<20} {:<32} {:>5} x {:>10} = {:>10}",
            item.product.id, item.product.name, item.quantity, unit, line
        );
    }
    let _ = writeln!(
        out,
        "Items: {}  Total: {}",
        cart.total_items(),
        Price::usd(cart.total_price())
    );
    out
}

fn render_summary(summary: &CheckoutSummary) -> String {
    format!(
        "Items ({})\nSubtotal  {:>10}\nShipping  {:>10}\nTax       {:>10}\nTotal     {:>10}\n",
        summary.item_count,
        summary.subtotal.display(),
        summary.shipping.display(),
        summary.tax.display(),
        summary.total.display(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn input(id: &str, price: &str) -> ProductInput {
        ProductInput {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: price.to_string(),
            ..ProductInput::default()
        }
    }

    #[test]
    fn test_into_product() {
        let product = ProductInput {
            description: Some("Cotton".into()),
            images: vec!["a.png".into()],
            category: Some("Supplies".into()),
            ..input("canvas", "59.99")
        }
        .into_product()
        .unwrap();

        assert_eq!(product.price, Decimal::new(5999, 2));
        assert_eq!(product.description, "Cotton");
        assert_eq!(product.primary_image(), Some("a.png"));
        assert_eq!(product.category, "Supplies");
    }

    #[test]
    fn test_error_mapping() {
        let err = AppError::from(input("A", "ten").into_product().unwrap_err());
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(err.is_client_error());

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(CartCommandError::from(json));
        assert!(matches!(err, AppError::Json(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_add_rejects_bad_price() {
        let mut store = CartStore::default();
        assert!(matches!(
            add(&mut store, input("A", "-3"), 1),
            Err(CartCommandError::InvalidPrice(_))
        ));
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_commands_drive_store() {
        let mut store = CartStore::default();
        add(&mut store, input("A", "10"), 2).unwrap();
        add(&mut store, input("B", "5"), 1).unwrap();
        add(&mut store, input("A", "10"), 3).unwrap();
        update(&mut store, "B", 0);
        remove(&mut store, "missing");

        assert_eq!(store.total_items(), 5);
        assert_eq!(store.total_price(), Decimal::new(50, 0));

        clear(&mut store);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_show_empty() {
        assert_eq!(show(&Cart::new(), false).unwrap(), "Your cart is empty\n");
        assert_eq!(show(&Cart::new(), true).unwrap(), "[]");
    }

    #[test]
    fn test_show_lists_items_and_totals() {
        let mut store = CartStore::default();
        add(&mut store, input("A", "10"), 5).unwrap();
        add(&mut store, input("B", "5"), 1).unwrap();

        let out = show(store.cart(), false).unwrap();
        assert!(out.contains("Product A"));
        assert!(out.contains("$50.00"));
        assert!(out.contains("Items: 6  Total: $55.00"));
    }

    #[test]
    fn test_summary_output() {
        let mut store = CartStore::default();
        add(&mut store, input("A", "10"), 5).unwrap();
        add(&mut store, input("B", "5"), 1).unwrap();

        let out = summary(store.cart(), &PricingPolicy::default());
        assert!(out.starts_with("Items (6)\n"));
        assert!(out.contains("$9.99"));
        assert!(out.contains("$4.40"));
        assert!(out.contains("$69.39"));
    }
}
