//! Order summary shown on the cart and checkout pages.

use atelier_core::types::price::round_cents;
use atelier_core::{Cart, CurrencyCode, Price, Quantity};
use rust_decimal::Decimal;

/// Flat shipping fee applied to any non-empty order.
pub const DEFAULT_FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Shipping and tax rules for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub flat_shipping: Decimal,
    pub tax_rate: Decimal,
    pub currency: CurrencyCode,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            flat_shipping: DEFAULT_FLAT_SHIPPING,
            tax_rate: DEFAULT_TAX_RATE,
            currency: CurrencyCode::USD,
        }
    }
}

/// Subtotal, shipping, tax and total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub item_count: Quantity,
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Price `cart` under `policy`.
    ///
    /// Shipping is charged only when the cart holds at least one unit. Tax is
    /// rounded to cents before it is added to the total. Amounts beyond the
    /// `Decimal` range are clamped.
    #[must_use]
    pub fn compute(cart: &Cart, policy: &PricingPolicy) -> Self {
        let item_count = cart.total_items();
        let subtotal = cart.total_price();
        let shipping = if item_count > 0 {
            policy.flat_shipping
        } else {
            Decimal::ZERO
        };
        let tax = round_cents(subtotal.saturating_mul(policy.tax_rate));
        let total = subtotal.saturating_add(shipping).saturating_add(tax);

        let price = |amount| Price::new(amount, policy.currency);
        Self {
            item_count,
            subtotal: price(subtotal),
            shipping: price(shipping),
            tax: price(tax),
            total: price(total),
        }
    }
}
