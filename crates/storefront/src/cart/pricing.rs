//! Derived cart pricing.
//!
//! Totals are pure functions of the active-cart snapshot, recomputed on
//! every read and never persisted. The promotional discount here is
//! unrelated to a product's `list_price` ("was" price); the two concepts
//! are deliberately kept apart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::round_to_cents;

use crate::models::CartItemWithProduct;

/// Flat promotional discount applied to the subtotal.
pub const PROMO_DISCOUNT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Flat tax applied to the discounted subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Totals derived from the current active cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of `price x quantity` over active items. Not rounded.
    pub subtotal: Decimal,
    /// 5% of the subtotal, rounded half away from zero to cents.
    pub discount: Decimal,
    /// 10% of the discounted subtotal, rounded half away from zero to
    /// cents.
    pub tax: Decimal,
    /// `subtotal - discount + tax`.
    pub total: Decimal,
}

impl CartTotals {
    /// Compute totals over a joined cart snapshot.
    ///
    /// Items whose product join degraded to `null` cannot be priced and
    /// contribute nothing.
    #[must_use]
    pub fn compute(items: &[CartItemWithProduct]) -> Self {
        let subtotal: Decimal = items
            .iter()
            .filter_map(|joined| {
                joined
                    .product
                    .as_ref()
                    .map(|product| product.price * Decimal::from(joined.item.quantity))
            })
            .sum();

        let discount = round_to_cents(subtotal * PROMO_DISCOUNT_RATE);
        let tax = round_to_cents((subtotal - discount) * TAX_RATE);
        let total = subtotal - discount + tax;

        Self {
            subtotal,
            discount,
            tax,
            total,
        }
    }
}
