//! Cart line item records.

use serde::{Deserialize, Serialize};

use clementine_core::{CartItemId, ProductId, UserId};

use super::Product;

/// A cart line item, either active or saved for later.
///
/// Invariant: at most one item exists per `(user_id, product_id,
/// saved_for_later)` triple. The cart service enforces this by merging
/// quantities on add; nothing else may insert items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    /// Always at least 1; the quantity floor is enforced at the boundary.
    pub quantity: u32,
    /// `true` moves the item to the saved-for-later side list, excluding
    /// it from totals and from cart clearing.
    #[serde(default)]
    pub saved_for_later: bool,
}

/// Fields for inserting a [`CartItem`]; the store assigns the id.
///
/// Built only by the cart service, after the merge check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default)]
    pub saved_for_later: bool,
}

impl NewCartItem {
    /// Attach a freshly assigned id, producing the stored record.
    #[must_use]
    pub fn into_cart_item(self, id: CartItemId) -> CartItem {
        CartItem {
            id,
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity,
            saved_for_later: self.saved_for_later,
        }
    }
}

/// A cart item joined with its product snapshot at read time.
///
/// The product is enrichment: if its record cannot be fetched (deleted
/// after the item was added, or a store hiccup on the join read), the item
/// is still returned with `product: null` rather than failing the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemWithProduct {
    #[serde(flatten)]
    pub item: CartItem,
    pub product: Option<Product>,
}
