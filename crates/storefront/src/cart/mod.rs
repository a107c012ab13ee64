//! Cart service: the consistency manager for cart line items.
//!
//! Every cart-state transition goes through this service so the
//! one-item-per-`(user, product, saved)` invariant holds. Adds merge into
//! an existing row instead of inserting a second one; per-user async locks
//! serialize the read-then-write merge so two concurrent adds cannot race
//! each other into duplicate rows.
//!
//! State machine per item: `Active <-> Saved` via
//! [`CartService::save_for_later`] / [`CartService::move_to_cart`], and
//! either state can be removed. Creation starts in whichever state was
//! requested (active by default).

pub mod pricing;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{instrument, warn};

use clementine_core::{CartItemId, ProductId, UserId};

use crate::models::{CartItem, CartItemWithProduct, NewCartItem};
use crate::store::{SharedStore, StoreError};

pub use pricing::CartTotals;

/// Errors surfaced by cart operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Quantities are floored at 1; zero means "remove", which is its own
    /// operation.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The cart item id did not resolve.
    #[error("cart item {0} not found")]
    ItemNotFound(CartItemId),

    /// An add referenced a product that does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Mediates cart-state transitions against the entity store.
pub struct CartService {
    store: SharedStore,
    user_locks: Mutex<HashMap<UserId, Arc<tokio::sync::Mutex<()>>>>,
}

impl CartService {
    /// Create a service over the configured store backend.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The mutex serializing cart mutations for one user.
    fn user_lock(&self, user_id: UserId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .user_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id).or_default().clone()
    }

    /// Join an item with its product snapshot at read time.
    ///
    /// The product is enrichment: a failed join read logs and degrades to
    /// `product: null` instead of failing the whole request.
    async fn join(&self, item: CartItem) -> CartItemWithProduct {
        let product = match self.store.get_product(item.product_id).await {
            Ok(product) => {
                if product.is_none() {
                    warn!(item_id = %item.id, product_id = %item.product_id, "cart item references missing product");
                }
                product
            }
            Err(error) => {
                warn!(item_id = %item.id, %error, "product join read failed");
                None
            }
        };
        CartItemWithProduct { item, product }
    }

    /// Add a product to the user's cart (or saved list).
    ///
    /// Merges with the existing `(user, product, saved)` row by summing
    /// quantities; inserts otherwise. Runs under the user's cart lock so
    /// concurrent adds for the same key cannot both take the insert path.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for a zero quantity, `ProductNotFound` if the
    /// product id does not resolve, or a store failure.
    #[instrument(skip(self))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        saved_for_later: bool,
    ) -> Result<CartItemWithProduct, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let product = self
            .store
            .get_product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;

        let existing = self
            .store
            .find_cart_item(user_id, product_id, saved_for_later)
            .await?;

        let item = if let Some(existing) = existing {
            let merged = self
                .store
                .set_cart_item_quantity(existing.id, existing.quantity + quantity)
                .await?;
            match merged {
                Some(item) => item,
                // The row vanished between find and update; create anew.
                None => {
                    self.store
                        .insert_cart_item(NewCartItem {
                            user_id,
                            product_id,
                            quantity,
                            saved_for_later,
                        })
                        .await?
                }
            }
        } else {
            self.store
                .insert_cart_item(NewCartItem {
                    user_id,
                    product_id,
                    quantity,
                    saved_for_later,
                })
                .await?
        };

        Ok(CartItemWithProduct {
            item,
            product: Some(product),
        })
    }

    /// Overwrite an item's quantity; `saved_for_later` is untouched.
    ///
    /// # Errors
    ///
    /// `InvalidQuantity` for a zero quantity (the stored quantity is left
    /// unchanged), `ItemNotFound` for an unknown id, or a store failure.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItemWithProduct, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let item = self
            .store
            .set_cart_item_quantity(item_id, quantity)
            .await?
            .ok_or(CartError::ItemNotFound(item_id))?;
        Ok(self.join(item).await)
    }

    /// Remove an item, active or saved.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id does not resolve - removing twice
    /// reports the second removal rather than silently succeeding.
    #[instrument(skip(self))]
    pub async fn remove(&self, item_id: CartItemId) -> Result<(), CartError> {
        if self.store.delete_cart_item(item_id).await? {
            Ok(())
        } else {
            Err(CartError::ItemNotFound(item_id))
        }
    }

    /// Delete every active item for the user; saved items are untouched.
    /// Succeeds as a no-op when the cart is already empty.
    ///
    /// # Errors
    ///
    /// Only on store failure.
    #[instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<(), CartError> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        self.store.clear_cart(user_id).await?;
        Ok(())
    }

    /// Move an active item to the saved-for-later list.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id does not resolve.
    #[instrument(skip(self))]
    pub async fn save_for_later(
        &self,
        item_id: CartItemId,
    ) -> Result<CartItemWithProduct, CartError> {
        let item = self
            .store
            .set_cart_item_saved(item_id, true)
            .await?
            .ok_or(CartError::ItemNotFound(item_id))?;
        Ok(self.join(item).await)
    }

    /// Move a saved item back to the active cart.
    ///
    /// Flips the flag only - it does not merge with an existing active row
    /// for the same product, so callers can observe two active rows after
    /// a save/add/move sequence. [`CartService::add_to_cart`] remains the
    /// only merging entry point.
    ///
    /// # Errors
    ///
    /// `ItemNotFound` when the id does not resolve.
    #[instrument(skip(self))]
    pub async fn move_to_cart(
        &self,
        item_id: CartItemId,
    ) -> Result<CartItemWithProduct, CartError> {
        let item = self
            .store
            .set_cart_item_saved(item_id, false)
            .await?
            .ok_or(CartError::ItemNotFound(item_id))?;
        Ok(self.join(item).await)
    }

    /// Active items for the user, joined with their products.
    ///
    /// # Errors
    ///
    /// Only on store failure; missing products degrade per [`Self::join`].
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartItemWithProduct>, CartError> {
        let items = self.store.list_cart_items(user_id).await?;
        let mut joined = Vec::with_capacity(items.len());
        for item in items {
            joined.push(self.join(item).await);
        }
        Ok(joined)
    }

    /// Saved-for-later items for the user, joined with their products.
    ///
    /// # Errors
    ///
    /// Only on store failure; missing products degrade per [`Self::join`].
    pub async fn list_saved(&self, user_id: UserId) -> Result<Vec<CartItemWithProduct>, CartError> {
        let items = self.store.list_saved_items(user_id).await?;
        let mut joined = Vec::with_capacity(items.len());
        for item in items {
            joined.push(self.join(item).await);
        }
        Ok(joined)
    }

    /// Derived totals over the user's active items. Recomputed on every
    /// call, never persisted.
    ///
    /// # Errors
    ///
    /// Only on store failure.
    pub async fn totals(&self, user_id: UserId) -> Result<CartTotals, CartError> {
        let items = self.list(user_id).await?;
        Ok(CartTotals::compute(&items))
    }
}
