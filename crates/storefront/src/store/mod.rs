//! Entity store: the single owner of persisted records.
//!
//! All other components receive copies and never mutate store state except
//! through the operations defined here. Two interchangeable backends
//! implement the same contract:
//!
//! - [`MemoryStore`] - `RwLock`-guarded maps, for development and tests
//! - [`RemoteStore`] - a networked document database spoken over JSON REST
//!
//! Backend selection happens once, in `main`, from configuration; every
//! component downstream depends only on the [`EntityStore`] trait.

pub mod memory;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;

use clementine_core::{CartItemId, CategoryId, ProductId, Slug, UserId};

use crate::models::{
    CartItem, Category, NewCartItem, NewCategory, NewProduct, NewUser, Product, ProductPatch, User,
};

pub use memory::MemoryStore;
pub use remote::RemoteStore;

/// Errors surfaced by store operations.
///
/// Constraint violations (`DuplicateSlug`, `DuplicateUser`,
/// `MissingParent`) map to validation failures at the API boundary;
/// `Transport` and `Corrupted` are 500-class persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A product or category slug is already taken.
    #[error("slug already in use: {0}")]
    DuplicateSlug(Slug),

    /// A username or email is already taken.
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    /// A category referenced a parent that does not exist.
    #[error("parent category {0} does not exist")]
    MissingParent(CategoryId),

    /// The backing document store could not be reached.
    #[error("document store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A stored record did not match its expected shape.
    #[error("corrupted record: {0}")]
    Corrupted(String),
}

/// Shared handle to the configured store backend.
pub type SharedStore = Arc<dyn EntityStore>;

/// Persistence contract for the four record kinds.
///
/// Reads of missing ids return `Ok(None)`; deletes of missing ids return
/// `Ok(false)`. Id assignment is the backend's concern: fresh ids are
/// `max(existing) + 1` (1 for an empty collection) and are not reused
/// after deletion.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // User operations

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// # Errors
    ///
    /// `DuplicateUser` if the username or email is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    // Category operations

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    async fn get_category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError>;

    /// # Errors
    ///
    /// `DuplicateSlug` if the slug is taken; `MissingParent` if
    /// `parent_id` does not resolve (which also rules out self-parenting).
    async fn create_category(&self, new_category: NewCategory) -> Result<Category, StoreError>;

    // Product operations

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError>;

    /// # Errors
    ///
    /// `DuplicateSlug` if the slug is taken.
    async fn create_product(&self, new_product: NewProduct) -> Result<Product, StoreError>;

    /// Apply a partial update. Returns `None` if the id does not resolve.
    ///
    /// # Errors
    ///
    /// `DuplicateSlug` if the patch renames the slug onto a taken one.
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError>;

    async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError>;

    // Cart item operations

    /// Active (not saved-for-later) items for a user.
    async fn list_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError>;

    /// Saved-for-later items for a user.
    async fn list_saved_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError>;

    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>, StoreError>;

    /// Look up the unique item for a `(user, product, saved)` key, if any.
    async fn find_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError>;

    /// Insert without any merge check; callers go through the cart
    /// service, which owns the uniqueness invariant.
    async fn insert_cart_item(&self, new_item: NewCartItem) -> Result<CartItem, StoreError>;

    /// Overwrite the quantity. Returns `None` if the id does not resolve.
    async fn set_cart_item_quantity(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<Option<CartItem>, StoreError>;

    /// Flip the saved-for-later flag. Returns `None` if the id does not
    /// resolve.
    async fn set_cart_item_saved(
        &self,
        id: CartItemId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError>;

    async fn delete_cart_item(&self, id: CartItemId) -> Result<bool, StoreError>;

    /// Delete every active item for the user. Saved items are untouched.
    /// Returns the number of items removed; an empty cart is a no-op.
    async fn clear_cart(&self, user_id: UserId) -> Result<usize, StoreError>;
}
