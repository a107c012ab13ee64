//! Remote document store backend.
//!
//! Speaks the JSON-per-document REST dialect of hosted document databases:
//! each collection lives under `{base}/{collection}.json` as an object
//! keyed by id, and each record under `{base}/{collection}/{id}.json`.
//! Missing documents read as JSON `null`.
//!
//! Filtering and scanning happen client-side over whole-collection reads;
//! the catalog is small enough that this matches how the store is indexed.
//! Multi-step writes (slug checks, id allocation) rely on the system's
//! single-writer-per-record assumption.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use clementine_core::{CartItemId, CategoryId, ProductId, Slug, UserId};

use crate::models::{
    CartItem, Category, NewCartItem, NewCategory, NewProduct, NewUser, Product, ProductPatch, User,
};

use super::{EntityStore, StoreError};

const USERS: &str = "users";
const CATEGORIES: &str = "categories";
const PRODUCTS: &str = "products";
const CART_ITEMS: &str = "cart_items";

/// Client for a remote document database implementing [`EntityStore`].
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct RemoteStore {
    inner: Arc<RemoteStoreInner>,
}

struct RemoteStoreInner {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<SecretString>,
}

impl RemoteStore {
    /// Create a new client for the document store at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, auth_token: Option<SecretString>) -> Self {
        Self {
            inner: Arc::new(RemoteStoreInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_owned(),
                auth_token,
            }),
        }
    }

    /// Build the URL for a document path, appending the auth token when
    /// one is configured.
    fn url(&self, path: &str) -> String {
        let base = format!("{}/{path}.json", self.inner.base_url);
        match &self.inner.auth_token {
            Some(token) => format!("{base}?auth={}", token.expose_secret()),
            None => base,
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let body = response.error_for_status()?.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| StoreError::Corrupted(e.to_string()))
    }

    /// Read an entire collection. A missing collection reads as `null`,
    /// which maps to an empty list.
    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        debug!(collection, "fetching collection");
        let response = self.inner.client.get(self.url(collection)).send().await?;
        let documents: Option<std::collections::BTreeMap<String, T>> =
            Self::decode(response).await?;
        Ok(documents.map(|map| map.into_values().collect()).unwrap_or_default())
    }

    async fn fetch_doc<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: i32,
    ) -> Result<Option<T>, StoreError> {
        debug!(collection, id, "fetching document");
        let response = self
            .inner
            .client
            .get(self.url(&format!("{collection}/{id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn put_doc<T: Serialize + Sync>(
        &self,
        collection: &str,
        id: i32,
        document: &T,
    ) -> Result<(), StoreError> {
        debug!(collection, id, "writing document");
        self.inner
            .client
            .put(self.url(&format!("{collection}/{id}")))
            .json(document)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &str, id: i32) -> Result<(), StoreError> {
        debug!(collection, id, "deleting document");
        self.inner
            .client
            .delete(self.url(&format!("{collection}/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Fresh id over live documents: `max + 1`, or 1 for an empty collection.
fn next_id<T>(documents: &[T], id_of: impl Fn(&T) -> i32) -> i32 {
    documents.iter().map(id_of).max().unwrap_or(0) + 1
}

#[async_trait]
impl EntityStore for RemoteStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.fetch_doc(USERS, id.as_i32()).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.fetch_collection(USERS).await?;
        Ok(users.into_iter().find(|user| user.username == username))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let users: Vec<User> = self.fetch_collection(USERS).await?;

        if users.iter().any(|user| user.username == new_user.username) {
            return Err(StoreError::DuplicateUser(new_user.username));
        }
        if users.iter().any(|user| user.email == new_user.email) {
            return Err(StoreError::DuplicateUser(new_user.email.into_inner()));
        }

        let id = UserId::new(next_id(&users, |user| user.id.as_i32()));
        let user = new_user.into_user(id);
        self.put_doc(USERS, id.as_i32(), &user).await?;
        Ok(user)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self.fetch_collection(CATEGORIES).await?;
        categories.sort_by_key(|category| category.id);
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.fetch_doc(CATEGORIES, id.as_i32()).await
    }

    async fn get_category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        let categories: Vec<Category> = self.fetch_collection(CATEGORIES).await?;
        Ok(categories.into_iter().find(|category| &category.slug == slug))
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category, StoreError> {
        let categories: Vec<Category> = self.fetch_collection(CATEGORIES).await?;

        if categories
            .iter()
            .any(|category| category.slug == new_category.slug)
        {
            return Err(StoreError::DuplicateSlug(new_category.slug));
        }
        if let Some(parent_id) = new_category.parent_id
            && !categories.iter().any(|category| category.id == parent_id)
        {
            return Err(StoreError::MissingParent(parent_id));
        }

        let id = CategoryId::new(next_id(&categories, |category| category.id.as_i32()));
        let category = new_category.into_category(id);
        self.put_doc(CATEGORIES, id.as_i32(), &category).await?;
        Ok(category)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.fetch_collection(PRODUCTS).await?;
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        self.fetch_doc(PRODUCTS, id.as_i32()).await
    }

    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError> {
        let products: Vec<Product> = self.fetch_collection(PRODUCTS).await?;
        Ok(products.into_iter().find(|product| &product.slug == slug))
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product, StoreError> {
        let products: Vec<Product> = self.fetch_collection(PRODUCTS).await?;

        if products.iter().any(|product| product.slug == new_product.slug) {
            return Err(StoreError::DuplicateSlug(new_product.slug));
        }

        let id = ProductId::new(next_id(&products, |product| product.id.as_i32()));
        let product = new_product.into_product(id);
        self.put_doc(PRODUCTS, id.as_i32(), &product).await?;
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let Some(mut product) = self.fetch_doc::<Product>(PRODUCTS, id.as_i32()).await? else {
            return Ok(None);
        };

        if let Some(new_slug) = &patch.slug
            && new_slug != &product.slug
        {
            let products: Vec<Product> = self.fetch_collection(PRODUCTS).await?;
            if products
                .iter()
                .any(|other| &other.slug == new_slug && other.id != id)
            {
                return Err(StoreError::DuplicateSlug(new_slug.clone()));
            }
        }

        patch.apply_to(&mut product);
        self.put_doc(PRODUCTS, id.as_i32(), &product).await?;
        Ok(Some(product))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        if self.fetch_doc::<Product>(PRODUCTS, id.as_i32()).await?.is_none() {
            return Ok(false);
        }
        self.delete_doc(PRODUCTS, id.as_i32()).await?;
        Ok(true)
    }

    async fn list_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError> {
        let mut items: Vec<CartItem> = self.fetch_collection(CART_ITEMS).await?;
        items.retain(|item| item.user_id == user_id && !item.saved_for_later);
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn list_saved_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError> {
        let mut items: Vec<CartItem> = self.fetch_collection(CART_ITEMS).await?;
        items.retain(|item| item.user_id == user_id && item.saved_for_later);
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>, StoreError> {
        self.fetch_doc(CART_ITEMS, id.as_i32()).await
    }

    async fn find_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError> {
        let items: Vec<CartItem> = self.fetch_collection(CART_ITEMS).await?;
        Ok(items.into_iter().find(|item| {
            item.user_id == user_id
                && item.product_id == product_id
                && item.saved_for_later == saved_for_later
        }))
    }

    async fn insert_cart_item(&self, new_item: NewCartItem) -> Result<CartItem, StoreError> {
        let items: Vec<CartItem> = self.fetch_collection(CART_ITEMS).await?;
        let id = CartItemId::new(next_id(&items, |item| item.id.as_i32()));
        let item = new_item.into_cart_item(id);
        self.put_doc(CART_ITEMS, id.as_i32(), &item).await?;
        Ok(item)
    }

    async fn set_cart_item_quantity(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<Option<CartItem>, StoreError> {
        let Some(mut item) = self.fetch_doc::<CartItem>(CART_ITEMS, id.as_i32()).await? else {
            return Ok(None);
        };
        item.quantity = quantity;
        self.put_doc(CART_ITEMS, id.as_i32(), &item).await?;
        Ok(Some(item))
    }

    async fn set_cart_item_saved(
        &self,
        id: CartItemId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError> {
        let Some(mut item) = self.fetch_doc::<CartItem>(CART_ITEMS, id.as_i32()).await? else {
            return Ok(None);
        };
        item.saved_for_later = saved_for_later;
        self.put_doc(CART_ITEMS, id.as_i32(), &item).await?;
        Ok(Some(item))
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<bool, StoreError> {
        if self
            .fetch_doc::<CartItem>(CART_ITEMS, id.as_i32())
            .await?
            .is_none()
        {
            return Ok(false);
        }
        self.delete_doc(CART_ITEMS, id.as_i32()).await?;
        Ok(true)
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<usize, StoreError> {
        let items: Vec<CartItem> = self.fetch_collection(CART_ITEMS).await?;
        let mut removed = 0;
        for item in items {
            if item.user_id == user_id && !item.saved_for_later {
                self.delete_doc(CART_ITEMS, item.id.as_i32()).await?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let store = RemoteStore::new("https://docs.example.com/store/", None);
        assert_eq!(
            store.url("products/3"),
            "https://docs.example.com/store/products/3.json"
        );

        let store = RemoteStore::new(
            "https://docs.example.com/store",
            Some(SecretString::from("tok".to_owned())),
        );
        assert_eq!(
            store.url("products"),
            "https://docs.example.com/store/products.json?auth=tok"
        );
    }

    #[test]
    fn test_next_id_over_live_documents() {
        assert_eq!(next_id::<i32>(&[], |id| *id), 1);
        assert_eq!(next_id(&[1, 5, 3], |id| *id), 6);
    }
}
