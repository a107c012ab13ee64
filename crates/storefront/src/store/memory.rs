//! In-memory store backend.
//!
//! Backs the development server and the test suites. All four collections
//! live in `RwLock`-guarded maps; id counters are monotonic, so ids are
//! never reused after deletion.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use clementine_core::{CartItemId, CategoryId, ProductId, Slug, UserId};

use crate::models::{
    CartItem, Category, NewCartItem, NewCategory, NewProduct, NewUser, Product, ProductPatch, User,
};

use super::{EntityStore, StoreError};

/// In-memory implementation of [`EntityStore`].
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

struct Tables {
    users: HashMap<UserId, User>,
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
    cart_items: HashMap<CartItemId, CartItem>,
    next_user_id: i32,
    next_category_id: i32,
    next_product_id: i32,
    next_cart_item_id: i32,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                users: HashMap::new(),
                categories: HashMap::new(),
                products: HashMap::new(),
                cart_items: HashMap::new(),
                next_user_id: 1,
                next_category_id: 1,
                next_product_id: 1,
                next_cart_item_id: 1,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.write();

        if tables
            .users
            .values()
            .any(|user| user.username == new_user.username)
        {
            return Err(StoreError::DuplicateUser(new_user.username));
        }
        if tables.users.values().any(|user| user.email == new_user.email) {
            return Err(StoreError::DuplicateUser(new_user.email.into_inner()));
        }

        let id = UserId::new(tables.next_user_id);
        tables.next_user_id += 1;

        let user = new_user.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self.read().categories.values().cloned().collect();
        categories.sort_by_key(|category| category.id);
        Ok(categories)
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.read().categories.get(&id).cloned())
    }

    async fn get_category_by_slug(&self, slug: &Slug) -> Result<Option<Category>, StoreError> {
        Ok(self
            .read()
            .categories
            .values()
            .find(|category| &category.slug == slug)
            .cloned())
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category, StoreError> {
        let mut tables = self.write();

        if tables
            .categories
            .values()
            .any(|category| category.slug == new_category.slug)
        {
            return Err(StoreError::DuplicateSlug(new_category.slug));
        }
        if let Some(parent_id) = new_category.parent_id
            && !tables.categories.contains_key(&parent_id)
        {
            return Err(StoreError::MissingParent(parent_id));
        }

        let id = CategoryId::new(tables.next_category_id);
        tables.next_category_id += 1;

        let category = new_category.into_category(id);
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let mut products: Vec<Product> = self.read().products.values().cloned().collect();
        products.sort_by_key(|product| product.id);
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read().products.get(&id).cloned())
    }

    async fn get_product_by_slug(&self, slug: &Slug) -> Result<Option<Product>, StoreError> {
        Ok(self
            .read()
            .products
            .values()
            .find(|product| &product.slug == slug)
            .cloned())
    }

    async fn create_product(&self, new_product: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.write();

        if tables
            .products
            .values()
            .any(|product| product.slug == new_product.slug)
        {
            return Err(StoreError::DuplicateSlug(new_product.slug));
        }

        let id = ProductId::new(tables.next_product_id);
        tables.next_product_id += 1;

        let product = new_product.into_product(id);
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut tables = self.write();

        if let Some(new_slug) = &patch.slug
            && tables
                .products
                .values()
                .any(|product| &product.slug == new_slug && product.id != id)
        {
            return Err(StoreError::DuplicateSlug(new_slug.clone()));
        }

        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(product);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StoreError> {
        Ok(self.write().products.remove(&id).is_some())
    }

    async fn list_cart_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError> {
        let mut items: Vec<CartItem> = self
            .read()
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id && !item.saved_for_later)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn list_saved_items(&self, user_id: UserId) -> Result<Vec<CartItem>, StoreError> {
        let mut items: Vec<CartItem> = self
            .read()
            .cart_items
            .values()
            .filter(|item| item.user_id == user_id && item.saved_for_later)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get_cart_item(&self, id: CartItemId) -> Result<Option<CartItem>, StoreError> {
        Ok(self.read().cart_items.get(&id).cloned())
    }

    async fn find_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError> {
        Ok(self
            .read()
            .cart_items
            .values()
            .find(|item| {
                item.user_id == user_id
                    && item.product_id == product_id
                    && item.saved_for_later == saved_for_later
            })
            .cloned())
    }

    async fn insert_cart_item(&self, new_item: NewCartItem) -> Result<CartItem, StoreError> {
        let mut tables = self.write();

        let id = CartItemId::new(tables.next_cart_item_id);
        tables.next_cart_item_id += 1;

        let item = new_item.into_cart_item(id);
        tables.cart_items.insert(id, item.clone());
        Ok(item)
    }

    async fn set_cart_item_quantity(
        &self,
        id: CartItemId,
        quantity: u32,
    ) -> Result<Option<CartItem>, StoreError> {
        let mut tables = self.write();
        let Some(item) = tables.cart_items.get_mut(&id) else {
            return Ok(None);
        };
        item.quantity = quantity;
        Ok(Some(item.clone()))
    }

    async fn set_cart_item_saved(
        &self,
        id: CartItemId,
        saved_for_later: bool,
    ) -> Result<Option<CartItem>, StoreError> {
        let mut tables = self.write();
        let Some(item) = tables.cart_items.get_mut(&id) else {
            return Ok(None);
        };
        item.saved_for_later = saved_for_later;
        Ok(Some(item.clone()))
    }

    async fn delete_cart_item(&self, id: CartItemId) -> Result<bool, StoreError> {
        Ok(self.write().cart_items.remove(&id).is_some())
    }

    async fn clear_cart(&self, user_id: UserId) -> Result<usize, StoreError> {
        let mut tables = self.write();
        let before = tables.cart_items.len();
        tables
            .cart_items
            .retain(|_, item| item.user_id != user_id || item.saved_for_later);
        Ok(before - tables.cart_items.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn new_product(name: &str, slug: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            slug: Slug::parse(slug).unwrap(),
            description: None,
            price: Decimal::new(1000, 2),
            list_price: None,
            image_url: None,
            category_id: None,
            in_stock: true,
            rating: Decimal::ZERO,
            review_count: 0,
            sold_count: 0,
            featured: false,
            material: None,
            product_type: None,
            design: None,
            customization: None,
            protection: None,
            warranty: None,
            size: None,
            color: None,
            brand: None,
            seller: None,
        }
    }

    fn new_category(name: &str, slug: &str, parent_id: Option<CategoryId>) -> NewCategory {
        NewCategory {
            name: name.to_owned(),
            slug: Slug::parse(slug).unwrap(),
            description: None,
            image_url: None,
            parent_id,
        }
    }

    fn new_item(user: i32, product: i32, quantity: u32, saved: bool) -> NewCartItem {
        NewCartItem {
            user_id: UserId::new(user),
            product_id: ProductId::new(product),
            quantity,
            saved_for_later: saved,
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_never_get_reused() {
        let store = MemoryStore::new();

        let first = store.create_product(new_product("A", "a")).await.unwrap();
        let second = store.create_product(new_product("B", "b")).await.unwrap();
        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));

        assert!(store.delete_product(second.id).await.unwrap());
        let third = store.create_product(new_product("C", "c")).await.unwrap();
        assert_eq!(third.id, ProductId::new(3));
    }

    #[tokio::test]
    async fn test_duplicate_product_slug_is_rejected() {
        let store = MemoryStore::new();
        store
            .create_product(new_product("First", "same-slug"))
            .await
            .unwrap();

        let result = store.create_product(new_product("Second", "same-slug")).await;
        assert!(matches!(result, Err(StoreError::DuplicateSlug(_))));
    }

    #[tokio::test]
    async fn test_update_cannot_steal_another_products_slug() {
        let store = MemoryStore::new();
        store.create_product(new_product("A", "slug-a")).await.unwrap();
        let b = store.create_product(new_product("B", "slug-b")).await.unwrap();

        let patch = ProductPatch {
            slug: Some(Slug::parse("slug-a").unwrap()),
            ..ProductPatch::default()
        };
        let result = store.update_product(b.id, patch).await;
        assert!(matches!(result, Err(StoreError::DuplicateSlug(_))));

        // Renaming onto its own slug is fine.
        let patch = ProductPatch {
            slug: Some(Slug::parse("slug-b").unwrap()),
            ..ProductPatch::default()
        };
        assert!(store.update_product(b.id, patch).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_category_parent_must_exist() {
        let store = MemoryStore::new();

        let result = store
            .create_category(new_category("Orphan", "orphan", Some(CategoryId::new(9))))
            .await;
        assert!(matches!(result, Err(StoreError::MissingParent(_))));

        // A parent that would only exist after this insert is also invalid,
        // which rules out self-parenting.
        let result = store
            .create_category(new_category("Own parent", "own-parent", Some(CategoryId::new(1))))
            .await;
        assert!(matches!(result, Err(StoreError::MissingParent(_))));

        let root = store
            .create_category(new_category("Electronics", "electronics", None))
            .await
            .unwrap();
        let child = store
            .create_category(new_category("Laptops", "laptops", Some(root.id)))
            .await
            .unwrap();
        assert_eq!(child.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn test_clear_cart_spares_saved_items_and_other_users() {
        let store = MemoryStore::new();
        store.insert_cart_item(new_item(1, 10, 2, false)).await.unwrap();
        let saved = store.insert_cart_item(new_item(1, 11, 1, true)).await.unwrap();
        store.insert_cart_item(new_item(2, 10, 1, false)).await.unwrap();

        assert_eq!(store.clear_cart(UserId::new(1)).await.unwrap(), 1);
        assert!(store.list_cart_items(UserId::new(1)).await.unwrap().is_empty());
        assert_eq!(
            store.list_saved_items(UserId::new(1)).await.unwrap(),
            vec![saved]
        );
        assert_eq!(store.list_cart_items(UserId::new(2)).await.unwrap().len(), 1);

        // Clearing an already-empty cart is a no-op, not an error.
        assert_eq!(store.clear_cart(UserId::new(1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_cart_item_matches_the_full_key() {
        let store = MemoryStore::new();
        let active = store.insert_cart_item(new_item(1, 10, 2, false)).await.unwrap();
        let saved = store.insert_cart_item(new_item(1, 10, 1, true)).await.unwrap();

        let found = store
            .find_cart_item(UserId::new(1), ProductId::new(10), false)
            .await
            .unwrap();
        assert_eq!(found, Some(active));

        let found = store
            .find_cart_item(UserId::new(1), ProductId::new(10), true)
            .await
            .unwrap();
        assert_eq!(found, Some(saved));

        let found = store
            .find_cart_item(UserId::new(2), ProductId::new(10), false)
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "user1".to_owned(),
            password: "password123".to_owned(),
            email: clementine_core::Email::parse("user1@example.com").unwrap(),
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            country: None,
            zip_code: None,
            is_admin: false,
        };
        let created = store.create_user(user.clone()).await.unwrap();
        assert_eq!(
            store.get_user(created.id).await.unwrap(),
            Some(created.clone())
        );
        assert_eq!(
            store.get_user_by_username("user1").await.unwrap(),
            Some(created)
        );

        let result = store.create_user(user).await;
        assert!(matches!(result, Err(StoreError::DuplicateUser(_))));
    }
}
