//! Sample catalog seeding.
//!
//! Populates an empty store with the demo categories, products and users
//! used by development servers and the CLI. Seeding is skipped entirely
//! when the store already has products.

use rust_decimal::Decimal;

use clementine_core::{CategoryId, Email, EmailError, Slug, SlugError};

use crate::models::{NewCategory, NewProduct, NewUser};
use crate::store::{EntityStore, StoreError};

/// Errors raised while building or writing seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Seed the store unless it already has products.
///
/// Returns whether seeding ran.
///
/// # Errors
///
/// Propagates store failures and (unreachable for the fixture data)
/// slug/email parse failures.
pub async fn seed_if_empty(store: &dyn EntityStore) -> Result<bool, SeedError> {
    if !store.list_products().await?.is_empty() {
        return Ok(false);
    }
    seed(store).await?;
    Ok(true)
}

/// Write the full sample data set: 8 categories (3 roots, 5 children),
/// 8 products and 2 users.
///
/// # Errors
///
/// Propagates store failures; fails on a non-empty store where the sample
/// slugs already exist.
pub async fn seed(store: &dyn EntityStore) -> Result<(), SeedError> {
    let electronics = store
        .create_category(category(
            "Electronics",
            "electronics",
            "Electronic devices and gadgets",
            None,
        )?)
        .await?;
    let clothing = store
        .create_category(category(
            "Clothing",
            "clothing",
            "Apparel and fashion items",
            None,
        )?)
        .await?;
    let home = store
        .create_category(category(
            "Home & Outdoor",
            "home-outdoor",
            "Home decor and outdoor items",
            None,
        )?)
        .await?;
    let smartphones = store
        .create_category(category(
            "Smartphones",
            "smartphones",
            "Mobile phones and accessories",
            Some(electronics.id),
        )?)
        .await?;
    let laptops = store
        .create_category(category(
            "Laptops",
            "laptops",
            "Portable computers",
            Some(electronics.id),
        )?)
        .await?;
    let mens_wear = store
        .create_category(category(
            "Men's Wear",
            "mens-wear",
            "Clothing for men",
            Some(clothing.id),
        )?)
        .await?;
    store
        .create_category(category(
            "Women's Wear",
            "womens-wear",
            "Clothing for women",
            Some(clothing.id),
        )?)
        .await?;
    store
        .create_category(category(
            "Kitchen",
            "kitchen",
            "Kitchen appliances and utensils",
            Some(home.id),
        )?)
        .await?;

    let mut gopro = product(
        "GoPro HERO6 4K Action Camera",
        "gopro-hero6-4k-action-camera",
        "Capture stunning 4K video and incredible photos with the GoPro HERO6 Black. \
         With its all-new GP1 chip, improved stabilization, and 2x the performance of \
         the HERO5, this action camera lets you capture life's moments like never before.",
        Decimal::new(9950, 2),
        electronics.id,
    )?;
    gopro.list_price = Some(Decimal::new(12800, 2));
    gopro.image_url = some_str("https://images.unsplash.com/photo-1526406915894-7bcd65f60845");
    gopro.rating = Decimal::new(45, 1);
    gopro.review_count = 154;
    gopro.sold_count = 254;
    gopro.featured = true;
    gopro.material = some_str("Plastic material");
    gopro.product_type = some_str("Action Camera");
    gopro.design = some_str("Modern nice");
    gopro.color = some_str("Black");
    gopro.brand = some_str("GoPro");
    gopro.seller = some_str("Artel Market");
    store.create_product(gopro).await?;

    let mut tshirt = product(
        "Mens Long Sleeve T-shirt Cotton Base",
        "mens-long-sleeve-tshirt",
        "Classic long sleeve t-shirt for men, made with high-quality cotton material \
         that's comfortable and durable.",
        Decimal::new(7800, 2),
        mens_wear.id,
    )?;
    tshirt.list_price = Some(Decimal::new(9800, 2));
    tshirt.image_url = some_str("https://images.unsplash.com/photo-1586363104862-3a5e2ab60d99");
    tshirt.rating = Decimal::new(47, 1);
    tshirt.review_count = 32;
    tshirt.sold_count = 154;
    tshirt.featured = true;
    tshirt.material = some_str("Cotton");
    tshirt.product_type = some_str("T-shirt");
    tshirt.design = some_str("Classic style");
    tshirt.customization = some_str("Customized logo and design custom packages");
    tshirt.protection = some_str("Refund Policy");
    tshirt.warranty = some_str("2 years full warranty");
    tshirt.size = some_str("Medium");
    tshirt.color = some_str("Gray");
    tshirt.brand = some_str("Fashion Brand");
    tshirt.seller = some_str("Guizar Trading LLC");
    store.create_product(tshirt).await?;

    let mut colored_tshirts = product(
        "T-shirts with multiple colors",
        "tshirts-multiple-colors",
        "High-quality t-shirts available in various colors, perfect for casual wear.",
        Decimal::new(1030, 2),
        mens_wear.id,
    )?;
    colored_tshirts.image_url =
        some_str("https://images.unsplash.com/photo-1576566588028-4147f3842f27");
    colored_tshirts.rating = Decimal::new(40, 1);
    colored_tshirts.review_count = 42;
    colored_tshirts.sold_count = 137;
    colored_tshirts.material = some_str("Cotton");
    colored_tshirts.size = some_str("Medium");
    colored_tshirts.color = some_str("Blue");
    colored_tshirts.brand = some_str("Fashion Brand");
    colored_tshirts.seller = some_str("Artel Market");
    store.create_product(colored_tshirts).await?;

    let mut watch = product(
        "Samsung Smart Watch",
        "samsung-smart-watch",
        "Stay connected with this stylish and functional smart watch from Samsung.",
        Decimal::new(9950, 2),
        electronics.id,
    )?;
    watch.list_price = Some(Decimal::new(12800, 2));
    watch.image_url = some_str("https://images.unsplash.com/photo-1546868871-7041f2a55e12");
    watch.rating = Decimal::new(48, 1);
    watch.review_count = 75;
    watch.sold_count = 208;
    watch.featured = true;
    watch.material = some_str("Plastic and metal");
    watch.product_type = some_str("Smart Watch");
    watch.color = some_str("Silver");
    watch.brand = some_str("Samsung");
    watch.seller = some_str("Best Factory LLC");
    store.create_product(watch).await?;

    let mut iphone = product(
        "Apple iPhone 12 Pro",
        "apple-iphone-12-pro",
        "The latest iPhone with advanced features and stunning camera capabilities.",
        Decimal::new(99900, 2),
        smartphones.id,
    )?;
    iphone.list_price = Some(Decimal::new(109900, 2));
    iphone.image_url = some_str("https://images.unsplash.com/photo-1605236453806-6ff36851218e");
    iphone.rating = Decimal::new(49, 1);
    iphone.review_count = 132;
    iphone.sold_count = 345;
    iphone.featured = true;
    iphone.material = some_str("Glass and aluminum");
    iphone.product_type = some_str("Smartphone");
    iphone.color = some_str("Blue");
    iphone.brand = some_str("Apple");
    iphone.seller = some_str("Tech Solutions Inc");
    store.create_product(iphone).await?;

    let mut dslr = product(
        "Professional DSLR Camera",
        "professional-dslr-camera",
        "Capture professional-quality photos and videos with this high-end DSLR camera.",
        Decimal::new(69900, 2),
        electronics.id,
    )?;
    dslr.list_price = Some(Decimal::new(79900, 2));
    dslr.image_url = some_str("https://images.unsplash.com/photo-1542272604-787c3835535d");
    dslr.rating = Decimal::new(47, 1);
    dslr.review_count = 87;
    dslr.sold_count = 156;
    dslr.material = some_str("Plastic and metal");
    dslr.product_type = some_str("Camera");
    dslr.color = some_str("Black");
    dslr.brand = some_str("Canon");
    dslr.seller = some_str("PhotoPro Store");
    store.create_product(dslr).await?;

    let mut laptop = product(
        "Modern Laptop with SSD",
        "modern-laptop-ssd",
        "Fast and efficient laptop with solid-state drive for optimal performance.",
        Decimal::new(89900, 2),
        laptops.id,
    )?;
    laptop.list_price = Some(Decimal::new(99900, 2));
    laptop.image_url = some_str("https://images.unsplash.com/photo-1531297484001-80022131f5a1");
    laptop.rating = Decimal::new(46, 1);
    laptop.review_count = 65;
    laptop.sold_count = 129;
    laptop.featured = true;
    laptop.material = some_str("Aluminum");
    laptop.product_type = some_str("Laptop");
    laptop.color = some_str("Silver");
    laptop.brand = some_str("Dell");
    laptop.seller = some_str("TechMart");
    store.create_product(laptop).await?;

    let mut headphones = product(
        "Wireless Bluetooth Headphones",
        "wireless-bluetooth-headphones",
        "Immerse yourself in high-quality sound with these comfortable wireless headphones.",
        Decimal::new(5999, 2),
        electronics.id,
    )?;
    headphones.list_price = Some(Decimal::new(7999, 2));
    headphones.image_url =
        some_str("https://images.unsplash.com/photo-1600086827875-a63b01f1335c");
    headphones.rating = Decimal::new(44, 1);
    headphones.review_count = 93;
    headphones.sold_count = 217;
    headphones.material = some_str("Plastic and fabric");
    headphones.product_type = some_str("Headphones");
    headphones.color = some_str("Black");
    headphones.brand = some_str("Sony");
    headphones.seller = some_str("AudioPlus");
    store.create_product(headphones).await?;

    store
        .create_user(NewUser {
            username: "user1".to_owned(),
            password: "password123".to_owned(),
            email: Email::parse("user1@example.com")?,
            first_name: some_str("John"),
            last_name: some_str("Doe"),
            address: some_str("123 Main St"),
            city: some_str("Anytown"),
            country: some_str("USA"),
            zip_code: some_str("12345"),
            is_admin: false,
        })
        .await?;
    store
        .create_user(NewUser {
            username: "admin".to_owned(),
            password: "admin123".to_owned(),
            email: Email::parse("admin@example.com")?,
            first_name: some_str("Admin"),
            last_name: some_str("User"),
            address: None,
            city: None,
            country: None,
            zip_code: None,
            is_admin: true,
        })
        .await?;

    Ok(())
}

fn some_str(value: &str) -> Option<String> {
    Some(value.to_owned())
}

fn category(
    name: &str,
    slug: &str,
    description: &str,
    parent_id: Option<CategoryId>,
) -> Result<NewCategory, SeedError> {
    Ok(NewCategory {
        name: name.to_owned(),
        slug: Slug::parse(slug)?,
        description: some_str(description),
        image_url: None,
        parent_id,
    })
}

fn product(
    name: &str,
    slug: &str,
    description: &str,
    price: Decimal,
    category_id: CategoryId,
) -> Result<NewProduct, SeedError> {
    Ok(NewProduct {
        name: name.to_owned(),
        slug: Slug::parse(slug)?,
        description: some_str(description),
        price,
        list_price: None,
        image_url: None,
        category_id: Some(category_id),
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
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_seed_populates_an_empty_store() {
        let store = MemoryStore::new();
        assert!(seed_if_empty(&store).await.unwrap());

        assert_eq!(store.list_categories().await.unwrap().len(), 8);
        assert_eq!(store.list_products().await.unwrap().len(), 8);
        assert!(
            store
                .get_user_by_username("user1")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_products_exist() {
        let store = MemoryStore::new();
        assert!(seed_if_empty(&store).await.unwrap());
        assert!(!seed_if_empty(&store).await.unwrap());
        assert_eq!(store.list_products().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_seeded_list_prices_exceed_prices() {
        // The "was" price sits above the selling price across the fixture
        // catalog; the two fields must never be confused.
        let store = MemoryStore::new();
        seed(&store).await.unwrap();

        for product in store.list_products().await.unwrap() {
            if let Some(list_price) = product.list_price {
                assert!(list_price > product.price, "{}", product.name);
            }
        }
    }
}
