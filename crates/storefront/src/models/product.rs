//! Product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{CategoryId, ProductId, Slug};

const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A catalog product.
///
/// `list_price`, when present, is the pre-discount "was" price shown
/// struck through next to `price`. It is a display concern and is never
/// read by the promotional-discount calculation in cart pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unique across all products.
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
    /// Current selling price. Never negative.
    pub price: Decimal,
    /// "Was" price for display, often higher than `price`.
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Average review rating, 0-5.
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub sold_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub customization: Option<String>,
    #[serde(default)]
    pub protection: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
}

const fn default_in_stock() -> bool {
    true
}

/// Validation failures for product input.
#[derive(Debug, thiserror::Error)]
pub enum ProductValidationError {
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("price cannot be negative")]
    NegativePrice,
    #[error("list price cannot be negative")]
    NegativeListPrice,
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
}

/// Fields for creating a [`Product`]; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: Decimal,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub sold_count: u32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub customization: Option<String>,
    #[serde(default)]
    pub protection: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
}

impl NewProduct {
    /// Check range constraints before the record reaches the store.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint: empty name, negative
    /// `price`/`list_price`, or a rating outside 0-5.
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if self.price.is_sign_negative() {
            return Err(ProductValidationError::NegativePrice);
        }
        if self.list_price.is_some_and(|p| p.is_sign_negative()) {
            return Err(ProductValidationError::NegativeListPrice);
        }
        if self.rating.is_sign_negative() || self.rating > MAX_RATING {
            return Err(ProductValidationError::RatingOutOfRange);
        }
        Ok(())
    }

    /// Attach a freshly assigned id, producing the stored record.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            price: self.price,
            list_price: self.list_price,
            image_url: self.image_url,
            category_id: self.category_id,
            in_stock: self.in_stock,
            rating: self.rating,
            review_count: self.review_count,
            sold_count: self.sold_count,
            featured: self.featured,
            material: self.material,
            product_type: self.product_type,
            design: self.design,
            customization: self.customization,
            protection: self.protection,
            warranty: self.warranty,
            size: self.size,
            color: self.color,
            brand: self.brand,
            seller: self.seller,
        }
    }
}

/// Partial update for a [`Product`]. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub list_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub sold_count: Option<u32>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub customization: Option<String>,
    #[serde(default)]
    pub protection: Option<String>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
}

impl ProductPatch {
    /// Check range constraints on the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, as [`NewProduct::validate`].
    pub fn validate(&self) -> Result<(), ProductValidationError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ProductValidationError::EmptyName);
        }
        if self.price.is_some_and(|p| p.is_sign_negative()) {
            return Err(ProductValidationError::NegativePrice);
        }
        if self.list_price.is_some_and(|p| p.is_sign_negative()) {
            return Err(ProductValidationError::NegativeListPrice);
        }
        if self
            .rating
            .is_some_and(|r| r.is_sign_negative() || r > MAX_RATING)
        {
            return Err(ProductValidationError::RatingOutOfRange);
        }
        Ok(())
    }

    /// Apply the patch to an existing record.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(slug) = self.slug {
            product.slug = slug;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(list_price) = self.list_price {
            product.list_price = Some(list_price);
        }
        if let Some(image_url) = self.image_url {
            product.image_url = Some(image_url);
        }
        if let Some(category_id) = self.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(review_count) = self.review_count {
            product.review_count = review_count;
        }
        if let Some(sold_count) = self.sold_count {
            product.sold_count = sold_count;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(material) = self.material {
            product.material = Some(material);
        }
        if let Some(product_type) = self.product_type {
            product.product_type = Some(product_type);
        }
        if let Some(design) = self.design {
            product.design = Some(design);
        }
        if let Some(customization) = self.customization {
            product.customization = Some(customization);
        }
        if let Some(protection) = self.protection {
            product.protection = Some(protection);
        }
        if let Some(warranty) = self.warranty {
            product.warranty = Some(warranty);
        }
        if let Some(size) = self.size {
            product.size = Some(size);
        }
        if let Some(color) = self.color {
            product.color = Some(color);
        }
        if let Some(brand) = self.brand {
            product.brand = Some(brand);
        }
        if let Some(seller) = self.seller {
            product.seller = Some(seller);
        }
    }
}
