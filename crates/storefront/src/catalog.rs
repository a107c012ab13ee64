//! Catalog query engine.
//!
//! Pure functions over a product snapshot: nothing in this module touches
//! the store. Handlers fetch the current snapshot, then filter, sort and
//! paginate here.

use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use serde::Deserialize;

use clementine_core::{CategoryId, ProductId};

use crate::models::Product;

/// Default truncation for the featured-products shelf.
pub const DEFAULT_FEATURED_LIMIT: usize = 10;

/// Default size of the related-products strip.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Sort key for catalog queries. `Newest` uses the id as a proxy for
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Rating,
    Newest,
}

/// Sort direction; ascending when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Catalog query parameters. All filters are optional and AND-combined.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    pub category_id: Option<CategoryId>,
    pub featured: Option<bool>,
    /// Case-insensitive substring match against name or description.
    pub search: Option<String>,
    /// Inclusive lower bound on `price`.
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on `price`.
    pub max_price: Option<Decimal>,
    pub in_stock: Option<bool>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Filter, sort and paginate a product snapshot.
///
/// Pagination applies strictly after filter+sort; an offset past the end
/// yields an empty list, never an error. Without a sort key the result is
/// ordered ascending by name.
#[must_use]
pub fn apply(mut products: Vec<Product>, query: &ProductQuery) -> Vec<Product> {
    if let Some(category_id) = query.category_id {
        products.retain(|product| product.category_id == Some(category_id));
    }
    if let Some(featured) = query.featured {
        products.retain(|product| product.featured == featured);
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        products.retain(|product| {
            product.name.to_lowercase().contains(&needle)
                || product
                    .description
                    .as_deref()
                    .is_some_and(|description| description.to_lowercase().contains(&needle))
        });
    }
    if let Some(min_price) = query.min_price {
        products.retain(|product| product.price >= min_price);
    }
    if let Some(max_price) = query.max_price {
        products.retain(|product| product.price <= max_price);
    }
    if let Some(in_stock) = query.in_stock {
        products.retain(|product| product.in_stock == in_stock);
    }

    sort(&mut products, query.sort_by, query.sort_order.unwrap_or_default());

    let offset = query.offset.unwrap_or(0);
    let paged = products.into_iter().skip(offset);
    match query.limit {
        Some(limit) => paged.take(limit).collect(),
        None => paged.collect(),
    }
}

fn sort(products: &mut [Product], sort_by: Option<SortBy>, order: SortOrder) {
    let Some(sort_by) = sort_by else {
        products.sort_by(|a, b| a.name.cmp(&b.name));
        return;
    };

    // Stable sort over an id-ordered snapshot keeps equal keys id-ordered.
    products.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Price => a.price.cmp(&b.price),
            SortBy::Rating => a.rating.cmp(&b.rating),
            SortBy::Newest => a.id.cmp(&b.id),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Featured products for promotional shelves: best-rated first, ties
/// broken by id ascending so the selection is stable.
#[must_use]
pub fn featured(products: &[Product], limit: Option<usize>) -> Vec<Product> {
    let mut shelf: Vec<Product> = products
        .iter()
        .filter(|product| product.featured)
        .cloned()
        .collect();
    shelf.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
    shelf.truncate(limit.unwrap_or(DEFAULT_FEATURED_LIMIT));
    shelf
}

/// Cross-sell picks for a product page: same-category products first,
/// then a randomized backfill from the rest of the catalog.
///
/// An unknown `product_id` yields an empty list; a target without a
/// category goes straight to the random sample. The target itself is
/// never included.
#[must_use]
pub fn related<R: Rng + ?Sized>(
    products: &[Product],
    product_id: ProductId,
    limit: Option<usize>,
    rng: &mut R,
) -> Vec<Product> {
    let limit = limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    let Some(target) = products.iter().find(|product| product.id == product_id) else {
        return Vec::new();
    };

    let mut picks: Vec<Product> = match target.category_id {
        Some(category_id) => products
            .iter()
            .filter(|product| {
                product.category_id == Some(category_id) && product.id != product_id
            })
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    if picks.len() < limit {
        let mut backfill: Vec<Product> = products
            .iter()
            .filter(|product| {
                product.id != product_id && !picks.iter().any(|pick| pick.id == product.id)
            })
            .cloned()
            .collect();
        backfill.shuffle(rng);
        let missing = limit - picks.len();
        picks.extend(backfill.into_iter().take(missing));
    }

    picks.truncate(limit);
    picks
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use clementine_core::Slug;

    use super::*;

    struct Fixture<'a> {
        name: &'a str,
        price: Decimal,
        in_stock: bool,
        featured: bool,
        rating: Decimal,
        category_id: Option<i32>,
    }

    impl Default for Fixture<'_> {
        fn default() -> Self {
            Self {
                name: "item",
                price: Decimal::new(1000, 2),
                in_stock: true,
                featured: false,
                rating: Decimal::ZERO,
                category_id: None,
            }
        }
    }

    fn product(id: i32, fixture: Fixture<'_>) -> Product {
        Product {
            id: ProductId::new(id),
            name: fixture.name.to_owned(),
            slug: Slug::parse(&format!("item-{id}")).unwrap(),
            description: None,
            price: fixture.price,
            list_price: None,
            image_url: None,
            category_id: fixture.category_id.map(CategoryId::new),
            in_stock: fixture.in_stock,
            rating: fixture.rating,
            review_count: 0,
            sold_count: 0,
            featured: fixture.featured,
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

    #[test]
    fn test_price_and_stock_filters_combine() {
        let products = vec![
            product(1, Fixture { price: Decimal::new(1000, 2), ..Fixture::default() }),
            product(2, Fixture { price: Decimal::new(5000, 2), in_stock: false, ..Fixture::default() }),
            product(3, Fixture { price: Decimal::new(3000, 2), ..Fixture::default() }),
        ];

        let query = ProductQuery {
            min_price: Some(Decimal::new(2000, 2)),
            in_stock: Some(true),
            ..ProductQuery::default()
        };
        let result = apply(products, &query);

        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id, ProductId::new(3));
    }

    #[test]
    fn test_search_matches_name_or_description_case_insensitively() {
        let mut camera = product(1, Fixture { name: "GoPro HERO6", ..Fixture::default() });
        camera.description = Some("4K action camera".to_owned());
        let shirt = product(2, Fixture { name: "Cotton T-shirt", ..Fixture::default() });

        let query = ProductQuery {
            search: Some("ACTION".to_owned()),
            ..ProductQuery::default()
        };
        let result = apply(vec![camera.clone(), shirt], &query);
        assert_eq!(result, vec![camera]);
    }

    #[test]
    fn test_default_order_is_name_ascending() {
        let products = vec![
            product(1, Fixture { name: "Zoom lens", ..Fixture::default() }),
            product(2, Fixture { name: "Action camera", ..Fixture::default() }),
            product(3, Fixture { name: "Microphone", ..Fixture::default() }),
        ];

        let names: Vec<String> = apply(products, &ProductQuery::default())
            .into_iter()
            .map(|product| product.name)
            .collect();
        assert_eq!(names, ["Action camera", "Microphone", "Zoom lens"]);
    }

    #[test]
    fn test_sort_by_price_descending() {
        let products = vec![
            product(1, Fixture { price: Decimal::new(1000, 2), ..Fixture::default() }),
            product(2, Fixture { price: Decimal::new(9900, 2), ..Fixture::default() }),
            product(3, Fixture { price: Decimal::new(3000, 2), ..Fixture::default() }),
        ];

        let query = ProductQuery {
            sort_by: Some(SortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..ProductQuery::default()
        };
        let ids: Vec<i32> = apply(products, &query)
            .into_iter()
            .map(|product| product.id.as_i32())
            .collect();
        assert_eq!(ids, [2, 3, 1]);
    }

    #[test]
    fn test_offset_past_the_end_yields_empty_not_error() {
        let products: Vec<Product> =
            (1..=5).map(|id| product(id, Fixture::default())).collect();

        let query = ProductQuery {
            limit: Some(10),
            offset: Some(1000),
            ..ProductQuery::default()
        };
        assert!(apply(products, &query).is_empty());
    }

    #[test]
    fn test_pagination_applies_after_sort() {
        let products = vec![
            product(1, Fixture { price: Decimal::new(3000, 2), ..Fixture::default() }),
            product(2, Fixture { price: Decimal::new(1000, 2), ..Fixture::default() }),
            product(3, Fixture { price: Decimal::new(2000, 2), ..Fixture::default() }),
        ];

        let query = ProductQuery {
            sort_by: Some(SortBy::Price),
            limit: Some(1),
            offset: Some(1),
            ..ProductQuery::default()
        };
        let result = apply(products, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result.first().unwrap().id, ProductId::new(3));
    }

    #[test]
    fn test_featured_is_stable_under_rating_ties() {
        let products = vec![
            product(3, Fixture { featured: true, rating: Decimal::new(45, 1), ..Fixture::default() }),
            product(1, Fixture { featured: true, rating: Decimal::new(45, 1), ..Fixture::default() }),
            product(2, Fixture { featured: true, rating: Decimal::new(49, 1), ..Fixture::default() }),
            product(4, Fixture::default()),
        ];

        let ids: Vec<i32> = featured(&products, None)
            .into_iter()
            .map(|product| product.id.as_i32())
            .collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn test_related_backfills_to_the_limit() {
        // Target is alone in its category; catalog has enough others to
        // fill the strip entirely from backfill.
        let mut products = vec![product(
            1,
            Fixture { category_id: Some(7), ..Fixture::default() },
        )];
        products.extend((2..=8).map(|id| {
            product(id, Fixture { category_id: Some(1), ..Fixture::default() })
        }));

        let mut rng = StdRng::seed_from_u64(7);
        let picks = related(&products, ProductId::new(1), None, &mut rng);

        assert_eq!(picks.len(), DEFAULT_RELATED_LIMIT);
        assert!(picks.iter().all(|pick| pick.id != ProductId::new(1)));
    }

    #[test]
    fn test_related_prefers_same_category() {
        let products = vec![
            product(1, Fixture { category_id: Some(7), ..Fixture::default() }),
            product(2, Fixture { category_id: Some(7), ..Fixture::default() }),
            product(3, Fixture { category_id: Some(7), ..Fixture::default() }),
            product(4, Fixture { category_id: Some(1), ..Fixture::default() }),
        ];

        let mut rng = StdRng::seed_from_u64(7);
        let picks = related(&products, ProductId::new(1), Some(2), &mut rng);

        let ids: Vec<i32> = picks.iter().map(|pick| pick.id.as_i32()).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn test_related_unknown_product_is_empty() {
        let products = vec![product(1, Fixture::default())];
        let mut rng = StdRng::seed_from_u64(7);
        assert!(related(&products, ProductId::new(99), None, &mut rng).is_empty());
    }
}
