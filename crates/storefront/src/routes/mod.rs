//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/health                          - Liveness check
//!
//! # Catalog
//! GET    /api/products                        - Filter/sort/paginate
//! GET    /api/products/{id}                   - Product by id
//! GET    /api/products/slug/{slug}            - Product by slug
//! POST   /api/products                        - Create product (admin)
//! PUT    /api/products/{id}                   - Update product (admin)
//! DELETE /api/products/{id}                   - Delete product (admin)
//! GET    /api/featured-products               - Promotional shelf
//! GET    /api/products/{id}/related           - Cross-sell strip
//! GET    /api/categories                      - All categories
//! GET    /api/categories/{id}                 - Category by id
//! GET    /api/categories/slug/{slug}          - Category by slug
//!
//! # Cart (requires resolved user identity)
//! GET    /api/cart                            - Active items + products
//! GET    /api/cart/totals                     - Derived pricing
//! POST   /api/cart                            - Add (merges duplicates)
//! PUT    /api/cart/{id}                       - Update quantity
//! DELETE /api/cart/{id}                       - Remove item
//! DELETE /api/cart                            - Clear active items
//! GET    /api/saved-items                     - Saved-for-later items
//! POST   /api/cart/{id}/save-for-later        - Active -> Saved
//! POST   /api/saved-items/{id}/move-to-cart   - Saved -> Active
//! ```

pub mod cart;
pub mod categories;
pub mod products;

use std::str::FromStr;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// JSON envelope for operations that return a confirmation message.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Parse a path id, mapping failures to the API's 400 message shape.
fn parse_path_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation(format!("Invalid {what} ID")))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the store.
async fn health() -> &'static str {
    "ok"
}

/// Create the `/api` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Catalog
        .route("/products", get(products::list).post(products::create))
        .route("/featured-products", get(products::featured))
        .route("/products/slug/{slug}", get(products::get_by_slug))
        .route(
            "/products/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/products/{id}/related", get(products::related))
        .route("/categories", get(categories::list))
        .route("/categories/slug/{slug}", get(categories::get_by_slug))
        .route("/categories/{id}", get(categories::get))
        // Cart
        .route(
            "/cart",
            get(cart::list).post(cart::add).delete(cart::clear),
        )
        .route("/cart/totals", get(cart::totals))
        .route("/cart/{id}", put(cart::update).delete(cart::remove))
        .route("/cart/{id}/save-for-later", post(cart::save_for_later))
        .route("/saved-items", get(cart::list_saved))
        .route("/saved-items/{id}/move-to-cart", post(cart::move_to_cart))
}

/// Build the full application with middleware layers applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router())
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
