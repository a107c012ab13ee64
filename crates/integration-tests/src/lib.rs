//! End-to-end API tests for Clementine Market.
//!
//! The tests drive the full router - routing, extractors, error mapping,
//! JSON bodies - over a freshly seeded in-memory store, one request at a
//! time via `tower::ServiceExt::oneshot`. No network, no live server.
//!
//! # Test Categories
//!
//! - `products_api` - catalog queries, admin mutations, featured/related
//! - `categories_api` - category reads
//! - `cart_api` - the cart lifecycle and derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use clementine_storefront::config::{StoreBackendConfig, StorefrontConfig};
use clementine_storefront::routes;
use clementine_storefront::seed;
use clementine_storefront::state::AppState;
use clementine_storefront::store::{MemoryStore, SharedStore};

pub use clementine_storefront::middleware::auth::USER_ID_HEADER;

/// Build the full application over a freshly seeded in-memory store.
pub async fn seeded_app() -> Router {
    let store: SharedStore = Arc::new(MemoryStore::new());
    seed::seed(store.as_ref()).await.expect("seeding");

    let config = StorefrontConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        store: StoreBackendConfig::Memory,
        seed_on_start: false,
        default_user_id: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };

    routes::app(AppState::new(config, store))
}

/// Build a request. `user` sets the identity header; `body` makes it a
/// JSON request.
pub fn req(method: &str, uri: &str, user: Option<i32>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_ID_HEADER, user.to_string());
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Fire a request at the app, returning status and decoded JSON body
/// (`Value::Null` for an empty body, `Value::String` for non-JSON text).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}
