//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use clementine_core::{ProductId, Slug};

use crate::catalog;
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

use super::{Message, parse_path_id};

/// Shelf/strip size query parameter.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// GET /api/products - catalog query.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<catalog::ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.store().list_products().await?;
    Ok(Json(catalog::apply(products, &query)))
}

/// GET /api/products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_path_id(&raw_id, "product")?;
    let product = state
        .store()
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    Ok(Json(product))
}

/// GET /api/products/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(raw_slug): Path<String>,
) -> Result<Json<Product>> {
    // A string that is not even a well-formed slug cannot name a product.
    let slug = Slug::parse(&raw_slug)
        .map_err(|_| AppError::NotFound("Product not found".to_owned()))?;
    let product = state
        .store()
        .get_product_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    Ok(Json(product))
}

/// POST /api/products - create (admin).
#[instrument(skip(state, new_product))]
pub async fn create(
    State(state): State<AppState>,
    Json(new_product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    new_product
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let product = state.store().create_product(new_product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id} - update (admin).
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    let id: ProductId = parse_path_id(&raw_id, "product")?;
    patch
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let product = state
        .store()
        .update_product(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;
    Ok(Json(product))
}

/// DELETE /api/products/{id} - delete (admin).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>> {
    let id: ProductId = parse_path_id(&raw_id, "product")?;
    if !state.store().delete_product(id).await? {
        return Err(AppError::NotFound("Product not found".to_owned()));
    }
    Ok(Json(Message::new("Product deleted successfully")))
}

/// GET /api/featured-products
pub async fn featured(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.store().list_products().await?;
    Ok(Json(catalog::featured(&products, query.limit)))
}

/// GET /api/products/{id}/related
pub async fn related(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<Vec<Product>>> {
    let id: ProductId = parse_path_id(&raw_id, "product")?;
    let products = state.store().list_products().await?;
    let picks = {
        let mut rng = rand::rng();
        catalog::related(&products, id, query.limit, &mut rng)
    };
    Ok(Json(picks))
}
