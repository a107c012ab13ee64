//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};

use clementine_core::{CategoryId, Slug};

use crate::error::{AppError, Result};
use crate::models::Category;
use crate::state::AppState;

use super::parse_path_id;

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.store().list_categories().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Category>> {
    let id: CategoryId = parse_path_id(&raw_id, "category")?;
    let category = state
        .store()
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;
    Ok(Json(category))
}

/// GET /api/categories/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(raw_slug): Path<String>,
) -> Result<Json<Category>> {
    let slug = Slug::parse(&raw_slug)
        .map_err(|_| AppError::NotFound("Category not found".to_owned()))?;
    let category = state
        .store()
        .get_category_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_owned()))?;
    Ok(Json(category))
}
