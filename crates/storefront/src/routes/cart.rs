//! Cart route handlers.
//!
//! Every handler here resolves the acting user through [`CurrentUser`]
//! before reaching the cart service; there is no ambient identity.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use clementine_core::{CartItemId, ProductId};

use crate::cart::CartTotals;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::CartItemWithProduct;
use crate::state::AppState;

use super::{Message, parse_path_id};

/// Body for POST /api/cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub saved_for_later: bool,
}

const fn default_quantity() -> u32 {
    1
}

/// Body for PUT /api/cart/{id}.
///
/// The quantity is kept wide here so an out-of-range value reports as the
/// API's own validation message rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: Option<i64>,
}

/// GET /api/cart - active items joined with their products.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<CartItemWithProduct>>> {
    Ok(Json(state.cart().list(user_id).await?))
}

/// GET /api/cart/totals - derived pricing over the active cart.
pub async fn totals(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<CartTotals>> {
    Ok(Json(state.cart().totals(user_id).await?))
}

/// POST /api/cart - add an item, merging with an existing line.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItemWithProduct>)> {
    let item = state
        .cart()
        .add_to_cart(
            user_id,
            request.product_id,
            request.quantity,
            request.saved_for_later,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/cart/{id} - update an item's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path(raw_id): Path<String>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartItemWithProduct>> {
    let id: CartItemId = parse_path_id(&raw_id, "cart item")?;
    let quantity = request
        .quantity
        .and_then(|quantity| u32::try_from(quantity).ok())
        .filter(|quantity| *quantity >= 1)
        .ok_or_else(|| AppError::Validation("Invalid quantity value".to_owned()))?;

    let item = state.cart().update_quantity(id, quantity).await?;
    Ok(Json(item))
}

/// DELETE /api/cart/{id} - remove an item.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Message>> {
    let id: CartItemId = parse_path_id(&raw_id, "cart item")?;
    state.cart().remove(id).await?;
    Ok(Json(Message::new("Item removed from cart successfully")))
}

/// DELETE /api/cart - clear the user's active items.
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Message>> {
    state.cart().clear(user_id).await?;
    Ok(Json(Message::new("Cart cleared successfully")))
}

/// GET /api/saved-items - saved-for-later items with their products.
pub async fn list_saved(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<CartItemWithProduct>>> {
    Ok(Json(state.cart().list_saved(user_id).await?))
}

/// POST /api/cart/{id}/save-for-later
#[instrument(skip(state))]
pub async fn save_for_later(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<CartItemWithProduct>> {
    let id: CartItemId = parse_path_id(&raw_id, "cart item")?;
    Ok(Json(state.cart().save_for_later(id).await?))
}

/// POST /api/saved-items/{id}/move-to-cart
#[instrument(skip(state))]
pub async fn move_to_cart(
    State(state): State<AppState>,
    CurrentUser(_user_id): CurrentUser,
    Path(raw_id): Path<String>,
) -> Result<Json<CartItemWithProduct>> {
    let id: CartItemId = parse_path_id(&raw_id, "saved item")?;
    Ok(Json(state.cart().move_to_cart(id).await?))
}
