//! User identity extractor.
//!
//! Cart and saved-item routes need a resolved `UserId` before they touch
//! the cart service. Identity resolution is an external collaborator
//! (a session layer, a gateway); this extractor is the seam where it
//! plugs in, reading the `x-user-id` header that collaborator sets.
//! There is deliberately no process-wide current user.

use axum::{extract::FromRequestParts, http::request::Parts};

use clementine_core::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// The HTTP header carrying the resolved user identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the user a cart request acts on behalf of.
///
/// Resolution order: the `x-user-id` header, then the configured
/// development fallback. With neither, the request is rejected with 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn cart_handler(
///     CurrentUser(user_id): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("cart for {user_id}")
/// }
/// ```
pub struct CurrentUser(pub UserId);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(value) = parts.headers.get(USER_ID_HEADER) {
            let user_id = value
                .to_str()
                .ok()
                .and_then(|raw| raw.parse::<UserId>().ok())
                .ok_or_else(|| AppError::Validation("Invalid user ID header".to_owned()))?;
            return Ok(Self(user_id));
        }

        state
            .config()
            .default_user_id
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("User identity required".to_owned()))
    }
}
