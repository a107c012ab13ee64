//! Create user records.

use thiserror::Error;

use clementine_core::{Email, EmailError};
use clementine_storefront::models::NewUser;
use clementine_storefront::store::{EntityStore, StoreError};

use super::remote_store;

/// Errors raised while creating a user.
#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create a user in the store at `store_url`.
///
/// # Errors
///
/// Fails on an invalid email, a duplicate username/email, or a store
/// transport failure.
pub async fn create(
    store_url: &str,
    token: Option<String>,
    username: &str,
    email: &str,
    password: &str,
    admin: bool,
) -> Result<(), CreateUserError> {
    let store = remote_store(store_url, token);

    let user = store
        .create_user(NewUser {
            username: username.to_owned(),
            password: password.to_owned(),
            email: Email::parse(email)?,
            first_name: None,
            last_name: None,
            address: None,
            city: None,
            country: None,
            zip_code: None,
            is_admin: admin,
        })
        .await?;

    tracing::info!(id = %user.id, username = %user.username, "user created");
    Ok(())
}
