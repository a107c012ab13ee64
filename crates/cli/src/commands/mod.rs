//! CLI command implementations.

pub mod seed;
pub mod user;

use secrecy::SecretString;

use clementine_storefront::store::RemoteStore;

/// Build a remote store client from CLI arguments.
pub fn remote_store(store_url: &str, token: Option<String>) -> RemoteStore {
    RemoteStore::new(store_url, token.map(SecretString::from))
}
