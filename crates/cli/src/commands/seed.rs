//! Seed a remote document store with the sample catalog.

use clementine_storefront::seed::{self, SeedError};

use super::remote_store;

/// Write the sample catalog to the store at `store_url`.
///
/// By default seeding is skipped when the store already has products;
/// `force` writes regardless (and will fail on conflicting slugs).
///
/// # Errors
///
/// Propagates store transport failures and slug conflicts.
pub async fn run(store_url: &str, token: Option<String>, force: bool) -> Result<(), SeedError> {
    let store = remote_store(store_url, token);

    if force {
        seed::seed(&store).await?;
        tracing::info!("seeded sample catalog");
    } else if seed::seed_if_empty(&store).await? {
        tracing::info!("seeded sample catalog");
    } else {
        tracing::info!("store already has products, skipping (use --force to override)");
    }

    Ok(())
}
