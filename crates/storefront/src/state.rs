//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::CartService;
use crate::config::StorefrontConfig;
use crate::store::SharedStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the store backend and the cart service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: SharedStore,
    cart: CartService,
}

impl AppState {
    /// Create a new application state over the configured store backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: SharedStore) -> Self {
        let cart = CartService::new(Arc::clone(&store));
        Self {
            inner: Arc::new(AppStateInner { config, store, cart }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the entity store.
    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.inner.store
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }
}
