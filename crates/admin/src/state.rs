//! Application state for the admin console.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::store::AdminStore;

/// Shared application state. Cheap to clone; the inner data lives behind
/// an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: AdminStore,
}

impl AppState {
    /// Build state from config and a seeded store.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: AdminStore::from_seed(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn store(&self) -> &AdminStore {
        &self.inner.store
    }
}
