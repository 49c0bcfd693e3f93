use std::sync::Arc;

use storage::store::{CategoryStore, ProductStore};

/// Shared, immutable handler state.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryStore>,
    pub products: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: CategoryStore + ProductStore + 'static,
    {
        Self {
            categories: store.clone(),
            products: store,
        }
    }
}
