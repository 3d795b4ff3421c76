//! HTTP route handlers.

pub mod categories;
pub mod health;
pub mod metrics;
pub mod products;
pub mod view;

use std::time::Duration;

use catalog_store::CatalogStore;
use catalog_view::CatalogBrowser;

/// Shared application state accessible from all handlers.
pub struct AppState<S: CatalogStore> {
    pub browser: CatalogBrowser<S>,
    /// How long a source-changing view route waits for its first snapshot.
    pub settle_timeout: Duration,
}

impl<S: CatalogStore> AppState<S> {
    /// Returns the store behind the browser.
    pub fn store(&self) -> &S {
        self.browser.store()
    }
}
