//! Caller-facing catalog browser.

use catalog_query::{FilterCriteria, QueryBuilder, SortKey};
use catalog_store::CatalogStore;
use tokio::sync::broadcast;

use crate::Result;
use crate::composer::ViewComposer;
use crate::snapshot::{SortedSnapshot, SubscriptionId, ViewUpdate};

/// Browses a catalog store through a single sorted view.
///
/// `show_all`, `search` and `filter_by_category` each open a new store
/// stream and hand it to the [`ViewComposer`], which resets the ordering to
/// natural. `reorder` only re-sorts what the view already holds.
pub struct CatalogBrowser<S: CatalogStore> {
    store: S,
    composer: ViewComposer,
}

impl<S: CatalogStore> CatalogBrowser<S> {
    /// Creates a browser over `store` with an empty view.
    pub fn new(store: S) -> Self {
        Self::with_composer(store, ViewComposer::new())
    }

    /// Creates a browser over `store` that publishes through `composer`.
    pub fn with_composer(store: S, composer: ViewComposer) -> Self {
        Self { store, composer }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the view composer.
    pub fn composer(&self) -> &ViewComposer {
        &self.composer
    }

    /// Shows every product.
    #[tracing::instrument(skip(self))]
    pub async fn show_all(&self) -> Result<SubscriptionId> {
        let stream = self.store.get_all().await?;
        Ok(self.composer.set_source(stream).await)
    }

    /// Shows the products matching `criteria`.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<SubscriptionId> {
        let predicate = QueryBuilder::build(criteria);
        let stream = self.store.query(predicate).await?;
        Ok(self.composer.set_source(stream).await)
    }

    /// Shows the products in one category. `category_id <= 0` shows everything.
    #[tracing::instrument(skip(self))]
    pub async fn filter_by_category(&self, category_id: i64) -> Result<SubscriptionId> {
        let stream = self
            .store
            .query(QueryBuilder::for_category(category_id))
            .await?;
        Ok(self.composer.set_source(stream).await)
    }

    /// Re-sorts the current view without querying the store.
    #[tracing::instrument(skip(self))]
    pub async fn reorder(&self, key: SortKey) -> Result<SortedSnapshot> {
        self.composer.reorder(key).await
    }

    /// Returns the ordering currently applied.
    pub async fn current_ordering(&self) -> SortKey {
        self.composer.current_ordering().await
    }

    /// Returns the ordering restored by every new search.
    pub fn natural_ordering(&self) -> SortKey {
        self.composer.natural_ordering()
    }

    /// Returns the latest sorted snapshot, if the view is populated.
    pub async fn latest(&self) -> Option<SortedSnapshot> {
        self.composer.latest().await
    }

    /// Subscribes to sorted snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.composer.subscribe()
    }
}
