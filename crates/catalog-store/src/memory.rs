use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use common::{
    CategoryId, CategoryRecord, NewCategory, NewProduct, ProductId, ProductRecord, ProductView,
};
use futures_util::stream;
use tokio::sync::{RwLock, watch};

use crate::{
    Predicate, Result, StoreError,
    store::{CatalogStore, SnapshotStream, validate_category_name, validate_product_name},
};

#[derive(Default)]
struct CatalogData {
    products: BTreeMap<ProductId, ProductRecord>,
    categories: BTreeMap<CategoryId, CategoryRecord>,
    last_product_id: i64,
    last_category_id: i64,
}

impl CatalogData {
    fn join(&self, product: &ProductRecord) -> ProductView {
        let category = self.categories.get(&product.category_id).cloned();
        ProductView::join(product.clone(), category)
    }

    fn matching(&self, predicate: &Predicate) -> Vec<ProductView> {
        self.products
            .values()
            .map(|product| self.join(product))
            .filter(|view| predicate.matches(view))
            .collect()
    }
}

/// In-memory catalog store.
///
/// Records live behind a shared lock; every mutation bumps a revision
/// counter that open snapshot streams watch to re-evaluate their predicate.
#[derive(Clone)]
pub struct InMemoryCatalogStore {
    data: Arc<RwLock<CatalogData>>,
    revision: Arc<watch::Sender<u64>>,
    queries: Arc<AtomicU64>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            data: Arc::new(RwLock::new(CatalogData::default())),
            revision: Arc::new(revision),
            queries: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns how many snapshot streams have been opened.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    /// Returns the total number of products stored.
    pub async fn product_count(&self) -> usize {
        self.data.read().await.products.len()
    }

    /// Clears all records and notifies open streams.
    pub async fn clear(&self) {
        {
            let mut data = self.data.write().await;
            data.products.clear();
            data.categories.clear();
        }
        self.notify_changed();
    }

    fn notify_changed(&self) {
        self.revision.send_modify(|revision| *revision += 1);
        metrics::counter!("catalog_store_mutations_total").increment(1);
    }

    fn open_stream(&self, predicate: Predicate) -> SnapshotStream {
        self.queries.fetch_add(1, Ordering::SeqCst);
        metrics::counter!("catalog_store_queries_total").increment(1);

        let changes = self.revision.subscribe();
        let data = Arc::clone(&self.data);

        let snapshots = stream::unfold(
            (data, changes, predicate, None::<Vec<ProductView>>),
            |(data, mut changes, predicate, last)| async move {
                loop {
                    if last.is_some() && changes.changed().await.is_err() {
                        return None;
                    }
                    let matches = data.read().await.matching(&predicate);
                    if last.as_ref() == Some(&matches) {
                        continue;
                    }
                    tracing::debug!(matches = matches.len(), "snapshot emitted");
                    let seen = Some(matches.clone());
                    return Some((Ok::<_, StoreError>(matches), (data, changes, predicate, seen)));
                }
            },
        );

        Box::pin(snapshots)
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn get_all(&self) -> Result<SnapshotStream> {
        Ok(self.open_stream(Predicate::match_all()))
    }

    async fn query(&self, predicate: Predicate) -> Result<SnapshotStream> {
        tracing::debug!(clauses = predicate.clauses().len(), "opening query stream");
        Ok(self.open_stream(predicate))
    }

    async fn insert_product(&self, product: NewProduct) -> Result<ProductRecord> {
        validate_product_name(&product.name)?;

        let record = {
            let mut data = self.data.write().await;
            data.last_product_id += 1;
            let record = product.with_id(ProductId::new(data.last_product_id));
            data.products.insert(record.id, record.clone());
            record
        };
        self.notify_changed();

        Ok(record)
    }

    async fn update_product(&self, product: ProductRecord) -> Result<()> {
        validate_product_name(&product.name)?;

        {
            let mut data = self.data.write().await;
            let slot = data
                .products
                .get_mut(&product.id)
                .ok_or(StoreError::ProductNotFound(product.id))?;
            *slot = product;
        }
        self.notify_changed();

        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.data
            .write()
            .await
            .products
            .remove(&id)
            .ok_or(StoreError::ProductNotFound(id))?;
        self.notify_changed();
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>> {
        Ok(self.data.read().await.products.get(&id).cloned())
    }

    async fn insert_category(&self, category: NewCategory) -> Result<CategoryRecord> {
        validate_category_name(&category.name)?;

        let record = {
            let mut data = self.data.write().await;
            data.last_category_id += 1;
            let record = CategoryRecord {
                id: CategoryId::new(data.last_category_id),
                name: category.name,
            };
            data.categories.insert(record.id, record.clone());
            record
        };
        self.notify_changed();

        Ok(record)
    }

    async fn update_category(&self, category: CategoryRecord) -> Result<()> {
        validate_category_name(&category.name)?;

        {
            let mut data = self.data.write().await;
            let slot = data
                .categories
                .get_mut(&category.id)
                .ok_or(StoreError::CategoryNotFound(category.id))?;
            *slot = category;
        }
        self.notify_changed();

        Ok(())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        self.data
            .write()
            .await
            .categories
            .remove(&id)
            .ok_or(StoreError::CategoryNotFound(id))?;
        self.notify_changed();
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
        Ok(self.data.read().await.categories.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::PriceValue;
    use futures_util::StreamExt;

    fn product(name: &str, units: i64) -> NewProduct {
        NewProduct::new(name, PriceValue::from_minor_units(units))
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryCatalogStore::new();

        let first = store.insert_product(product("Taps", 599)).await.unwrap();
        let second = store.insert_product(product("Sink", 1099)).await.unwrap();

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(store.product_count().await, 2);
    }

    #[tokio::test]
    async fn insert_rejects_blank_name() {
        let store = InMemoryCatalogStore::new();
        let result = store.insert_product(product("  ", 599)).await;
        assert!(matches!(result, Err(StoreError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let store = InMemoryCatalogStore::new();
        let mut record = store.insert_product(product("Taps", 599)).await.unwrap();

        record.name = "Mixer Taps".to_string();
        record.notes = "chrome".to_string();
        store.update_product(record.clone()).await.unwrap();

        let loaded = store.get_product(record.id).await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn update_missing_product_fails() {
        let store = InMemoryCatalogStore::new();
        let record = product("Taps", 599).with_id(ProductId::new(9));
        let result = store.update_product(record).await;
        assert_eq!(result, Err(StoreError::ProductNotFound(ProductId::new(9))));
    }

    #[tokio::test]
    async fn delete_missing_category_fails() {
        let store = InMemoryCatalogStore::new();
        let result = store.delete_category(CategoryId::new(3)).await;
        assert_eq!(result, Err(StoreError::CategoryNotFound(CategoryId::new(3))));
    }

    #[tokio::test]
    async fn stream_emits_initial_snapshot() {
        let store = InMemoryCatalogStore::new();
        store.insert_product(product("Taps", 599)).await.unwrap();

        let mut stream = store.get_all().await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.query_count(), 1);
    }

    #[tokio::test]
    async fn stream_re_emits_after_mutation() {
        let store = InMemoryCatalogStore::new();
        store.insert_product(product("Taps", 599)).await.unwrap();

        let mut stream = store.get_all().await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);

        store.insert_product(product("Sink", 1099)).await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn stream_skips_mutations_outside_match_set() {
        let store = InMemoryCatalogStore::new();
        let cheap = store.insert_product(product("Sweets", 99)).await.unwrap();

        let predicate = Predicate::new().price_range(
            PriceValue::from_minor_units(0),
            PriceValue::from_minor_units(100),
        );
        let mut stream = store.query(predicate).await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap().len(), 1);

        // Outside the range: no new emission for this one.
        store.insert_product(product("Pillows", 1899)).await.unwrap();
        // Inside the range: this one is observed.
        let mut updated = cheap.clone();
        updated.name = "Mints".to_string();
        store.update_product(updated).await.unwrap();

        let snapshot = stream.next().await.unwrap().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name(), "Mints");
    }

    #[tokio::test]
    async fn deleted_category_joins_as_none() {
        let store = InMemoryCatalogStore::new();
        let category = store
            .insert_category(NewCategory::new("Bathroom"))
            .await
            .unwrap();
        store
            .insert_product(product("Taps", 599).category(category.id))
            .await
            .unwrap();

        store.delete_category(category.id).await.unwrap();

        let mut stream = store.get_all().await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();
        assert!(snapshot[0].category.is_none());
        assert_eq!(snapshot[0].product.category_id, category.id);
    }

    #[tokio::test]
    async fn join_resolves_category_only_for_categorised_products() {
        let store = InMemoryCatalogStore::new();
        let category = store
            .insert_category(NewCategory::new("Bathroom"))
            .await
            .unwrap();
        store
            .insert_product(product("Taps", 599).category(category.id))
            .await
            .unwrap();
        store.insert_product(product("Sweets", 99)).await.unwrap();

        let mut stream = store.get_all().await.unwrap();
        let snapshot = stream.next().await.unwrap().unwrap();

        let taps = snapshot.iter().find(|v| v.name() == "Taps").unwrap();
        let sweets = snapshot.iter().find(|v| v.name() == "Sweets").unwrap();
        assert_eq!(taps.category_name(), Some("Bathroom"));
        assert!(sweets.category.is_none());
        assert!(sweets.product.category_id.is_none());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryCatalogStore::new();
        store.insert_product(product("Taps", 599)).await.unwrap();
        store
            .insert_category(NewCategory::new("Bathroom"))
            .await
            .unwrap();

        store.clear().await;

        assert_eq!(store.product_count().await, 0);
        assert!(store.list_categories().await.unwrap().is_empty());
    }
}
