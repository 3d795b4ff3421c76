use std::pin::Pin;

use async_trait::async_trait;
use common::{
    CategoryId, CategoryRecord, NewCategory, NewProduct, ProductId, ProductRecord, ProductView,
};
use futures_core::Stream;
use futures_util::StreamExt;

use crate::{Predicate, Result, StoreError};

/// A push-based stream of snapshots.
///
/// Each item is the full, unordered list of views currently matching the
/// query. A stream yields one snapshot right after subscription and a new
/// one whenever a mutation changes the match set.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = Result<Vec<ProductView>>> + Send>>;

/// Core trait for catalog store implementations.
///
/// The store owns product and category records, evaluates predicates
/// against the joined view and notifies open snapshot streams of changes.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Opens a snapshot stream over every product.
    async fn get_all(&self) -> Result<SnapshotStream>;

    /// Opens a snapshot stream over the products matching `predicate`.
    async fn query(&self, predicate: Predicate) -> Result<SnapshotStream>;

    /// Inserts a product and returns it with its assigned id.
    async fn insert_product(&self, product: NewProduct) -> Result<ProductRecord>;

    /// Replaces the product with the same id.
    async fn update_product(&self, product: ProductRecord) -> Result<()>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> Result<()>;

    /// Loads a single product.
    async fn get_product(&self, id: ProductId) -> Result<Option<ProductRecord>>;

    /// Inserts a category and returns it with its assigned id.
    async fn insert_category(&self, category: NewCategory) -> Result<CategoryRecord>;

    /// Replaces the category with the same id.
    async fn update_category(&self, category: CategoryRecord) -> Result<()>;

    /// Deletes a category. Products that referenced it become uncategorised
    /// in the joined view.
    async fn delete_category(&self, id: CategoryId) -> Result<()>;

    /// Lists all categories.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>>;
}

/// Extension trait providing convenience methods for catalog stores.
#[async_trait]
pub trait CatalogStoreExt: CatalogStore {
    /// Runs `predicate` once and returns the first snapshot.
    async fn query_once(&self, predicate: Predicate) -> Result<Vec<ProductView>> {
        let mut stream = self.query(predicate).await?;
        match stream.next().await {
            Some(snapshot) => snapshot,
            None => Err(StoreError::Unavailable(
                "snapshot stream ended before its first emission".to_string(),
            )),
        }
    }

    /// Checks if a product exists.
    async fn product_exists(&self, id: ProductId) -> Result<bool> {
        Ok(self.get_product(id).await?.is_some())
    }

    /// Inserts several products, returning them in input order.
    async fn insert_products(&self, products: Vec<NewProduct>) -> Result<Vec<ProductRecord>> {
        let mut inserted = Vec::with_capacity(products.len());
        for product in products {
            inserted.push(self.insert_product(product).await?);
        }
        Ok(inserted)
    }
}

// Blanket implementation for all CatalogStore implementations
impl<T: CatalogStore + ?Sized> CatalogStoreExt for T {}

/// Checks a product before it is written.
pub fn validate_product_name(name: &str) -> std::result::Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidRecord(
            "Product name must not be blank".to_string(),
        ));
    }
    Ok(())
}

/// Checks a category before it is written.
pub fn validate_category_name(name: &str) -> std::result::Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidRecord(
            "Category name must not be blank".to_string(),
        ));
    }
    Ok(())
}
