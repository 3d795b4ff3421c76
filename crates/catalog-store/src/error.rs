use common::{CategoryId, ProductId};
use thiserror::Error;

/// Errors that can occur when interacting with the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No product with this id exists.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No category with this id exists.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// A record failed validation before being written.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The store backing a snapshot stream is no longer available.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for catalog store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
