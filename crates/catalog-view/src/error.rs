//! View error types.

use thiserror::Error;

/// Errors that can occur while driving the product view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A reorder was requested before the active source delivered a snapshot.
    #[error("Cannot reorder: no snapshot has been received from the current source")]
    ReorderBeforeReady,

    /// The store refused to open a snapshot stream.
    #[error("Store error: {0}")]
    Store(#[from] catalog_store::StoreError),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;
