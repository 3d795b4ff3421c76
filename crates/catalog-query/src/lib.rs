//! Filtering and ordering for the catalog view.
//!
//! - [`FilterCriteria`], what a user asked to see
//! - [`QueryBuilder`], which turns criteria into a store [`Predicate`](catalog_store::Predicate)
//! - [`SortKey`] and [`SortPolicy`], the stable orderings applied to snapshots

pub mod builder;
pub mod criteria;
pub mod error;
pub mod sort;

pub use builder::QueryBuilder;
pub use criteria::FilterCriteria;
pub use error::{QueryError, Result};
pub use sort::{SortKey, SortPolicy};
