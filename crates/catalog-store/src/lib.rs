//! Record store for the catalog browser.
//!
//! This crate is the store side of the view pipeline:
//! - [`Predicate`] and [`Clause`], the conjunctive match conditions a query carries
//! - [`CatalogStore`], the async store trait with push-based [`SnapshotStream`]s
//! - [`InMemoryCatalogStore`], a store that keeps records in memory and re-emits
//!   snapshots on every mutation that changes a query's match set

pub mod error;
pub mod memory;
pub mod query;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryCatalogStore;
pub use query::{Clause, Predicate};
pub use store::{CatalogStore, CatalogStoreExt, SnapshotStream};
