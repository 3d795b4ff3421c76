//! Reactive filtered and sorted view over a catalog store.
//!
//! This crate separates "which records" from "what order":
//! - [`ViewComposer`] owns one upstream snapshot stream at a time, sorts each
//!   emission under the current [`SortKey`](catalog_query::SortKey) and
//!   broadcasts the result; it re-sorts on demand without re-querying
//! - [`CatalogBrowser`] is the caller surface: show all, search, filter by
//!   category, reorder
//! - [`SortedSnapshot`] and [`ViewUpdate`] are what observers receive

pub mod browser;
pub mod composer;
pub mod error;
pub mod snapshot;

pub use browser::CatalogBrowser;
pub use composer::{DEFAULT_CHANNEL_CAPACITY, SubscriptionHandle, ViewComposer};
pub use error::{Result, ViewError};
pub use snapshot::{SortedSnapshot, SubscriptionId, ViewUpdate};
