//! What observers of the view receive.

use std::sync::Arc;

use catalog_query::SortKey;
use chrono::{DateTime, Utc};
use common::ProductView;
use uuid::Uuid;

/// Identifies one attachment of an upstream snapshot stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully sorted snapshot, as published to observers.
#[derive(Debug, Clone)]
pub struct SortedSnapshot {
    /// The source the items came from.
    pub source: SubscriptionId,

    /// The ordering the items are in.
    pub key: SortKey,

    /// The matching views, sorted under `key`.
    pub items: Arc<[ProductView]>,

    /// When this snapshot was published.
    pub published_at: DateTime<Utc>,
}

impl SortedSnapshot {
    /// Returns the number of views.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the view names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(ProductView::name)
    }
}

/// A message delivered to view observers.
#[derive(Debug, Clone)]
pub enum ViewUpdate {
    /// A newly sorted snapshot.
    Snapshot(SortedSnapshot),

    /// The active source reported a failure. The last good snapshot stays cached.
    SourceFailed {
        source: SubscriptionId,
        message: String,
    },
}

impl ViewUpdate {
    /// Returns the source this update belongs to.
    pub fn source(&self) -> SubscriptionId {
        match self {
            ViewUpdate::Snapshot(snapshot) => snapshot.source,
            ViewUpdate::SourceFailed { source, .. } => *source,
        }
    }

    /// Returns the snapshot, if this update carries one.
    pub fn into_snapshot(self) -> Option<SortedSnapshot> {
        match self {
            ViewUpdate::Snapshot(snapshot) => Some(snapshot),
            ViewUpdate::SourceFailed { .. } => None,
        }
    }
}
