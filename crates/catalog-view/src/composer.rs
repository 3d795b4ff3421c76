//! The view composer: one upstream source, one sort key, many observers.

use std::sync::{Arc, Weak};

use catalog_query::{SortKey, SortPolicy};
use catalog_store::SnapshotStream;
use chrono::Utc;
use common::ProductView;
use futures_util::StreamExt;
use tokio::sync::{Mutex, broadcast};
use tokio::task::JoinHandle;

use crate::snapshot::{SortedSnapshot, SubscriptionId, ViewUpdate};
use crate::{Result, ViewError};

/// Default number of updates buffered for slow observers.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Owned handle to the task draining an upstream snapshot stream.
///
/// Dropping or detaching the handle aborts the task.
#[derive(Debug)]
pub struct SubscriptionHandle {
    id: SubscriptionId,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Returns the subscription this handle drives.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Stops the upstream task.
    pub fn detach(self) {
        tracing::debug!(subscription = %self.id, "detaching source");
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct ComposerState {
    active: Option<SubscriptionHandle>,
    /// Last snapshot from the active source, in store order.
    cached: Option<Arc<[ProductView]>>,
    key: SortKey,
    latest: Option<SortedSnapshot>,
}

impl ComposerState {
    fn is_active(&self, id: SubscriptionId) -> bool {
        self.active.as_ref().is_some_and(|handle| handle.id == id)
    }
}

struct Inner {
    state: Mutex<ComposerState>,
    updates: broadcast::Sender<ViewUpdate>,
}

impl Inner {
    /// Sorts a copy of the cached snapshot under the current key and publishes it.
    ///
    /// Must be called with the state lock held.
    fn publish(&self, state: &mut ComposerState) -> Option<SortedSnapshot> {
        let source = state.active.as_ref()?.id;
        let cached = state.cached.as_ref()?;

        let snapshot = SortedSnapshot {
            source,
            key: state.key,
            items: SortPolicy::sorted(cached, state.key).into(),
            published_at: Utc::now(),
        };
        state.latest = Some(snapshot.clone());

        // No receivers is not an error: the view may be unobserved.
        let observers = self
            .updates
            .send(ViewUpdate::Snapshot(snapshot.clone()))
            .unwrap_or(0);
        metrics::counter!("catalog_view_snapshots_published_total").increment(1);
        tracing::debug!(
            subscription = %source,
            key = %snapshot.key,
            items = snapshot.len(),
            observers,
            "published sorted snapshot"
        );

        Some(snapshot)
    }
}

/// Mediates between a store snapshot stream and view observers.
///
/// The composer owns at most one upstream subscription. Every snapshot the
/// active subscription emits is cached unsorted, sorted under the current
/// [`SortKey`] and broadcast. [`reorder`](Self::reorder) re-sorts the cached
/// snapshot without going back to the store.
///
/// All state sits behind one mutex. Upstream emissions take the same lock
/// and check that their subscription is still the active one before
/// touching anything, so a superseded source can never publish.
#[derive(Clone)]
pub struct ViewComposer {
    inner: Arc<Inner>,
}

impl ViewComposer {
    /// Creates an unpopulated composer.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an unpopulated composer whose observers can lag by up to
    /// `capacity` updates before missing some.
    pub fn with_capacity(capacity: usize) -> Self {
        let (updates, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ComposerState {
                    active: None,
                    cached: None,
                    key: SortKey::natural(),
                    latest: None,
                }),
                updates,
            }),
        }
    }

    /// Replaces the upstream source.
    ///
    /// Detaches the previous subscription, forgets its snapshot, resets the
    /// ordering to [`SortKey::natural`] and starts draining `stream`.
    /// Returns once subscribed; the first snapshot arrives asynchronously.
    pub async fn set_source(&self, stream: SnapshotStream) -> SubscriptionId {
        let mut state = self.inner.state.lock().await;

        if let Some(previous) = state.active.take() {
            previous.detach();
        }
        state.key = SortKey::natural();
        state.cached = None;

        let id = SubscriptionId::new();
        let task = tokio::spawn(drive(Arc::downgrade(&self.inner), id, stream));
        state.active = Some(SubscriptionHandle { id, task });

        tracing::info!(subscription = %id, "attached new source");
        id
    }

    /// Detaches the current source, if any, leaving the view unpopulated.
    pub async fn detach(&self) {
        let mut state = self.inner.state.lock().await;
        if let Some(previous) = state.active.take() {
            previous.detach();
        }
        state.cached = None;
    }

    /// Re-sorts the most recent snapshot under `key` and publishes it.
    ///
    /// The key is recorded even when this fails, so the next snapshot from
    /// the current source is sorted under it.
    pub async fn reorder(&self, key: SortKey) -> Result<SortedSnapshot> {
        let mut state = self.inner.state.lock().await;
        state.key = key;

        let Some(snapshot) = self.inner.publish(&mut state) else {
            tracing::warn!(%key, "reorder requested before first snapshot");
            return Err(ViewError::ReorderBeforeReady);
        };

        metrics::counter!("catalog_view_reorders_total").increment(1);
        Ok(snapshot)
    }

    /// Returns the ordering currently applied.
    pub async fn current_ordering(&self) -> SortKey {
        self.inner.state.lock().await.key
    }

    /// Returns the ordering restored on every source change.
    pub const fn natural_ordering(&self) -> SortKey {
        SortKey::natural()
    }

    /// Returns the most recently published snapshot from the active source.
    pub async fn latest(&self) -> Option<SortedSnapshot> {
        let state = self.inner.state.lock().await;
        state
            .latest
            .as_ref()
            .filter(|snapshot| state.is_active(snapshot.source))
            .cloned()
    }

    /// Returns true once the active source has delivered a snapshot.
    pub async fn is_populated(&self) -> bool {
        self.inner.state.lock().await.cached.is_some()
    }

    /// Returns the active subscription, if any.
    pub async fn active_subscription(&self) -> Option<SubscriptionId> {
        self.inner
            .state
            .lock()
            .await
            .active
            .as_ref()
            .map(SubscriptionHandle::id)
    }

    /// Subscribes to sorted snapshots and source failures.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.inner.updates.subscribe()
    }
}

impl Default for ViewComposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains one upstream stream on behalf of subscription `id`.
///
/// Holds the composer weakly so an abandoned composer is not kept alive by
/// its own source.
async fn drive(composer: Weak<Inner>, id: SubscriptionId, mut stream: SnapshotStream) {
    while let Some(item) = stream.next().await {
        let Some(inner) = composer.upgrade() else {
            break;
        };
        let mut state = inner.state.lock().await;

        if !state.is_active(id) {
            metrics::counter!("catalog_view_stale_emissions_total").increment(1);
            tracing::debug!(subscription = %id, "dropping emission from superseded source");
            return;
        }

        match item {
            Ok(snapshot) => {
                state.cached = Some(snapshot.into());
                inner.publish(&mut state);
            }
            Err(err) => {
                metrics::counter!("catalog_view_source_failures_total").increment(1);
                let observers = inner
                    .updates
                    .send(ViewUpdate::SourceFailed {
                        source: id,
                        message: err.to_string(),
                    })
                    .unwrap_or(0);
                tracing::warn!(
                    subscription = %id,
                    error = %err,
                    observers,
                    "source stream failed"
                );
            }
        }
    }

    tracing::debug!(subscription = %id, "source stream ended");
}
