//! Concurrency-safe favorites container with a multicast change feed.
//!
//! Mutations are serialized by a single gate held only across the
//! read-modify-write of the set. Readers never take the gate: they clone
//! the current snapshot out of a separate read-write cell.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;

use crate::catalog::ProductId;

use super::set::FavoritesSet;

/// Default number of snapshots buffered per feed subscriber.
pub const DEFAULT_FEED_CAPACITY: usize = 64;

/// A favorites set tagged with the mutation that produced it.
///
/// `revision` is 0 for the initial empty set and increases by one per
/// applied toggle, so it totally orders all snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesSnapshot {
    pub revision: u64,
    pub favorites: FavoritesSet,
}

/// Thread-safe favorites store.
///
/// Cheap to clone; all clones share the same set and feed.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// Mutation gate. Guards the revision counter.
    gate: Mutex<u64>,
    current: RwLock<FavoritesSnapshot>,
    feed: broadcast::Sender<FavoritesSnapshot>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// Create an empty store whose subscribers buffer up to `feed_capacity`
    /// snapshots before lagging.
    pub fn with_capacity(feed_capacity: usize) -> Self {
        let (feed, _) = broadcast::channel(feed_capacity.max(1));
        Self {
            inner: Arc::new(StoreInner {
                gate: Mutex::new(0),
                current: RwLock::new(FavoritesSnapshot {
                    revision: 0,
                    favorites: FavoritesSet::new(),
                }),
                feed,
            }),
        }
    }

    /// The current favorites set. Never waits on the mutation gate.
    pub fn current_favorites(&self) -> FavoritesSet {
        self.inner.current.read().favorites.clone()
    }

    /// The current set together with its revision.
    pub fn snapshot(&self) -> FavoritesSnapshot {
        self.inner.current.read().clone()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.inner.current.read().favorites.contains(id)
    }

    /// Add `id` if absent, remove it otherwise.
    ///
    /// Total over all ids; the catalog is not consulted. Concurrent calls
    /// are applied one at a time in gate order, and each applied call
    /// publishes exactly one snapshot to the feed.
    pub fn toggle(&self, id: impl Into<ProductId>) {
        let id = id.into();
        let mut gate = self.inner.gate.lock();

        let (favorites, added) = self.inner.current.read().favorites.toggled(&id);
        *gate += 1;
        let revision = *gate;
        let snapshot = FavoritesSnapshot {
            revision,
            favorites,
        };
        *self.inner.current.write() = snapshot.clone();

        // `send` only enqueues and wakes receivers; no subscriber code runs
        // here. Publishing before releasing the gate keeps feed order equal
        // to gate order.
        if self.inner.feed.send(snapshot).is_err() {
            tracing::trace!("Favorites changed with no feed subscribers");
        }
        drop(gate);

        tracing::debug!(
            product_id = %id,
            added,
            revision,
            "Favorite toggled"
        );
    }

    /// Subscribe to the change feed.
    ///
    /// The first item is the current snapshot; every later item is the
    /// snapshot produced by one toggle, in application order.
    pub fn changes(&self) -> FavoritesSubscription {
        // Subscribing under the gate means no toggle can land between
        // reading the entry snapshot and attaching the receiver.
        let _gate = self.inner.gate.lock();
        let receiver = self.inner.feed.subscribe();
        let entry = self.inner.current.read().clone();
        FavoritesSubscription {
            entry: Some(entry),
            last_revision: None,
            receiver,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.feed.receiver_count()
    }
}

impl Default for FavoritesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("current", &*self.inner.current.read())
            .finish()
    }
}

/// One subscriber's view of the favorites feed.
pub struct FavoritesSubscription {
    entry: Option<FavoritesSnapshot>,
    last_revision: Option<u64>,
    receiver: broadcast::Receiver<FavoritesSnapshot>,
    store: Weak<StoreInner>,
}

impl FavoritesSubscription {
    /// Wait for the next snapshot.
    ///
    /// Returns `None` once every store handle has been dropped. Revisions
    /// observed through one subscription are strictly increasing. A
    /// subscriber that falls more than the feed capacity behind skips ahead
    /// to the store's current snapshot.
    pub async fn recv(&mut self) -> Option<FavoritesSnapshot> {
        if let Some(entry) = self.entry.take() {
            return Some(self.accept(entry));
        }

        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => {
                    if self.is_stale(&snapshot) {
                        continue;
                    }
                    return Some(self.accept(snapshot));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Favorites subscriber lagged, resyncing");
                    let Some(store) = self.store.upgrade() else {
                        continue;
                    };
                    let current = store.current.read().clone();
                    if self.is_stale(&current) {
                        continue;
                    }
                    return Some(self.accept(current));
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn is_stale(&self, snapshot: &FavoritesSnapshot) -> bool {
        self.last_revision
            .is_some_and(|last| snapshot.revision <= last)
    }

    fn accept(&mut self, snapshot: FavoritesSnapshot) -> FavoritesSnapshot {
        self.last_revision = Some(snapshot.revision);
        snapshot
    }
}
