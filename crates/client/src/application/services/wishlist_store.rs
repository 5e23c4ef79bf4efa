//! Wishlist Store - cached membership set mirrored from the remote API
//!
//! The store holds the ids of every event the signed-in user has favorited.
//! Reads are synchronous against the cache. Mutations go to the server first
//! and only touch the cache once the server has confirmed them.
//!
//! Mutations for the same event id are serialized through a per-id async
//! mutex, so `add(x)` immediately followed by `remove(x)` is applied in call
//! order. `sign_out()` clears the cache and invalidates anything still in
//! flight for the old session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;
use tokio::sync::{watch, Mutex};

use eventhub_domain::{EventId, Wishlist};

use crate::application::error::WishlistError;
use crate::ports::outbound::{NotifierPort, SessionPort, UserNotice, WishlistApiPort};

/// Immutable view of the cache published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistSnapshot {
    pub revision: u64,
    pub event_ids: Vec<EventId>,
}

impl WishlistSnapshot {
    fn of(wishlist: &Wishlist) -> Self {
        Self {
            revision: wishlist.revision(),
            event_ids: wishlist.sorted(),
        }
    }

    pub fn contains(&self, event_id: &EventId) -> bool {
        self.event_ids.contains(event_id)
    }
}

/// Result of `initialize()`, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// No credential; cache left empty without a network call.
    Anonymous,
    /// Authoritative listing applied.
    Loaded { count: usize },
    /// Listing failed; cache reset to empty.
    Degraded,
    /// A sign-out or newer initialize happened while the listing was in
    /// flight; the response was discarded.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Add,
    Remove,
    Toggle,
}

struct StoreState {
    api: Arc<dyn WishlistApiPort>,
    session: Arc<dyn SessionPort>,
    notifier: Arc<dyn NotifierPort>,
    cache: RwLock<Wishlist>,
    /// Bumped by `sign_out()`; responses from an older epoch are dropped.
    session_epoch: AtomicU64,
    /// Bumped by each `initialize()`; only the newest listing is applied.
    fetch_seq: AtomicU64,
    id_locks: DashMap<EventId, Arc<Mutex<()>>>,
    pending: DashMap<EventId, usize>,
    changes: watch::Sender<WishlistSnapshot>,
}

/// Client-side wishlist cache kept in sync with the remote store.
///
/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct WishlistStore {
    state: Arc<StoreState>,
}

impl WishlistStore {
    pub fn new(
        api: Arc<dyn WishlistApiPort>,
        session: Arc<dyn SessionPort>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        let (changes, _) = watch::channel(WishlistSnapshot::default());
        Self {
            state: Arc::new(StoreState {
                api,
                session,
                notifier,
                cache: RwLock::new(Wishlist::new()),
                session_epoch: AtomicU64::new(0),
                fetch_seq: AtomicU64::new(0),
                id_locks: DashMap::new(),
                pending: DashMap::new(),
                changes,
            }),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn contains(&self, event_id: &EventId) -> bool {
        self.read_cache().contains(event_id)
    }

    pub fn len(&self) -> usize {
        self.read_cache().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_cache().is_empty()
    }

    pub fn snapshot(&self) -> WishlistSnapshot {
        WishlistSnapshot::of(&self.read_cache())
    }

    /// Receive a new snapshot after every confirmed change.
    pub fn subscribe(&self) -> watch::Receiver<WishlistSnapshot> {
        self.state.changes.subscribe()
    }

    /// True while an add/remove/toggle for `event_id` is in flight.
    ///
    /// UI shells use this to disable the favorite control and avoid
    /// double submissions.
    pub fn is_pending(&self, event_id: &EventId) -> bool {
        self.state.pending.contains_key(event_id)
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Load the authoritative wishlist for the current session.
    ///
    /// Never fails: without a credential the cache is emptied and no request
    /// is made; on any remote failure the cache is emptied and the error is
    /// logged for operators only.
    pub async fn initialize(&self) -> InitOutcome {
        let epoch = self.state.session_epoch.load(Ordering::SeqCst);
        let seq = self.state.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(credential) = self.state.session.credential() else {
            tracing::debug!("No credential present, wishlist left empty");
            let mut cache = self.write_cache();
            cache.clear();
            self.publish(&cache);
            return InitOutcome::Anonymous;
        };

        let result = self.state.api.list(&credential).await;

        let mut cache = self.write_cache();
        if self.state.session_epoch.load(Ordering::SeqCst) != epoch
            || self.state.fetch_seq.load(Ordering::SeqCst) != seq
        {
            tracing::debug!("Discarding stale wishlist listing");
            return InitOutcome::Superseded;
        }

        let outcome = match result {
            Ok(event_ids) => {
                cache.replace_all(event_ids);
                tracing::info!(count = cache.len(), "Wishlist loaded");
                InitOutcome::Loaded { count: cache.len() }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load wishlist, continuing with empty set");
                cache.clear();
                InitOutcome::Degraded
            }
        };
        self.publish(&cache);
        outcome
    }

    /// Drop all cached state for the current session.
    ///
    /// Listings and mutations still in flight from before the call are
    /// discarded when they resolve.
    pub fn sign_out(&self) {
        let mut cache = self.write_cache();
        self.state.session_epoch.fetch_add(1, Ordering::SeqCst);
        cache.clear();
        self.publish(&cache);
        tracing::debug!("Wishlist cleared on sign-out");
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Favorite an event. The cache changes only after server confirmation.
    pub async fn add(&self, event_id: EventId) -> Result<(), WishlistError> {
        self.mutate(event_id, Mutation::Add).await.map(|_| ())
    }

    /// Unfavorite an event. The cache changes only after server confirmation.
    pub async fn remove(&self, event_id: EventId) -> Result<(), WishlistError> {
        self.mutate(event_id, Mutation::Remove).await.map(|_| ())
    }

    /// Remove if currently favorited, otherwise add.
    ///
    /// Returns the membership state after the confirmed change. The
    /// add-or-remove decision is taken after earlier operations on the same
    /// id have finished.
    pub async fn toggle(&self, event_id: EventId) -> Result<bool, WishlistError> {
        self.mutate(event_id, Mutation::Toggle).await
    }

    async fn mutate(&self, event_id: EventId, mutation: Mutation) -> Result<bool, WishlistError> {
        let epoch = self.state.session_epoch.load(Ordering::SeqCst);
        if self.state.session.credential().is_none() {
            return Err(self.reject(&event_id, WishlistError::NoCredential));
        }

        let _pending = PendingGuard::enter(&self.state.pending, &event_id);
        let lock = self.lock_for(&event_id);
        let result = {
            let _serialized = lock.lock().await;
            self.mutate_serialized(epoch, &event_id, mutation).await
        };
        drop(lock);
        self.state
            .id_locks
            .remove_if(&event_id, |_, lock| Arc::strong_count(lock) == 1);

        result.map_err(|e| self.reject(&event_id, e))
    }

    /// Runs with the per-id lock held. `epoch` is the session the caller
    /// issued the mutation in; a sign-out since then cancels it.
    async fn mutate_serialized(
        &self,
        epoch: u64,
        event_id: &EventId,
        mutation: Mutation,
    ) -> Result<bool, WishlistError> {
        // Earlier operations on this id may have outlived the session
        if self.state.session_epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(event_id = %event_id, "Session ended while wishlist update was queued");
            return Err(WishlistError::NoCredential);
        }
        let credential = self
            .state
            .session
            .credential()
            .ok_or(WishlistError::NoCredential)?;

        let add = match mutation {
            Mutation::Add => true,
            Mutation::Remove => false,
            Mutation::Toggle => !self.contains(event_id),
        };

        let ack = if add {
            self.state.api.add(&credential, event_id).await?
        } else {
            self.state.api.remove(&credential, event_id).await?
        };

        let mut cache = self.write_cache();
        if self.state.session_epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(event_id = %event_id, "Session ended during wishlist update, not caching");
            return Ok(add);
        }

        let changed = if add {
            cache.insert(event_id.clone())
        } else {
            cache.remove(event_id)
        };
        if changed {
            self.publish(&cache);
        }
        tracing::debug!(
            event_id = %event_id,
            favorited = add,
            server_message = ack.message.as_deref().unwrap_or_default(),
            "Wishlist updated"
        );
        Ok(add)
    }

    /// Log and notify a failed mutation, then hand the error back.
    fn reject(&self, event_id: &EventId, error: WishlistError) -> WishlistError {
        match &error {
            WishlistError::NoCredential => {
                tracing::debug!(event_id = %event_id, "Wishlist update requires sign-in");
                self.state
                    .notifier
                    .notify(UserNotice::warning(error.user_message()));
            }
            _ => {
                tracing::warn!(event_id = %event_id, error = %error, "Wishlist update failed");
                self.state
                    .notifier
                    .notify(UserNotice::error(error.user_message()));
            }
        }
        error
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock_for(&self, event_id: &EventId) -> Arc<Mutex<()>> {
        self.state
            .id_locks
            .entry(event_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, Wishlist> {
        self.state
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, Wishlist> {
        self.state
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, wishlist: &Wishlist) {
        self.state.changes.send_replace(WishlistSnapshot::of(wishlist));
    }
}

/// Marks an event id as having a mutation in flight until dropped.
///
/// Dropping also covers cancellation: if the caller drops the future, the
/// id stops being pending.
struct PendingGuard<'a> {
    pending: &'a DashMap<EventId, usize>,
    event_id: EventId,
}

impl<'a> PendingGuard<'a> {
    fn enter(pending: &'a DashMap<EventId, usize>, event_id: &EventId) -> Self {
        *pending.entry(event_id.clone()).or_insert(0) += 1;
        Self {
            pending,
            event_id: event_id.clone(),
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut count) = self.pending.get_mut(&self.event_id) {
            *count = count.saturating_sub(1);
        }
        self.pending.remove_if(&self.event_id, |_, count| *count == 0);
    }
}
