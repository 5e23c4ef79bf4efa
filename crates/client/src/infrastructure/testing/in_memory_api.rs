//! In-memory reference implementation of the remote wishlist API
//!
//! Behaves like the real backend (per-token wishlists, duplicate adds and
//! unknown removes rejected with a non-success status code) and adds knobs
//! for tests: scripted failures, call counters and a gate that holds list
//! requests until released.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use eventhub_domain::{Credential, EventId};

use crate::ports::outbound::{ApiError, MutationAck, WishlistApiPort};

/// Status code the fake backend uses for business rejections.
pub const REJECTED_STATUS_CODE: i64 = 6001;

#[derive(Default)]
struct RemoteState {
    wishlists: HashMap<String, HashSet<EventId>>,
    scripted_failures: VecDeque<ApiError>,
    list_gate: Option<Arc<Notify>>,
    latency: Option<Duration>,
}

#[derive(Default)]
pub struct InMemoryWishlistApi {
    state: Mutex<RemoteState>,
    list_calls: AtomicUsize,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl InMemoryWishlistApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token with an (optionally pre-populated) wishlist.
    pub fn with_user(self, token: &str, event_ids: impl IntoIterator<Item = EventId>) -> Self {
        self.lock()
            .wishlists
            .insert(token.to_string(), event_ids.into_iter().collect());
        self
    }

    /// Delay every call by `latency` before it is answered.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.lock().latency = Some(latency);
        self
    }

    /// Make the next call fail with `error`, regardless of endpoint.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().scripted_failures.push_back(error);
    }

    /// Hold list requests until the returned handle is notified.
    pub fn gate_lists(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.lock().list_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Server-side membership for `token`.
    pub fn members(&self, token: &str) -> HashSet<EventId> {
        self.lock()
            .wishlists
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls() + self.add_calls() + self.remove_calls()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RemoteState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        let latency = self.lock().latency;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn authorize<'a>(
        state: &'a mut RemoteState,
        credential: &Credential,
    ) -> Result<&'a mut HashSet<EventId>, ApiError> {
        state
            .wishlists
            .get_mut(credential.expose())
            .ok_or(ApiError::Unauthorized { status: 401 })
    }
}

#[async_trait]
impl WishlistApiPort for InMemoryWishlistApi {
    async fn list(&self, credential: &Credential) -> Result<Vec<EventId>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.lock().list_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.simulate_latency().await;

        let mut state = self.lock();
        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }
        let members = Self::authorize(&mut state, credential)?;
        Ok(members.iter().cloned().collect())
    }

    async fn add(
        &self,
        credential: &Credential,
        event_id: &EventId,
    ) -> Result<MutationAck, ApiError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.lock();
        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }
        let members = Self::authorize(&mut state, credential)?;
        if !members.insert(event_id.clone()) {
            return Err(ApiError::Rejected {
                status_code: REJECTED_STATUS_CODE,
                message: Some("Event is already in your wishlist".to_string()),
            });
        }
        Ok(MutationAck::with_message("Added to wishlist"))
    }

    async fn remove(
        &self,
        credential: &Credential,
        event_id: &EventId,
    ) -> Result<MutationAck, ApiError> {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.lock();
        if let Some(error) = state.scripted_failures.pop_front() {
            return Err(error);
        }
        let members = Self::authorize(&mut state, credential)?;
        if !members.remove(event_id) {
            return Err(ApiError::Rejected {
                status_code: REJECTED_STATUS_CODE,
                message: Some("Event is not in your wishlist".to_string()),
            });
        }
        Ok(MutationAck::with_message("Removed from wishlist"))
    }
}
