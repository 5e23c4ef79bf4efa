//! Wishlist membership set
//!
//! The set of event ids the current user has favorited. This type only
//! mirrors server-confirmed state; it knows nothing about networking.

use std::collections::HashSet;

use crate::ids::EventId;

/// Membership set of favorited events.
///
/// Backed by a `HashSet`, so every id appears at most once and lookups are
/// O(1). Every mutation bumps `revision`, which lets observers detect change
/// without diffing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    members: HashSet<EventId>,
    revision: u64,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event_id: &EventId) -> bool {
        self.members.contains(event_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Insert a confirmed member. Returns `false` if it was already present.
    pub fn insert(&mut self, event_id: EventId) -> bool {
        let inserted = self.members.insert(event_id);
        if inserted {
            self.revision += 1;
        }
        inserted
    }

    /// Remove a confirmed member. Returns `false` if it was not present.
    pub fn remove(&mut self, event_id: &EventId) -> bool {
        let removed = self.members.remove(event_id);
        if removed {
            self.revision += 1;
        }
        removed
    }

    /// Replace the whole set with an authoritative listing.
    ///
    /// Duplicates in the listing collapse into a single member.
    pub fn replace_all(&mut self, event_ids: impl IntoIterator<Item = EventId>) {
        self.members = event_ids.into_iter().collect();
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        if !self.members.is_empty() {
            self.members.clear();
            self.revision += 1;
        }
    }

    /// Members in a stable (sorted) order for list views.
    pub fn sorted(&self) -> Vec<EventId> {
        let mut ids: Vec<EventId> = self.members.iter().cloned().collect();
        ids.sort();
        ids
    }
}
