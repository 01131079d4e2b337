//! Subscription bookkeeping for the override router.

use crate::provider::{CallbackRef, UpdateRequest};

/// One consumer's active interest in updates.
///
/// Request and callback live in a single composite entry so that
/// locate-then-remove is one atomic operation; keeping them in parallel
/// sequences would reintroduce an index-alignment hazard on removal.
#[derive(Debug, Clone)]
pub(crate) struct SubscriptionEntry {
    /// The cadence the consumer originally asked for, re-registered
    /// verbatim when an override is cleared.
    pub request: UpdateRequest,
    /// The consumer's callback handle; identity key for removal.
    pub callback: CallbackRef,
}

/// Ordered table of active subscriptions.
///
/// Insertion order is preserved but carries no meaning beyond pairing;
/// entries are added by subscribe, removed by unsubscribe, never mutated
/// in place.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionTable {
    entries: Vec<SubscriptionEntry>,
}

impl SubscriptionTable {
    /// Appends an entry.
    pub fn push(&mut self, request: UpdateRequest, callback: CallbackRef) {
        self.entries.push(SubscriptionEntry { request, callback });
    }

    /// Removes the entry for `callback`, returning it if present.
    ///
    /// The index is captured before any mutation; request and callback
    /// leave the table together or not at all.
    pub fn remove(&mut self, callback: &CallbackRef) -> Option<SubscriptionEntry> {
        let index = self.entries.iter().position(|e| e.callback == *callback)?;
        Some(self.entries.remove(index))
    }

    /// Number of active subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of all entries, for migration outside the state lock.
    pub fn snapshot(&self) -> Vec<SubscriptionEntry> {
        self.entries.clone()
    }

    /// Snapshot of all callback handles.
    pub fn callbacks(&self) -> Vec<CallbackRef> {
        self.entries.iter().map(|e| e.callback.clone()).collect()
    }
}
