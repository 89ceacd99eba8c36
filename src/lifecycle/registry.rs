//! Listener Registry
//!
//! Unordered multiset of listeners for one phase. Safe to mutate from any
//! thread while a delivery is in progress: delivery walks a snapshot, so a
//! listener may add or remove listeners (itself included) from inside its
//! callback.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct ListenerRegistry<L: ?Sized> {
    entries: DashMap<u64, Arc<L>>,
    next_id: AtomicU64,
}

impl<L: ?Sized> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> ListenerRegistry<L> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Add a listener. Adding the same listener twice delivers each event twice.
    pub fn add(&self, listener: Arc<L>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, listener);
    }

    /// Remove one registration of `listener`, compared by pointer.
    ///
    /// Returns false if it was not registered.
    pub fn remove(&self, listener: &Arc<L>) -> bool {
        let target = Arc::as_ptr(listener);
        loop {
            let key = self
                .entries
                .iter()
                .find(|entry| std::ptr::addr_eq(Arc::as_ptr(entry.value()), target))
                .map(|entry| *entry.key());

            match key {
                // Another remover may take this entry first; rescan for the next one.
                Some(key) => {
                    if self.entries.remove(&key).is_some() {
                        return true;
                    }
                }
                None => return false,
            }
        }
    }

    /// Listeners registered at this instant, in no particular order
    pub fn snapshot(&self) -> Vec<Arc<L>> {
        self.entries
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
