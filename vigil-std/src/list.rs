//! Copy-on-write subscriber lists.

use crate::dispatch::dispatch_all;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use vigil_core::{Callback, CallbackId, Detach, Message, RaiseReport, Subscription};

/// An ordered, duplicate-free list of callbacks for one data type.
///
/// The callbacks live in an `Arc<Vec<_>>` behind a lock. Dispatch clones the
/// `Arc` and releases the lock before invoking anything, so callbacks can
/// register or unregister on the same list while a dispatch is running. Those
/// changes copy the vector and apply to the live list only; the running dispatch
/// keeps iterating its snapshot.
pub struct SubscriberList<T: Message> {
    entries: RwLock<Arc<Vec<Callback<T>>>>,
}

impl<T: Message> SubscriberList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
        }
    }

    // Callbacks never run while the lock is held, so a poisoned lock still
    // guards a consistent vector.
    fn read(&self) -> RwLockReadGuard<'_, Arc<Vec<Callback<T>>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Vec<Callback<T>>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a callback and return a handle bound to it.
    ///
    /// Returns an inert handle if the callback is already in the list.
    pub fn register(self: &Arc<Self>, callback: Callback<T>) -> Subscription {
        let id = callback.id();
        {
            let mut entries = self.write();
            if entries.iter().any(|cb| cb.id() == id) {
                tracing::trace!(
                    data_type = std::any::type_name::<T>(),
                    callback = callback.name(),
                    "ignoring duplicate registration"
                );
                return Subscription::inert();
            }
            Arc::make_mut(&mut entries).push(callback);
        }
        let target: Weak<Self> = Arc::downgrade(self);
        Subscription::new(target, id)
    }

    /// Remove a callback. Returns `false` if it was not present.
    pub fn unregister(&self, callback: &Callback<T>) -> bool {
        self.remove(callback.id())
    }

    /// Remove the callback with the given identity.
    pub fn remove(&self, id: CallbackId) -> bool {
        let mut entries = self.write();
        match entries.iter().position(|cb| cb.id() == id) {
            Some(index) => {
                Arc::make_mut(&mut entries).remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the callback with the given identity is registered.
    pub fn contains(&self, id: CallbackId) -> bool {
        self.read().iter().any(|cb| cb.id() == id)
    }

    /// The callbacks as of now. Later changes do not affect the snapshot.
    pub fn snapshot(&self) -> Arc<Vec<Callback<T>>> {
        Arc::clone(&self.read())
    }

    /// Invoke every callback in the current snapshot, in insertion order.
    pub fn dispatch(&self, payload: &T) -> RaiseReport {
        let snapshot = self.snapshot();
        dispatch_all(std::any::type_name::<T>(), snapshot.iter(), payload)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every callback. Outstanding handles become no-ops.
    pub fn clear(&self) {
        *self.write() = Arc::new(Vec::new());
    }
}

impl<T: Message> Default for SubscriberList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> Detach for SubscriberList<T> {
    fn detach(&self, id: CallbackId) -> bool {
        self.remove(id)
    }

    fn is_attached(&self, id: CallbackId) -> bool {
        self.contains(id)
    }
}

impl<T: Message> std::fmt::Debug for SubscriberList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.read().iter()).finish()
    }
}
