//! Keyed event channel.
//!
//! A keyed channel holds two independent kinds of subscribers:
//!
//! - **base** subscribers, registered without a key, receive every payload;
//! - **keyed** subscribers, registered under a key, receive only payloads whose
//!   [`KeyProvider::event_key`] equals that key.
//!
//! A raise runs the keyed list for the payload's key first, then the base list.

use crate::{dispatch::dispatch_all, list::SubscriberList};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use vigil_core::{Callback, Channel, KeyProvider, RaiseReport, Subscription};

type KeyIndex<T> = HashMap<<T as KeyProvider>::Key, Arc<SubscriberList<T>>>;

/// A channel with a secondary key-indexed dispatch dimension.
///
/// A key's list is created on its first registration. Unregistering through
/// [`unregister_keyed`](Self::unregister_keyed) or [`Channel::unregister`]
/// drops the list once it is empty. Disposing a [`Subscription`] only empties
/// the list; it does not touch the key index. With many short-lived keys, call
/// [`prune_empty_keys`](Self::prune_empty_keys) to reclaim those entries.
///
/// # Example
///
/// ```rust,ignore
/// let channel = KeyedChannel::<DamageEvent>::new();
/// let all = channel.register(log_damage.clone());
/// let enemy = channel.register_keyed("enemy".to_string(), flash_screen.clone());
///
/// // Both `log_damage` and `flash_screen` run.
/// channel.raise(&DamageEvent { amount: 10, source: "enemy".into() });
/// // Only `log_damage` runs.
/// channel.raise(&DamageEvent { amount: 5, source: "trap".into() });
/// ```
pub struct KeyedChannel<T: KeyProvider> {
    base: Arc<SubscriberList<T>>,
    keyed: RwLock<KeyIndex<T>>,
}

impl<T: KeyProvider> KeyedChannel<T> {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            base: Arc::new(SubscriberList::new()),
            keyed: RwLock::new(HashMap::new()),
        }
    }

    fn index(&self) -> RwLockReadGuard<'_, KeyIndex<T>> {
        self.keyed.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn index_mut(&self) -> RwLockWriteGuard<'_, KeyIndex<T>> {
        self.keyed.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn list_for(&self, key: &T::Key) -> Option<Arc<SubscriberList<T>>> {
        self.index().get(key).cloned()
    }

    /// Register a callback for payloads whose key equals `key`.
    ///
    /// Returns an inert handle if the callback is already registered under the
    /// same key. The same callback may be registered under several keys.
    pub fn register_keyed(&self, key: T::Key, callback: Callback<T>) -> Subscription {
        // Held across the insert so a concurrent prune cannot orphan the list.
        let mut index = self.index_mut();
        if !index.contains_key(&key) {
            tracing::trace!(
                data_type = std::any::type_name::<T>(),
                ?key,
                "creating subscriber list for key"
            );
        }
        index.entry(key).or_default().register(callback)
    }

    /// Remove a callback from the list of `key` only.
    ///
    /// The key's list is dropped once it is empty.
    pub fn unregister_keyed(&self, key: &T::Key, callback: &Callback<T>) -> bool {
        let mut index = self.index_mut();
        let Some(list) = index.get(key) else {
            return false;
        };
        let removed = list.unregister(callback);
        if list.is_empty() {
            index.remove(key);
        }
        removed
    }

    /// Drop the lists of keys that no longer have subscribers.
    ///
    /// Returns the number of keys removed.
    pub fn prune_empty_keys(&self) -> usize {
        let mut index = self.index_mut();
        let before = index.len();
        index.retain(|_, list| !list.is_empty());
        before - index.len()
    }

    /// Number of keys that have a subscriber list.
    pub fn key_count(&self) -> usize {
        self.index().len()
    }

    /// Number of callbacks registered under `key`.
    pub fn subscriber_count_for(&self, key: &T::Key) -> usize {
        self.list_for(key).map_or(0, |list| list.len())
    }

    /// Number of callbacks registered without a key.
    pub fn base_subscriber_count(&self) -> usize {
        self.base.len()
    }

    /// Remove every subscriber, keyed and unkeyed.
    pub fn clear(&self) {
        self.base.clear();
        for list in self.index().values() {
            list.clear();
        }
    }
}

impl<T: KeyProvider> Default for KeyedChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyProvider> Channel<T> for KeyedChannel<T> {
    fn register(&self, callback: Callback<T>) -> Subscription {
        self.base.register(callback)
    }

    /// Remove a callback without knowing its key.
    ///
    /// Searches every key list and removes the callback from the first one that
    /// contains it; falls back to the base list. Empty key lists are dropped on
    /// the way. Linear in the total number of subscribers. If the callback is
    /// registered under several keys, which occurrence goes first is
    /// unspecified.
    fn unregister(&self, callback: &Callback<T>) -> bool {
        let id = callback.id();
        let mut removed = false;
        self.index_mut().retain(|_, list| {
            if !removed {
                removed = list.remove(id);
            }
            !list.is_empty()
        });

        removed || self.base.unregister(callback)
    }

    fn raise(&self, payload: &T) -> RaiseReport {
        // Both snapshots are taken before any callback runs.
        let keyed = payload
            .event_key()
            .and_then(|key| self.list_for(key))
            .map(|list| list.snapshot());
        let base = self.base.snapshot();

        let data_type = std::any::type_name::<T>();
        let mut report = RaiseReport::default();
        if let Some(keyed) = &keyed {
            report += dispatch_all(data_type, keyed.iter(), payload);
        }
        report += dispatch_all(data_type, base.iter(), payload);

        tracing::trace!(
            data_type,
            key = ?payload.event_key(),
            invoked = report.invoked,
            failed = report.failed,
            "raised keyed event"
        );
        report
    }

    fn subscriber_count(&self) -> usize {
        self.base.len() + self.index().values().map(|list| list.len()).sum::<usize>()
    }
}

impl<T: KeyProvider> std::fmt::Debug for KeyedChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedChannel")
            .field("data_type", &std::any::type_name::<T>())
            .field("key_type", &std::any::type_name::<T::Key>())
            .field("base", &self.base)
            .field("keys", &self.key_count())
            .finish()
    }
}
