//! Unkeyed event channel.

use crate::list::SubscriberList;
use std::sync::Arc;
use vigil_core::{Callback, Channel, Message, RaiseReport, Subscription};

/// The default channel for payloads of type `T`.
///
/// Holds a single [`SubscriberList`]. Every raise reaches every registered
/// callback in registration order.
///
/// # Example
///
/// ```rust,ignore
/// let channel = EventChannel::<DamageEvent>::new();
/// let handle = channel.register(Callback::new(|ev: &DamageEvent| println!("{}", ev.amount)));
///
/// channel.raise(&DamageEvent { amount: 10 });
/// handle.dispose();
/// ```
pub struct EventChannel<T: Message> {
    subscribers: Arc<SubscriberList<T>>,
}

impl<T: Message> EventChannel<T> {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(SubscriberList::new()),
        }
    }

    /// The underlying subscriber list.
    pub fn subscribers(&self) -> &Arc<SubscriberList<T>> {
        &self.subscribers
    }

    /// Remove every subscriber.
    pub fn clear(&self) {
        self.subscribers.clear();
    }
}

impl<T: Message> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> Channel<T> for EventChannel<T> {
    fn register(&self, callback: Callback<T>) -> Subscription {
        self.subscribers.register(callback)
    }

    fn unregister(&self, callback: &Callback<T>) -> bool {
        self.subscribers.unregister(callback)
    }

    fn raise(&self, payload: &T) -> RaiseReport {
        let report = self.subscribers.dispatch(payload);
        tracing::trace!(
            data_type = std::any::type_name::<T>(),
            invoked = report.invoked,
            failed = report.failed,
            "raised event"
        );
        report
    }

    fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Message> std::fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("data_type", &std::any::type_name::<T>())
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(u32);

    impl Message for Ping {}

    fn counter(hits: &Arc<AtomicUsize>) -> Callback<Ping> {
        let hits = hits.clone();
        Callback::new(move |_: &Ping| {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_register_then_raise_invokes_once_with_payload() {
        let channel = EventChannel::<Ping>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let cb = {
            let seen = seen.clone();
            Callback::new(move |p: &Ping| seen.lock().unwrap().push(p.clone()))
        };
        let _handle = channel.register(cb);

        let report = channel.raise(&Ping(9));

        assert_eq!(*seen.lock().unwrap(), vec![Ping(9)]);
        assert_eq!(report.invoked, 1);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn test_double_registration_invokes_once() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let cb = counter(&hits);

        let _first = channel.register(cb.clone());
        let second = channel.register(cb);
        channel.raise(&Ping(1));

        assert!(second.is_inert());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn test_dispose_removes_and_is_idempotent() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = channel.register(counter(&hits));

        assert!(handle.dispose());
        assert!(!handle.dispose());
        channel.raise(&Ping(1));

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reregister_after_dispose() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let cb = counter(&hits);

        let handle = channel.register(cb.clone());
        handle.dispose();
        let again = channel.register(cb);
        channel.raise(&Ping(1));

        assert!(again.is_active());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stale_handle_targets_callback_identity() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let cb = counter(&hits);

        let stale = channel.register(cb.clone());
        channel.unregister(&cb);
        let fresh = channel.register(cb);

        // Handles identify the callback, not the insertion.
        assert!(stale.dispose());
        assert!(!fresh.is_active());
    }

    #[test]
    fn test_failing_callback_is_isolated() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let _a = channel.register(counter(&hits));
        let _b = channel.register(Callback::named("broken", |_: &Ping| {
            Err::<(), _>(std::io::Error::other("disk full"))
        }));
        let _c = channel.register(counter(&hits));

        let report = channel.raise(&Ping(3));

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.delivered(), 2);
    }

    #[test]
    fn test_clear() {
        let channel = EventChannel::<Ping>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let _h = channel.register(counter(&hits));
        channel.clear();
        assert!(channel.raise(&Ping(0)).is_empty());
    }
}
