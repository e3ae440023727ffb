//! Disposable subscription handles.

use crate::callback::CallbackId;
use std::{
    fmt,
    sync::{
        Weak,
        atomic::{AtomicBool, Ordering},
    },
};

/// A subscriber list that a [`Subscription`] can detach itself from.
pub trait Detach: Send + Sync {
    /// Remove the callback with the given identity. Returns `false` if absent.
    fn detach(&self, id: CallbackId) -> bool;

    /// Whether the callback is still present.
    fn is_attached(&self, id: CallbackId) -> bool;
}

/// A handle representing one live registration.
///
/// Disposing the handle removes its callback from the list it was inserted
/// into. Disposal is idempotent: the second and later calls do nothing. The
/// handle holds only a weak reference to the list, so it never keeps a channel
/// alive on its own.
///
/// Dropping a `Subscription` does **not** unregister. Use
/// [`into_guard`](Self::into_guard) for scope-bound registrations.
///
/// Registrations that did not happen (duplicate callback, unresolved channel)
/// return an *inert* handle; see [`is_inert`](Self::is_inert).
#[must_use = "dropping a Subscription keeps the callback registered; call `dispose` to remove it"]
pub struct Subscription {
    target: Option<(Weak<dyn Detach>, CallbackId)>,
    released: AtomicBool,
}

impl Subscription {
    /// Bind a handle to the list that now contains `id`.
    pub fn new(target: Weak<dyn Detach>, id: CallbackId) -> Self {
        Self {
            target: Some((target, id)),
            released: AtomicBool::new(false),
        }
    }

    /// A handle for a registration that did not happen.
    pub fn inert() -> Self {
        Self {
            target: None,
            released: AtomicBool::new(true),
        }
    }

    /// True if this handle never represented a registration.
    pub fn is_inert(&self) -> bool {
        self.target.is_none()
    }

    /// True while the callback is still registered through this handle.
    pub fn is_active(&self) -> bool {
        if self.released.load(Ordering::Acquire) {
            return false;
        }
        match &self.target {
            Some((list, id)) => list.upgrade().is_some_and(|list| list.is_attached(*id)),
            None => false,
        }
    }

    /// Identity of the registered callback, if any.
    pub fn callback_id(&self) -> Option<CallbackId> {
        self.target.as_ref().map(|(_, id)| *id)
    }

    /// Unregister the callback. Safe to call any number of times.
    ///
    /// Returns `true` only for the call that actually removed the callback.
    pub fn dispose(&self) -> bool {
        if self.released.swap(true, Ordering::AcqRel) {
            return false;
        }
        match &self.target {
            Some((list, id)) => list.upgrade().is_some_and(|list| list.detach(*id)),
            None => false,
        }
    }

    /// Convert into a guard that disposes the subscription when dropped.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard(Some(self))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("callback_id", &self.callback_id())
            .field("released", &self.released.load(Ordering::Acquire))
            .finish()
    }
}

/// Scope guard that disposes its [`Subscription`] on drop.
#[derive(Debug)]
#[must_use = "dropping the guard immediately unregisters the callback"]
pub struct SubscriptionGuard(Option<Subscription>);

impl SubscriptionGuard {
    /// Give up the guard without disposing, returning the plain handle.
    pub fn into_inner(mut self) -> Subscription {
        self.0.take().unwrap_or_else(Subscription::inert)
    }

    /// True while the guarded callback is still registered.
    pub fn is_active(&self) -> bool {
        self.0.as_ref().is_some_and(Subscription::is_active)
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(sub) = self.0.take() {
            sub.dispose();
        }
    }
}
