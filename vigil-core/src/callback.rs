//! Identity-comparable callbacks.

use crate::{error::BoxError, message::Message, outcome::IntoCallbackOutcome};
use std::{
    borrow::Cow,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_CALLBACK_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`Callback`], shared by all of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

impl CallbackId {
    fn next() -> Self {
        Self(NEXT_CALLBACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for diagnostics.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type CallbackFn<T> = dyn Fn(&T) -> Result<(), BoxError> + Send + Sync;

/// A shared subscriber function for payloads of type `T`.
///
/// Cloning a callback is cheap and keeps its identity: registering a clone of
/// an already-registered callback is a duplicate, and any clone can be used to
/// unregister it. Building a second callback from the same closure produces a
/// new identity.
///
/// # Example
///
/// ```rust,ignore
/// let on_damage = Callback::named("log_damage", |ev: &DamageEvent| {
///     println!("took {} damage", ev.amount);
/// });
///
/// let handle = registry.register(on_damage.clone());
/// registry.unregister(&on_damage);
/// ```
pub struct Callback<T> {
    func: Arc<CallbackFn<T>>,
    id: CallbackId,
    name: Cow<'static, str>,
}

impl<T: Message> Callback<T> {
    /// Wrap a function. The callback is named after the function's type.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoCallbackOutcome,
    {
        Self::named(std::any::type_name::<F>(), f)
    }

    /// Wrap a function under an explicit name used in diagnostics.
    pub fn named<F, R>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoCallbackOutcome,
    {
        Self {
            func: Arc::new(move |payload: &T| f(payload).into_outcome()),
            id: CallbackId::next(),
            name: name.into(),
        }
    }

    /// Invoke the callback. Panics are not caught here.
    pub fn call(&self, payload: &T) -> Result<(), BoxError> {
        (self.func)(payload)
    }
}

impl<T> Callback<T> {
    /// The identity shared by all clones of this callback.
    pub fn id(&self) -> CallbackId {
        self.id
    }

    /// The diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `other` is a clone of this callback.
    pub fn same_as(&self, other: &Callback<T>) -> bool {
        self.id == other.id
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl<T> PartialEq for Callback<T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<T> Eq for Callback<T> {}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}
