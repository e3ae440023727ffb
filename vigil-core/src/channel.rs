//! Channel trait and dispatch reports.

use crate::{callback::Callback, message::Message, subscription::Subscription};
use std::ops::{Add, AddAssign};

/// Summary of a single raise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RaiseReport {
    /// Number of callbacks invoked, including the ones that failed.
    pub invoked: usize,
    /// Number of callbacks that panicked or returned an error.
    pub failed: usize,
}

impl RaiseReport {
    /// Number of callbacks that handled the payload without failing.
    pub fn delivered(&self) -> usize {
        self.invoked.saturating_sub(self.failed)
    }

    /// True when no callback was invoked.
    pub fn is_empty(&self) -> bool {
        self.invoked == 0
    }
}

impl Add for RaiseReport {
    type Output = RaiseReport;

    fn add(self, rhs: Self) -> Self::Output {
        RaiseReport {
            invoked: self.invoked + rhs.invoked,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for RaiseReport {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// The dispatch capability for one data type.
///
/// A channel is type-locked to `T` for its lifetime. Implementations must
/// tolerate re-entrant calls: a callback invoked by [`raise`](Self::raise) may
/// register, unregister or raise on the same channel, and such changes must not
/// affect the dispatch already in progress.
///
/// The trait is object-safe; registries hold channels as `Arc<dyn Channel<T>>`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a channel for payloads of type `{T}`",
    label = "missing `Channel<{T}>` implementation",
    note = "Implement `Channel<{T}>` or use `EventChannel<{T}>`."
)]
pub trait Channel<T: Message>: Send + Sync + 'static {
    /// Add a callback to the unkeyed subscriber list.
    ///
    /// Returns an inert handle if the same callback is already registered.
    fn register(&self, callback: Callback<T>) -> Subscription;

    /// Remove a callback. Returns `false` if it was not registered.
    fn unregister(&self, callback: &Callback<T>) -> bool;

    /// Deliver a payload to every matching subscriber.
    ///
    /// Failures inside callbacks are isolated and counted, never propagated.
    fn raise(&self, payload: &T) -> RaiseReport;

    /// Total number of registered callbacks.
    fn subscriber_count(&self) -> usize;
}
