//! Key-provider contract for keyed dispatch.

use crate::message::Message;
use std::{fmt::Debug, hash::Hash};

/// A payload that reports its own dispatch key.
///
/// Keyed channels call [`event_key`](Self::event_key) on every raise and
/// deliver the payload to the subscribers registered under that key. Keys are
/// compared by value, so two distinct `String`s with the same contents select
/// the same subscribers.
///
/// Returning `None` skips keyed dispatch; the unkeyed subscribers of the channel
/// still receive the payload.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct DamageEvent { amount: i32, source: String }
///
/// impl Message for DamageEvent {}
///
/// impl KeyProvider for DamageEvent {
///     type Key = String;
///
///     fn event_key(&self) -> Option<&String> {
///         Some(&self.source)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not provide an event key",
    label = "missing `KeyProvider` implementation",
    note = "Keyed channels require the payload to implement `KeyProvider`."
)]
pub trait KeyProvider: Message {
    /// The key type. Compared by value.
    type Key: Eq + Hash + Debug + Send + Sync + 'static;

    /// Read-only accessor for the payload's dispatch key.
    fn event_key(&self) -> Option<&Self::Key>;
}
