//! # vigil-core
//!
//! Core traits for the Vigil typed event channel registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! crates that define payload types or custom channels without pulling in
//! the `vigil-std` implementations.
//!
//! # Building Blocks
//!
//! ## Payloads ([`Message`], [`KeyProvider`])
//!
//! Every event raised through a channel is a [`Message`]. Payloads that carry
//! their own dispatch key additionally implement [`KeyProvider`], which lets a
//! keyed channel route them to the subscribers registered for that key.
//!
//! ## Callbacks ([`Callback`])
//!
//! A shared, identity-comparable function value. Two clones of the same
//! callback are the same subscriber; two callbacks built from identical
//! closures are not.
//!
//! ## Channels ([`Channel`])
//!
//! The per-data-type dispatch capability: register, unregister and raise.
//!
//! ## Handles ([`Subscription`])
//!
//! The disposable token returned by registration. Disposing it removes the
//! callback exactly once.
//!
//! # Error Types
//!
//! - [`VigilError`] - Top-level error type
//! - [`ResolutionError`] - Channel lookup failures
//! - [`CallbackError`] - Failures raised inside a single callback

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod channel;
mod error;
mod key;
mod message;
mod outcome;
mod subscription;

// Re-exports
pub use callback::{Callback, CallbackId};
pub use channel::{Channel, RaiseReport};
pub use error::{BoxError, CallbackError, ResolutionError, VigilError};
pub use key::KeyProvider;
pub use message::Message;
pub use outcome::IntoCallbackOutcome;
pub use subscription::{Detach, Subscription, SubscriptionGuard};
