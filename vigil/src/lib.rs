//! # vigil - Typed Event Channel Registry
//!
//! `vigil` routes events by payload type. Each data type owns one channel,
//! provisioned once at startup; producers and consumers only ever name the
//! payload type and go through the [`ChannelRegistry`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vigil::prelude::*;
//!
//! #[derive(Debug, Message, KeyProvider)]
//! struct DamageEvent {
//!     amount: u32,
//!     #[event_key]
//!     source: u8,
//! }
//!
//! let registry = ChannelRegistry::builder()
//!     .keyed_channel::<DamageEvent>()
//!     .build();
//!
//! let handle = registry.register_keyed(1, Callback::new(|e: &DamageEvent| {
//!     println!("source 1 took {}", e.amount);
//! }));
//!
//! registry.raise(&DamageEvent { amount: 5, source: 1 });
//! handle.dispose();
//! ```
//!
//! ## Failure Reporting
//!
//! Operations never fail loudly. A data type without a channel, or a keyed
//! operation on an unkeyed channel, is logged through `tracing` and ignored;
//! the `try_*` variants on [`ChannelRegistry`] return the
//! [`ResolutionError`] instead. A callback that errors or panics is logged
//! with its payload and the remaining callbacks still run.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use vigil_core::{
    // Errors
    BoxError,
    // Callbacks
    Callback,
    CallbackError,
    CallbackId,
    // Channels
    Channel,
    // Handles
    Detach,
    IntoCallbackOutcome,
    // Payloads
    KeyProvider,
    Message,
    RaiseReport,
    ResolutionError,
    Subscription,
    SubscriptionGuard,
    VigilError,
};

pub use vigil_std::{
    ChannelCatalog, ChannelProvider, ChannelRegistry, ChannelShape, ErasedChannel, EventChannel,
    KeyedChannel, RegistryBuilder, StaticProvider, SubscriberList,
};

#[cfg(feature = "inventory")]
pub use vigil_std::{ChannelRegistration, InventoryProvider, submit_channel, submit_keyed_channel};

#[cfg(feature = "inventory")]
pub use inventory;

#[cfg(feature = "macros")]
pub use vigil_macros::{KeyProvider, Message};

/// Channel provisioning.
pub mod provider {
    pub use vigil_std::provider::{ChannelCatalog, ChannelProvider, StaticProvider};

    #[cfg(feature = "inventory")]
    pub use vigil_std::provider::{ChannelRegistration, InventoryProvider};
}

/// Testing utilities.
pub mod testing {
    pub use vigil_std::testing::{CountingCallback, RecordingCallback};
}

/// Prelude module - common imports for Vigil.
///
/// # Usage
///
/// ```rust,ignore
/// use vigil::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Callback, Channel, ChannelRegistry, KeyProvider, Message, RaiseReport,
        StaticProvider, Subscription, SubscriptionGuard,
    };
}
