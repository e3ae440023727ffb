//! Distributed channel registration via `inventory`.
//!
//! Crates declare their channels next to the payload types with
//! [`submit_channel!`](crate::submit_channel) or
//! [`submit_keyed_channel!`](crate::submit_keyed_channel). The
//! [`InventoryProvider`] gathers every submission linked into the binary.

use super::{ChannelCatalog, ChannelProvider};
use crate::erased::ErasedChannel;

/// A channel submitted for collection.
pub struct ChannelRegistration {
    /// Payload type name, for diagnostics.
    pub name: &'static str,
    /// Builds a fresh channel each time a registry is populated.
    pub factory: fn() -> ErasedChannel,
}

impl ChannelRegistration {
    /// Create a registration entry.
    pub const fn new(name: &'static str, factory: fn() -> ErasedChannel) -> Self {
        Self { name, factory }
    }
}

inventory::collect!(ChannelRegistration);

/// A provider that builds one channel per submitted [`ChannelRegistration`].
///
/// Each registry built from this provider gets its own channel instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryProvider;

impl ChannelProvider for InventoryProvider {
    fn provide(&self, catalog: &mut ChannelCatalog) {
        for registration in inventory::iter::<ChannelRegistration> {
            tracing::trace!(
                data_type = registration.name,
                "collecting submitted channel"
            );
            catalog.insert((registration.factory)());
        }
    }
}

/// Submit an unkeyed channel for `$ty` to the [`InventoryProvider`].
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct Tick;
/// impl Message for Tick {}
///
/// vigil::submit_channel!(Tick);
/// ```
#[macro_export]
macro_rules! submit_channel {
    ($ty:ty) => {
        const _: () = {
            fn __vigil_channel_factory() -> $crate::erased::ErasedChannel {
                $crate::erased::ErasedChannel::unkeyed($crate::channel::EventChannel::<$ty>::new())
            }

            $crate::inventory::submit! {
                $crate::provider::ChannelRegistration::new(
                    ::core::stringify!($ty),
                    __vigil_channel_factory,
                )
            }
        };
    };
}

/// Submit a keyed channel for `$ty` to the [`InventoryProvider`].
///
/// `$ty` must implement `KeyProvider`.
#[macro_export]
macro_rules! submit_keyed_channel {
    ($ty:ty) => {
        const _: () = {
            fn __vigil_channel_factory() -> $crate::erased::ErasedChannel {
                $crate::erased::ErasedChannel::keyed($crate::keyed::KeyedChannel::<$ty>::new())
            }

            $crate::inventory::submit! {
                $crate::provider::ChannelRegistration::new(
                    ::core::stringify!($ty),
                    __vigil_channel_factory,
                )
            }
        };
    };
}
