//! Channel provisioning.
//!
//! A registry never creates channels on demand. Everything it can route to is
//! supplied up front by one or more [`ChannelProvider`]s, each of which writes
//! its channels into a [`ChannelCatalog`] exactly once while the registry is
//! being built.
//!
//! Stock providers:
//! - [`StaticProvider`]: channels listed explicitly in code
//! - [`InventoryProvider`] (feature `inventory`): channels submitted anywhere in
//!   the binary with [`submit_channel!`](crate::submit_channel)

pub mod static_provider;

#[cfg(feature = "inventory")]
pub mod collected;

#[cfg(feature = "inventory")]
pub use collected::{ChannelRegistration, InventoryProvider};
pub use static_provider::StaticProvider;

use crate::{channel::EventChannel, erased::ErasedChannel, keyed::KeyedChannel};
use std::{
    any::TypeId,
    collections::{HashMap, hash_map},
};
use vigil_core::{KeyProvider, Message};

/// Supplies channels to a registry under construction.
pub trait ChannelProvider {
    /// Add this provider's channels to `catalog`.
    fn provide(&self, catalog: &mut ChannelCatalog);

    /// Name used in diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<P: ChannelProvider + ?Sized> ChannelProvider for &P {
    fn provide(&self, catalog: &mut ChannelCatalog) {
        (**self).provide(catalog);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: ChannelProvider + ?Sized> ChannelProvider for Box<P> {
    fn provide(&self, catalog: &mut ChannelCatalog) {
        (**self).provide(catalog);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// The type-to-channel mapping collected from providers.
///
/// At most one channel per payload type. Inserting a second channel for the
/// same type replaces the first and logs a warning.
#[derive(Debug, Default, Clone)]
pub struct ChannelCatalog {
    channels: HashMap<TypeId, ErasedChannel>,
}

impl ChannelCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a channel, returning the one it replaced.
    pub fn insert(&mut self, channel: ErasedChannel) -> Option<ErasedChannel> {
        match self.channels.entry(channel.data_type()) {
            hash_map::Entry::Occupied(mut slot) => {
                tracing::warn!(
                    data_type = channel.data_type_name(),
                    previous = %slot.get().shape(),
                    replacement = %channel.shape(),
                    "replacing channel already provided for data type"
                );
                Some(slot.insert(channel))
            }
            hash_map::Entry::Vacant(slot) => {
                tracing::debug!(
                    data_type = channel.data_type_name(),
                    shape = %channel.shape(),
                    "channel provided"
                );
                slot.insert(channel);
                None
            }
        }
    }

    /// Insert a fresh [`EventChannel`] for `T`.
    pub fn add_channel<T: Message>(&mut self) -> &mut Self {
        self.insert(ErasedChannel::unkeyed(EventChannel::<T>::new()));
        self
    }

    /// Insert a fresh [`KeyedChannel`] for `T`.
    pub fn add_keyed_channel<T: KeyProvider>(&mut self) -> &mut Self {
        self.insert(ErasedChannel::keyed(KeyedChannel::<T>::new()));
        self
    }

    /// Number of payload types with a channel.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Whether a channel for the payload type is present.
    pub fn contains(&self, data_type: TypeId) -> bool {
        self.channels.contains_key(&data_type)
    }

    pub(crate) fn into_inner(self) -> HashMap<TypeId, ErasedChannel> {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erased::ChannelShape;

    #[derive(Debug)]
    struct Tick;
    impl Message for Tick {}

    #[derive(Debug)]
    struct Hit(u8);
    impl Message for Hit {}
    impl KeyProvider for Hit {
        type Key = u8;
        fn event_key(&self) -> Option<&u8> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_catalog_last_writer_wins() {
        let mut catalog = ChannelCatalog::new();
        catalog.add_channel::<Hit>();
        let replaced = catalog.insert(ErasedChannel::keyed(KeyedChannel::<Hit>::new()));

        assert_eq!(replaced.map(|c| c.shape()), Some(ChannelShape::Unkeyed));
        assert_eq!(catalog.len(), 1);
        let shape = catalog.into_inner()[&TypeId::of::<Hit>()].shape();
        assert!(shape.is_keyed());
    }

    #[test]
    fn test_catalog_tracks_types() {
        let mut catalog = ChannelCatalog::new();
        assert!(catalog.is_empty());
        catalog.add_channel::<Tick>().add_keyed_channel::<Hit>();
        assert!(catalog.contains(TypeId::of::<Tick>()));
        assert!(catalog.contains(TypeId::of::<Hit>()));
        assert!(!catalog.contains(TypeId::of::<u32>()));
    }
}
