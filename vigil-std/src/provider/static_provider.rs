//! Explicit, code-listed channel provisioning.

use super::{ChannelCatalog, ChannelProvider};
use crate::{channel::EventChannel, erased::ErasedChannel, keyed::KeyedChannel};
use std::sync::Arc;
use vigil_core::{Channel, KeyProvider, Message};

/// A provider whose channels are listed in code at startup.
///
/// # Example
///
/// ```rust,ignore
/// let provider = StaticProvider::new()
///     .channel::<Tick>()
///     .keyed_channel::<DamageEvent>()
///     .shared(Arc::new(MyAuditedChannel::default()));
///
/// let registry = ChannelRegistry::from_provider(&provider);
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticProvider {
    channels: Vec<ErasedChannel>,
}

impl StaticProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide a default [`EventChannel`] for `T`.
    pub fn channel<T: Message>(self) -> Self {
        self.with(ErasedChannel::unkeyed(EventChannel::<T>::new()))
    }

    /// Provide a default [`KeyedChannel`] for `T`.
    pub fn keyed_channel<T: KeyProvider>(self) -> Self {
        self.with(ErasedChannel::keyed(KeyedChannel::<T>::new()))
    }

    /// Provide a pre-built channel instance.
    pub fn shared<T, C>(self, channel: Arc<C>) -> Self
    where
        T: Message,
        C: Channel<T>,
    {
        self.with(ErasedChannel::from_channel::<T, C>(channel))
    }

    /// Provide a pre-built keyed channel instance.
    pub fn shared_keyed<T: KeyProvider>(self, channel: Arc<KeyedChannel<T>>) -> Self {
        self.with(ErasedChannel::from_keyed(channel))
    }

    /// Provide an already-erased channel.
    pub fn with(mut self, channel: ErasedChannel) -> Self {
        self.channels.push(channel);
        self
    }

    /// Number of channels listed, duplicates included.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channel is listed.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl ChannelProvider for StaticProvider {
    fn provide(&self, catalog: &mut ChannelCatalog) {
        for channel in &self.channels {
            catalog.insert(channel.clone());
        }
    }
}
