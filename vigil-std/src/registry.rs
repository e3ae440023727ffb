//! Channel registry.
//!
//! The registry is the public dispatch surface: it maps each payload type to
//! exactly one channel and routes `register`, `unregister` and `raise` calls to
//! it. Routing failures are never fatal. The plain methods log the failure and
//! degrade to a no-op (an inert [`Subscription`], an empty [`RaiseReport`]);
//! the `try_*` methods return the [`ResolutionError`] instead.

use crate::{
    erased::{ChannelShape, ErasedChannel},
    keyed::KeyedChannel,
    provider::{ChannelCatalog, ChannelProvider},
};
use std::{any::TypeId, collections::HashMap, sync::Arc};
use vigil_core::{
    Callback, Channel, KeyProvider, Message, RaiseReport, ResolutionError, Subscription,
};

// ============================================================================
// RegistryBuilder - collects channels from providers
// ============================================================================

/// Builder for constructing a [`ChannelRegistry`].
///
/// Providers are consulted once each, in the order they are added. A later
/// provider's channel replaces an earlier one for the same payload type.
///
/// # Example
/// ```ignore
/// let registry = ChannelRegistry::builder()
///     .provider(InventoryProvider)
///     .channel::<Tick>()
///     .keyed_channel::<DamageEvent>()
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    catalog: ChannelCatalog,
}

impl RegistryBuilder {
    /// Create a builder with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the channels of `provider`.
    pub fn provider<P: ChannelProvider>(mut self, provider: P) -> Self {
        let before = self.catalog.len();
        provider.provide(&mut self.catalog);
        tracing::debug!(
            provider = provider.name(),
            added = self.catalog.len().saturating_sub(before),
            "collected channels from provider"
        );
        self
    }

    /// Add a default unkeyed channel for `T`.
    pub fn channel<T: Message>(mut self) -> Self {
        self.catalog.add_channel::<T>();
        self
    }

    /// Add a default keyed channel for `T`.
    pub fn keyed_channel<T: KeyProvider>(mut self) -> Self {
        self.catalog.add_keyed_channel::<T>();
        self
    }

    /// Add an already-erased channel.
    pub fn with(mut self, channel: ErasedChannel) -> Self {
        self.catalog.insert(channel);
        self
    }

    /// Freeze the collected channels into a registry.
    pub fn build(self) -> ChannelRegistry {
        ChannelRegistry::from_catalog(self.catalog)
    }
}

// ============================================================================
// ChannelRegistry - immutable type -> channel map
// ============================================================================

/// An immutable map from payload type to channel.
///
/// The set of channels is fixed at construction; the subscribers inside each
/// channel are not. The registry is `Send + Sync` and is meant to be shared,
/// e.g. through an `Arc`.
pub struct ChannelRegistry {
    channels: HashMap<TypeId, ErasedChannel>,
}

impl ChannelRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Build a registry from a single provider.
    pub fn from_provider<P: ChannelProvider>(provider: P) -> Self {
        Self::builder().provider(provider).build()
    }

    /// Build a registry from an already collected catalog.
    pub fn from_catalog(catalog: ChannelCatalog) -> Self {
        let channels = catalog.into_inner();
        tracing::debug!(channels = channels.len(), "channel registry populated");
        Self { channels }
    }

    /// A registry without channels. Every call is a resolution failure.
    pub fn empty() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    fn entry<T: Message>(&self) -> Result<&ErasedChannel, ResolutionError> {
        self.channels
            .get(&TypeId::of::<T>())
            .ok_or(ResolutionError::NoChannel {
                data_type: std::any::type_name::<T>(),
            })
    }

    /// Resolve the channel for `T`. Keyed channels resolve too, through their
    /// unkeyed interface.
    pub fn try_channel<T: Message>(&self) -> Result<&Arc<dyn Channel<T>>, ResolutionError> {
        let entry = self.entry::<T>()?;
        entry
            .as_channel::<T>()
            .ok_or(ResolutionError::ShapeMismatch {
                data_type: std::any::type_name::<T>(),
                expected: "a channel for this data type",
                found: entry.shape().describe(),
            })
    }

    /// Resolve the keyed channel for `T`.
    pub fn try_keyed<T: KeyProvider>(&self) -> Result<&Arc<KeyedChannel<T>>, ResolutionError> {
        let entry = self.entry::<T>()?;
        entry
            .as_keyed::<T>()
            .ok_or(ResolutionError::ShapeMismatch {
                data_type: std::any::type_name::<T>(),
                expected: "a keyed channel",
                found: entry.shape().describe(),
            })
    }

    /// The channel for `T`, if one was provided.
    pub fn channel<T: Message>(&self) -> Option<Arc<dyn Channel<T>>> {
        self.try_channel::<T>().ok().cloned()
    }

    /// The keyed channel for `T`, if one was provided.
    pub fn keyed<T: KeyProvider>(&self) -> Option<Arc<KeyedChannel<T>>> {
        self.try_keyed::<T>().ok().cloned()
    }

    // ------------------------------------------------------------------------
    // Dispatch surface
    // ------------------------------------------------------------------------

    /// Register an unkeyed callback for `T`.
    ///
    /// Returns an inert handle when no channel for `T` exists or when the
    /// callback is already registered.
    pub fn register<T: Message>(&self, callback: Callback<T>) -> Subscription {
        self.try_register(callback)
            .unwrap_or_else(|err| report_failure("register", err, Subscription::inert()))
    }

    /// Register an unkeyed callback for `T`, surfacing resolution failures.
    pub fn try_register<T: Message>(
        &self,
        callback: Callback<T>,
    ) -> Result<Subscription, ResolutionError> {
        Ok(self.try_channel::<T>()?.register(callback))
    }

    /// Register a callback for payloads of `T` whose key equals `key`.
    ///
    /// Returns an inert handle when no keyed channel for `T` exists or when
    /// the callback is already registered under that key.
    pub fn register_keyed<T: KeyProvider>(&self, key: T::Key, callback: Callback<T>) -> Subscription {
        self.try_register_keyed(key, callback)
            .unwrap_or_else(|err| report_failure("register_keyed", err, Subscription::inert()))
    }

    /// Keyed registration, surfacing resolution failures.
    pub fn try_register_keyed<T: KeyProvider>(
        &self,
        key: T::Key,
        callback: Callback<T>,
    ) -> Result<Subscription, ResolutionError> {
        Ok(self.try_keyed::<T>()?.register_keyed(key, callback))
    }

    /// Remove an unkeyed callback (or, on a keyed channel, the callback from
    /// whichever list holds it). Returns `false` if nothing was removed.
    pub fn unregister<T: Message>(&self, callback: &Callback<T>) -> bool {
        match self.try_channel::<T>() {
            Ok(channel) => channel.unregister(callback),
            Err(err) => report_failure("unregister", err, false),
        }
    }

    /// Remove a callback from the list of `key`.
    pub fn unregister_keyed<T: KeyProvider>(&self, key: &T::Key, callback: &Callback<T>) -> bool {
        match self.try_keyed::<T>() {
            Ok(channel) => channel.unregister_keyed(key, callback),
            Err(err) => report_failure("unregister_keyed", err, false),
        }
    }

    /// Deliver `payload` to the subscribers of `T`.
    ///
    /// Never fails: an unresolved type is logged and the payload dropped.
    pub fn raise<T: Message>(&self, payload: &T) -> RaiseReport {
        self.try_raise(payload)
            .unwrap_or_else(|err| report_failure("raise", err, RaiseReport::default()))
    }

    /// Deliver `payload`, surfacing resolution failures.
    pub fn try_raise<T: Message>(&self, payload: &T) -> Result<RaiseReport, ResolutionError> {
        Ok(self.try_channel::<T>()?.raise(payload))
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Number of payload types with a channel.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether the registry has no channels.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Whether a channel for `T` was provided.
    pub fn contains<T: Message>(&self) -> bool {
        self.channels.contains_key(&TypeId::of::<T>())
    }

    /// Shape of the channel for `T`.
    pub fn shape_of<T: Message>(&self) -> Option<ChannelShape> {
        self.entry::<T>().ok().map(ErasedChannel::shape)
    }

    /// Names of all payload types with a channel, in no particular order.
    pub fn data_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.channels.values().map(ErasedChannel::data_type_name)
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.channels.values()).finish()
    }
}

fn report_failure<R>(operation: &'static str, err: ResolutionError, fallback: R) -> R {
    tracing::warn!(
        operation,
        data_type = err.data_type(),
        error = %err,
        "event registry call could not be routed"
    );
    fallback
}
