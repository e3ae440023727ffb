//! Type-erased channel storage.
//!
//! The registry keeps channels of many payload types in one map. Each entry is
//! an [`ErasedChannel`]: the channel behind `dyn Any`, tagged with its payload
//! type and its [`ChannelShape`]. Typed access goes back through a checked
//! downcast, so a channel can never be handed out for the wrong payload type.

use crate::{channel::EventChannel, keyed::KeyedChannel};
use std::{
    any::{Any, TypeId},
    fmt,
    sync::Arc,
};
use vigil_core::{Channel, KeyProvider, Message};

/// Whether a channel supports keyed registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelShape {
    /// Plain channel: one subscriber list.
    Unkeyed,
    /// Keyed channel: a base list plus one list per key.
    Keyed {
        /// Name of the key type.
        key_type: &'static str,
    },
}

impl ChannelShape {
    /// Short description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ChannelShape::Unkeyed => "an unkeyed channel",
            ChannelShape::Keyed { .. } => "a keyed channel",
        }
    }

    /// True for [`ChannelShape::Keyed`].
    pub fn is_keyed(&self) -> bool {
        matches!(self, ChannelShape::Keyed { .. })
    }
}

impl fmt::Display for ChannelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelShape::Unkeyed => f.write_str("unkeyed"),
            ChannelShape::Keyed { key_type } => write!(f, "keyed by `{key_type}`"),
        }
    }
}

/// A channel for some payload type, with the payload type erased.
///
/// Cloning shares the underlying channel.
#[derive(Clone)]
pub struct ErasedChannel {
    data_type: TypeId,
    data_type_name: &'static str,
    shape: ChannelShape,
    // Holds an `Arc<dyn Channel<T>>`.
    dispatch: Arc<dyn Any + Send + Sync>,
    // Holds an `Arc<KeyedChannel<T>>` when the shape is keyed.
    keyed: Option<Arc<dyn Any + Send + Sync>>,
}

impl ErasedChannel {
    /// Erase a default [`EventChannel`].
    pub fn unkeyed<T: Message>(channel: EventChannel<T>) -> Self {
        Self::from_channel::<T, _>(Arc::new(channel))
    }

    /// Erase any shared [`Channel`] implementation.
    ///
    /// The result has [`ChannelShape::Unkeyed`]: keyed registration is only
    /// available on [`KeyedChannel`].
    pub fn from_channel<T, C>(channel: Arc<C>) -> Self
    where
        T: Message,
        C: Channel<T>,
    {
        let dispatch: Arc<dyn Channel<T>> = channel;
        Self {
            data_type: TypeId::of::<T>(),
            data_type_name: std::any::type_name::<T>(),
            shape: ChannelShape::Unkeyed,
            dispatch: Arc::new(dispatch),
            keyed: None,
        }
    }

    /// Erase a [`KeyedChannel`].
    pub fn keyed<T: KeyProvider>(channel: KeyedChannel<T>) -> Self {
        Self::from_keyed(Arc::new(channel))
    }

    /// Erase a shared [`KeyedChannel`].
    pub fn from_keyed<T: KeyProvider>(channel: Arc<KeyedChannel<T>>) -> Self {
        let dispatch: Arc<dyn Channel<T>> = channel.clone();
        let keyed: Arc<dyn Any + Send + Sync> = Arc::new(channel);
        Self {
            data_type: TypeId::of::<T>(),
            data_type_name: std::any::type_name::<T>(),
            shape: ChannelShape::Keyed {
                key_type: std::any::type_name::<T::Key>(),
            },
            dispatch: Arc::new(dispatch),
            keyed: Some(keyed),
        }
    }

    /// Identifier of the payload type.
    pub fn data_type(&self) -> TypeId {
        self.data_type
    }

    /// Name of the payload type.
    pub fn data_type_name(&self) -> &'static str {
        self.data_type_name
    }

    /// The channel's shape.
    pub fn shape(&self) -> ChannelShape {
        self.shape
    }

    /// The channel as a dispatcher for `T`, or `None` if it serves another type.
    pub fn as_channel<T: Message>(&self) -> Option<&Arc<dyn Channel<T>>> {
        self.dispatch.downcast_ref::<Arc<dyn Channel<T>>>()
    }

    /// The keyed channel for `T`, or `None` if it is unkeyed or serves another type.
    pub fn as_keyed<T: KeyProvider>(&self) -> Option<&Arc<KeyedChannel<T>>> {
        self.keyed
            .as_ref()
            .and_then(|keyed| keyed.downcast_ref::<Arc<KeyedChannel<T>>>())
    }
}

impl fmt::Debug for ErasedChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedChannel")
            .field("data_type", &self.data_type_name)
            .field("shape", &self.shape)
            .finish()
    }
}
