//! # vigil-std
//!
//! Standard implementations for the Vigil typed event channel registry.
//!
//! This crate provides:
//! - **Channels**: [`EventChannel`], [`KeyedChannel`], built on [`SubscriberList`]
//! - **Type erasure**: [`ErasedChannel`], [`ChannelShape`]
//! - **Provisioning**: [`ChannelProvider`], [`ChannelCatalog`], [`StaticProvider`],
//!   and `InventoryProvider` with the `inventory` feature
//! - **Routing**: [`ChannelRegistry`], [`RegistryBuilder`]
//! - **Testing**: recording and counting callbacks
//!
//! Failures are reported through `tracing`: resolution failures at `WARN`,
//! callback failures at `ERROR` with the payload attached.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use vigil_core;

// Modules
pub mod channel;
mod dispatch;
pub mod erased;
pub mod keyed;
pub mod list;
#[cfg(test)]
mod log_capture;
pub mod provider;
pub mod registry;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;

pub use channel::EventChannel;
pub use erased::{ChannelShape, ErasedChannel};
pub use keyed::KeyedChannel;
pub use list::SubscriberList;
#[cfg(feature = "inventory")]
pub use provider::{ChannelRegistration, InventoryProvider};
pub use provider::{ChannelCatalog, ChannelProvider, StaticProvider};
pub use registry::{ChannelRegistry, RegistryBuilder};
