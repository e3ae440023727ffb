//! Procedural macros for Vigil.
//!
//! - `#[derive(Message)]`: implements the `Message` marker trait
//! - `#[derive(KeyProvider)]`: implements `KeyProvider` from an `#[event_key]` field

use proc_macro::TokenStream;

mod key;
mod message;

/// Derive macro for implementing the `Message` trait.
///
/// The type must also implement `Debug`.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    message::derive_message_impl(input)
}

/// Derive macro for implementing the `KeyProvider` trait.
///
/// Mark exactly one field with `#[event_key]`. The field's type becomes the
/// key type and every event carries a key. Use `#[event_key(optional)]` on an
/// `Option<K>` field to key by `K` and allow events without a key.
///
/// ```rust,ignore
/// #[derive(Debug, Message, KeyProvider)]
/// struct DamageEvent {
///     amount: u32,
///     #[event_key]
///     source: u8,
/// }
/// ```
#[proc_macro_derive(KeyProvider, attributes(event_key))]
pub fn derive_key_provider(input: TokenStream) -> TokenStream {
    key::derive_key_provider_impl(input)
}
