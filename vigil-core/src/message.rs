//! Message trait for payload types.

use std::fmt::Debug;

/// A marker trait for payloads raised through a channel.
///
/// Messages must be `Send + Sync + 'static` so channels can be shared across
/// threads, and `Debug` so a failing callback can be reported together with the
/// payload that triggered it.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct DamageEvent { amount: i32 }
///
/// impl Message for DamageEvent {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Debug + Send + Sync + 'static`",
    note = "Payloads raised through Vigil channels must be thread-safe, static and printable."
)]
pub trait Message: Debug + Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for i32 {}
impl Message for i64 {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
