//! Callback outcome conversion.

use crate::error::BoxError;

/// Trait for converting a callback's return value into an outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to inner `T` or reports the error
///
/// A reported error is treated exactly like a panic: the channel logs it and
/// moves on to the next subscriber.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a callback",
    label = "missing `IntoCallbackOutcome` implementation",
    note = "Callbacks must return `()` or `Result<(), E>` where `E` converts into `BoxError`."
)]
pub trait IntoCallbackOutcome {
    /// Convert the return value into success or a boxed error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoCallbackOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoCallbackOutcome for Result<T, E>
where
    T: IntoCallbackOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}
