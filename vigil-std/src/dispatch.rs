//! Failure-isolated callback invocation.
//!
//! Every callback runs inside `catch_unwind`. A panic or a returned error is
//! turned into a [`CallbackError`], logged together with the payload, and
//! counted; it never reaches the producer and never stops the remaining
//! subscribers.
//!
//! Isolation relies on unwinding. Binaries built with `panic = "abort"` still
//! abort on a panicking callback.

use std::panic::{AssertUnwindSafe, catch_unwind};
use vigil_core::{Callback, CallbackError, Message, RaiseReport};

/// Invoke `callbacks` in order against `payload`.
pub(crate) fn dispatch_all<'a, T, I>(data_type: &str, callbacks: I, payload: &T) -> RaiseReport
where
    T: Message,
    I: IntoIterator<Item = &'a Callback<T>>,
{
    let mut report = RaiseReport::default();
    for callback in callbacks {
        report.invoked += 1;
        if let Err(err) = invoke(callback, payload) {
            report.failed += 1;
            tracing::error!(
                data_type,
                callback = callback.name(),
                callback_id = %callback.id(),
                ?payload,
                error = %err,
                "callback failed while handling event"
            );
        }
    }
    report
}

/// Invoke a single callback, converting panics and errors into [`CallbackError`].
pub(crate) fn invoke<T: Message>(callback: &Callback<T>, payload: &T) -> Result<(), CallbackError> {
    match catch_unwind(AssertUnwindSafe(|| callback.call(payload))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(CallbackError::Failed {
            callback: callback.name().to_string(),
            source,
        }),
        Err(panic) => Err(CallbackError::Panicked {
            callback: callback.name().to_string(),
            message: panic_message(panic.as_ref()),
        }),
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
