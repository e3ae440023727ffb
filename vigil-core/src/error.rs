//! Error types for Vigil.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`VigilError`] - Top-level error type for all Vigil operations
//! - [`ResolutionError`] - No channel, or a channel of the wrong shape
//! - [`CallbackError`] - A single callback panicked or returned an error
//!
//! None of these are fatal. The registry reports them and keeps working.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Vigil operations.
#[derive(Error, Debug)]
pub enum VigilError {
    /// A call could not be routed to a channel.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// A subscriber failed while handling a payload.
    #[error("callback error: {0}")]
    Callback(#[from] CallbackError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that occur while routing a call to the channel of a data type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No channel was provisioned for the data type.
    #[error("no channel registered for data type `{data_type}`")]
    NoChannel {
        /// Name of the requested data type.
        data_type: &'static str,
    },

    /// A channel exists but cannot serve the requested operation.
    #[error("channel for data type `{data_type}` is {found}, but the call requires {expected}")]
    ShapeMismatch {
        /// Name of the requested data type.
        data_type: &'static str,
        /// Shape the call needed.
        expected: &'static str,
        /// Shape the provisioned channel has.
        found: &'static str,
    },
}

impl ResolutionError {
    /// Name of the data type the failed call was addressed to.
    pub fn data_type(&self) -> &'static str {
        match self {
            ResolutionError::NoChannel { data_type }
            | ResolutionError::ShapeMismatch { data_type, .. } => data_type,
        }
    }
}

/// Errors raised by a single callback invocation.
#[derive(Error, Debug)]
pub enum CallbackError {
    /// The callback panicked.
    #[error("callback `{callback}` panicked: {message}")]
    Panicked {
        /// Name of the callback.
        callback: String,
        /// Rendered panic payload.
        message: String,
    },

    /// The callback returned an error.
    #[error("callback `{callback}` failed: {source}")]
    Failed {
        /// Name of the callback.
        callback: String,
        /// The error it returned.
        #[source]
        source: BoxError,
    },
}

impl CallbackError {
    /// Name of the callback that failed.
    pub fn callback(&self) -> &str {
        match self {
            CallbackError::Panicked { callback, .. } | CallbackError::Failed { callback, .. } => {
                callback
            }
        }
    }
}

// Convenience conversions
impl From<BoxError> for VigilError {
    fn from(err: BoxError) -> Self {
        VigilError::Custom(err)
    }
}
