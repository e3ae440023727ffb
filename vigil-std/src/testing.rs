//! Testing utilities for Vigil.
//!
//! This module provides callbacks that make assertions about dispatch easy.
//!
//! # Features
//!
//! - [`RecordingCallback`]: records every payload it receives
//! - [`CountingCallback`]: counts invocations
//!
//! Both hand out clones of a single [`Callback`], so registering the value
//! returned by `callback()` twice is a duplicate registration.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use vigil_core::{Callback, Message};

// ============================================================================
// Recording Callback
// ============================================================================

/// A callback that records all payloads it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallback::<DamageEvent>::new("damage");
/// let _handle = registry.register(recorder.callback());
///
/// registry.raise(&DamageEvent { amount: 3 });
///
/// assert_eq!(recorder.events().len(), 1);
/// ```
pub struct RecordingCallback<T: Message + Clone> {
    events: Arc<Mutex<Vec<T>>>,
    callback: Callback<T>,
}

impl<T: Message + Clone> RecordingCallback<T> {
    /// Create a recorder whose callback carries `name` in diagnostics.
    pub fn new(name: &'static str) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback = Callback::named(name, move |payload: &T| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(payload.clone());
        });
        Self { events, callback }
    }

    /// The recording callback. Every call returns the same identity.
    pub fn callback(&self) -> Callback<T> {
        self.callback.clone()
    }

    /// Get a clone of the recorded payloads.
    pub fn events(&self) -> Vec<T> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Clear all recorded payloads.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<T: Message + Clone> Clone for RecordingCallback<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            callback: self.callback.clone(),
        }
    }
}

// ============================================================================
// Counting Callback
// ============================================================================

/// A callback that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingCallback::<Tick>::new("ticks");
/// let _handle = registry.register(counter.callback());
///
/// registry.raise(&Tick);
///
/// assert_eq!(counter.count(), 1);
/// ```
pub struct CountingCallback<T: Message> {
    count: Arc<AtomicUsize>,
    callback: Callback<T>,
}

impl<T: Message> CountingCallback<T> {
    /// Create a counter whose callback carries `name` in diagnostics.
    pub fn new(name: &'static str) -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let hits = count.clone();
        let callback = Callback::named(name, move |_: &T| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        Self { count, callback }
    }

    /// The counting callback. Every call returns the same identity.
    pub fn callback(&self) -> Callback<T> {
        self.callback.clone()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<T: Message> Clone for CountingCallback<T> {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
            callback: self.callback.clone(),
        }
    }
}
