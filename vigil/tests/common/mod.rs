#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use vigil::{Callback, ChannelRegistry, KeyProvider, Message};

// ============================================================================
// Test Event Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct DamageEvent {
    pub amount: u32,
    pub source: u8,
}

impl Message for DamageEvent {}

impl KeyProvider for DamageEvent {
    type Key = u8;

    fn event_key(&self) -> Option<&u8> {
        Some(&self.source)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub frame: u64,
}

impl Message for Tick {}

/// A type no test ever provisions.
#[derive(Debug)]
pub struct Unprovisioned;

impl Message for Unprovisioned {}

// ============================================================================
// Helpers
// ============================================================================

/// Registry with an unkeyed `Tick` channel and a keyed `DamageEvent` channel.
pub fn game_registry() -> ChannelRegistry {
    ChannelRegistry::builder()
        .channel::<Tick>()
        .keyed_channel::<DamageEvent>()
        .build()
}

/// A callback that counts its invocations into the returned counter.
pub fn counter<T: Message>() -> (Callback<T>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hits = count.clone();
    let callback = Callback::new(move |_: &T| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    (callback, count)
}

/// A callback that appends `label` to the shared log.
pub fn tracer<T: Message>(log: &Arc<Mutex<Vec<&'static str>>>, label: &'static str) -> Callback<T> {
    let log = log.clone();
    Callback::named(label, move |_: &T| {
        log.lock().unwrap().push(label);
    })
}
