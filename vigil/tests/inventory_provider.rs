mod common;

use common::{DamageEvent, Tick, counter};
use std::sync::atomic::Ordering;
use vigil::{ChannelRegistry, ChannelShape, InventoryProvider};

vigil::submit_channel!(Tick);
vigil::submit_keyed_channel!(DamageEvent);

#[test]
fn test_submitted_channels_are_collected() {
    let registry = ChannelRegistry::from_provider(InventoryProvider);

    assert!(registry.contains::<Tick>());
    assert_eq!(registry.shape_of::<Tick>(), Some(ChannelShape::Unkeyed));
    assert!(registry.shape_of::<DamageEvent>().is_some_and(|s| s.is_keyed()));
}

#[test]
fn test_each_registry_gets_fresh_channels() {
    let first = ChannelRegistry::from_provider(InventoryProvider);
    let second = ChannelRegistry::from_provider(InventoryProvider);
    let (callback, hits) = counter::<DamageEvent>();

    let _h = first.register_keyed(2u8, callback);
    second.raise(&DamageEvent {
        amount: 1,
        source: 2,
    });
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    first.raise(&DamageEvent {
        amount: 1,
        source: 2,
    });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
