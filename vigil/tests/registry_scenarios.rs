mod common;

use common::{DamageEvent, Tick, Unprovisioned, counter, game_registry, tracer};
use std::sync::{Arc, Mutex, atomic::Ordering};
use vigil::{
    Callback, ChannelRegistry, ChannelShape, RaiseReport, ResolutionError, StaticProvider,
    testing::RecordingCallback,
};

#[test]
fn test_keyed_and_unkeyed_subscribers_for_damage() {
    let registry = game_registry();
    let log = Arc::new(Mutex::new(Vec::new()));

    let _k1 = registry.register_keyed(1u8, tracer::<DamageEvent>(&log, "source-1"));
    let _k2 = registry.register_keyed(2u8, tracer::<DamageEvent>(&log, "source-2"));
    let _any = registry.register(tracer::<DamageEvent>(&log, "any"));

    let report = registry.raise(&DamageEvent {
        amount: 7,
        source: 1,
    });

    assert_eq!(*log.lock().unwrap(), vec!["source-1", "any"]);
    assert_eq!(report, RaiseReport { invoked: 2, failed: 0 });
}

#[test]
fn test_unkeyed_dispatch_in_registration_order() {
    let registry = game_registry();
    let log = Arc::new(Mutex::new(Vec::new()));

    let _a = registry.register(tracer::<Tick>(&log, "a"));
    let _b = registry.register(tracer::<Tick>(&log, "b"));
    let _c = registry.register(tracer::<Tick>(&log, "c"));

    registry.raise(&Tick { frame: 1 });

    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_duplicate_registration_is_ignored() {
    let registry = game_registry();
    let (callback, hits) = counter::<Tick>();

    let first = registry.register(callback.clone());
    let second = registry.register(callback.clone());

    registry.raise(&Tick { frame: 1 });

    assert!(first.is_active());
    assert!(second.is_inert());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispose_is_idempotent_and_allows_reregistration() {
    let registry = game_registry();
    let recorder = RecordingCallback::<Tick>::new("recorder");

    let handle = registry.register(recorder.callback());
    registry.raise(&Tick { frame: 1 });

    assert!(handle.dispose());
    assert!(!handle.dispose());
    assert!(!handle.is_active());

    registry.raise(&Tick { frame: 2 });
    assert_eq!(recorder.events(), vec![Tick { frame: 1 }]);

    let again = registry.register(recorder.callback());
    assert!(again.is_active());
    registry.raise(&Tick { frame: 3 });
    assert_eq!(recorder.events(), vec![Tick { frame: 1 }, Tick { frame: 3 }]);
}

#[test]
fn test_handle_and_unregister_target_the_same_entry() {
    let registry = game_registry();
    let (callback, hits) = counter::<Tick>();

    let handle = registry.register(callback.clone());
    assert!(registry.unregister(&callback));
    assert!(!registry.unregister(&callback));
    assert!(!handle.dispose());

    registry.raise(&Tick { frame: 1 });
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_keyed_unregister_without_key_falls_back_to_base() {
    let registry = game_registry();
    let (keyed, keyed_hits) = counter::<DamageEvent>();
    let (base, base_hits) = counter::<DamageEvent>();

    let _k = registry.register_keyed(3u8, keyed.clone());
    let _b = registry.register(base.clone());

    assert!(registry.unregister(&keyed));
    assert!(registry.unregister(&base));

    registry.raise(&DamageEvent {
        amount: 1,
        source: 3,
    });
    assert_eq!(keyed_hits.load(Ordering::SeqCst), 0);
    assert_eq!(base_hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unregister_keyed_with_wrong_key_is_a_no_op() {
    let registry = game_registry();
    let (callback, hits) = counter::<DamageEvent>();

    let _k = registry.register_keyed(3u8, callback.clone());
    assert!(!registry.unregister_keyed(&4u8, &callback));

    registry.raise(&DamageEvent {
        amount: 1,
        source: 3,
    });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

fn reject(_: &Tick) -> Result<(), String> {
    Err("rejected".to_string())
}

fn explode(_: &Tick) {
    panic!("callback blew up");
}

#[test]
fn test_failing_callbacks_do_not_stop_delivery() {
    let registry = game_registry();
    let recorder = RecordingCallback::<Tick>::new("recorder");

    let _r = registry.register(Callback::new(reject));
    let _e = registry.register(Callback::new(explode));
    let _ok = registry.register(recorder.callback());

    let report = registry.raise(&Tick { frame: 9 });

    assert_eq!(report, RaiseReport { invoked: 3, failed: 2 });
    assert_eq!(report.delivered(), 1);
    assert_eq!(recorder.count(), 1);
}

#[test]
fn test_unprovisioned_type_is_reported_and_ignored() {
    let registry = game_registry();

    let handle = registry.register(Callback::new(|_: &Unprovisioned| {}));
    assert!(handle.is_inert());
    assert!(!handle.dispose());
    assert!(registry.raise(&Unprovisioned).is_empty());

    assert_eq!(
        registry.try_raise(&Unprovisioned),
        Err(ResolutionError::NoChannel {
            data_type: std::any::type_name::<Unprovisioned>(),
        })
    );
}

#[test]
fn test_keyed_operation_on_unkeyed_channel_is_rejected() {
    #[derive(Debug)]
    struct Beacon(u8);
    impl vigil::Message for Beacon {}
    impl vigil::KeyProvider for Beacon {
        type Key = u8;
        fn event_key(&self) -> Option<&u8> {
            Some(&self.0)
        }
    }

    let registry = ChannelRegistry::builder().channel::<Beacon>().build();
    let (callback, hits) = counter::<Beacon>();

    let err = registry
        .try_register_keyed(1u8, callback.clone())
        .unwrap_err();
    assert!(matches!(err, ResolutionError::ShapeMismatch { .. }));
    assert!(registry.register_keyed(1u8, callback.clone()).is_inert());

    // Unkeyed operations still work.
    let _h = registry.register(callback);
    registry.raise(&Beacon(1));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registry_introspection() {
    let registry = game_registry();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains::<Tick>());
    assert!(!registry.contains::<Unprovisioned>());
    assert_eq!(registry.shape_of::<Tick>(), Some(ChannelShape::Unkeyed));
    assert!(registry.shape_of::<DamageEvent>().is_some_and(|s| s.is_keyed()));

    let mut names: Vec<_> = registry.data_types().collect();
    names.sort_unstable();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.ends_with("Tick")));
}

#[test]
fn test_registries_from_one_provider_share_channels() {
    let provider = StaticProvider::new().channel::<Tick>();
    let first = ChannelRegistry::from_provider(&provider);
    let second = ChannelRegistry::from_provider(&provider);
    let (callback, hits) = counter::<Tick>();

    let _h = first.register(callback);
    second.raise(&Tick { frame: 1 });

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_guard_disposes_on_drop() {
    let registry = game_registry();
    let (callback, hits) = counter::<Tick>();

    {
        let _guard = registry.register(callback).into_guard();
        registry.raise(&Tick { frame: 1 });
    }
    registry.raise(&Tick { frame: 2 });

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
