// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, Observable, Subject, Subscription};
use rivulet_test_utils::{RecordingObserver, SubscriptionProbe};

#[test]
fn test_probe_counts_subscribe_and_cancel() {
    let probe = SubscriptionProbe::new();
    let source = probe.wrap(&Observable::<i32>::never());
    assert!(!probe.was_subscribed());

    let first = source.subscribe(RecordingObserver::new());
    let _second = source.subscribe(RecordingObserver::new());
    assert_eq!(probe.subscribe_count(), 2);
    assert_eq!(probe.active_count(), 2);

    first.unsubscribe();
    assert_eq!(probe.unsubscribe_count(), 1);
    assert_eq!(probe.active_count(), 1);
}

#[test]
fn test_probe_is_transparent_to_events() {
    let probe = SubscriptionProbe::new();
    let recorder = RecordingObserver::new();

    let _subscription = probe
        .wrap(&Observable::from_iter(vec![1, 2]))
        .subscribe(recorder.clone());

    assert_eq!(
        recorder.events(),
        vec![Event::Next(1), Event::Next(2), Event::Completed]
    );
}

#[test]
fn test_termination_counts_as_cancellation() {
    let probe = SubscriptionProbe::new();
    let subject = Subject::<i32>::new();
    let _subscription = probe
        .wrap(&subject.observable())
        .subscribe(RecordingObserver::new());

    subject.complete().unwrap();

    assert_eq!(probe.unsubscribe_count(), 1);
    assert_eq!(probe.active_count(), 0);
}
