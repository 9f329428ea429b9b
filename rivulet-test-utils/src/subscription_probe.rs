// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{ActionSubscription, Observable, Subscription};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Test double counting how often an observable is subscribed and cancelled.
///
/// ```rust
/// use rivulet_core::{Observable, Subscription};
/// use rivulet_test_utils::{RecordingObserver, SubscriptionProbe};
///
/// let probe = SubscriptionProbe::new();
/// let source = probe.wrap(&Observable::<i32>::never());
///
/// let subscription = source.subscribe(RecordingObserver::new());
/// subscription.unsubscribe();
/// subscription.unsubscribe();
///
/// assert_eq!(probe.subscribe_count(), 1);
/// assert_eq!(probe.unsubscribe_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct SubscriptionProbe {
    counters: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    subscribes: AtomicUsize,
    unsubscribes: AtomicUsize,
}

impl SubscriptionProbe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an observable behaving like `source` while counting on this probe.
    pub fn wrap<T: Send + 'static>(&self, source: &Observable<T>) -> Observable<T> {
        let source = source.clone();
        let counters = Arc::clone(&self.counters);

        Observable::create(move |subscriber| {
            counters.subscribes.fetch_add(1, Ordering::SeqCst);
            let inner = source.subscribe(subscriber);
            let counters = Arc::clone(&counters);
            Box::new(ActionSubscription::new(move || {
                counters.unsubscribes.fetch_add(1, Ordering::SeqCst);
                inner.unsubscribe();
            }))
        })
    }

    #[must_use]
    pub fn subscribe_count(&self) -> usize {
        self.counters.subscribes.load(Ordering::SeqCst)
    }

    /// Number of subscriptions cancelled, whether by the consumer or by termination.
    #[must_use]
    pub fn unsubscribe_count(&self) -> usize {
        self.counters.unsubscribes.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn was_subscribed(&self) -> bool {
        self.subscribe_count() > 0
    }

    /// Subscriptions opened and not yet cancelled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.subscribe_count().saturating_sub(self.unsubscribe_count())
    }
}
