// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The `absorb` combinator: merge two observables, terminating on the first stop event.

use core::cell::Cell;
use rivulet_core::mutex::ReentrantMutex;
use rivulet_core::{CompositeSubscription, Event, Observable, Observer, Subscriber, Subscription};
use std::sync::Arc;

/// Absorbs every event of `a` and `b` into one observable.
///
/// Values from both sources are forwarded in the order they arrive. The first stop
/// event (`Error` or `Completed`) from either source is forwarded, ends the combined
/// sequence and cancels both source subscriptions.
///
/// On each subscription `a` is subscribed first. If `a` terminates synchronously while
/// being subscribed, `b` is never subscribed at all.
///
/// Delivery from the two sources may happen concurrently on different threads; it is
/// serialized before reaching the downstream observer. When both sources terminate at
/// the same time, whichever stop event is serialized first wins and the other is dropped.
///
/// # Example
///
/// ```
/// use rivulet::absorb;
/// use rivulet_core::{AnyObserver, Event, Subject};
/// use std::sync::{Arc, Mutex};
///
/// let a = Subject::<i32>::new();
/// let b = Subject::<i32>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
///
/// let _subscription = absorb(&a.observable(), &b.observable())
///     .subscribe(AnyObserver::new(move |event: Event<i32>| {
///         sink.lock().unwrap().push(event);
///     }));
///
/// a.next(1).unwrap();
/// b.next(10).unwrap();
/// a.complete().unwrap();
/// b.next(20).unwrap();
///
/// assert_eq!(
///     *seen.lock().unwrap(),
///     vec![Event::Next(1), Event::Next(10), Event::Completed]
/// );
/// assert_eq!(b.subscriber_count(), 0);
/// ```
pub fn absorb<T>(a: &Observable<T>, b: &Observable<T>) -> Observable<T>
where
    T: Send + 'static,
{
    let a = a.clone();
    let b = b.clone();

    Observable::create(move |subscriber| {
        let subscriptions = CompositeSubscription::new();
        let gate = Arc::new(AbsorbGate::new(subscriber, subscriptions.clone()));

        subscriptions.insert(a.subscribe(SourceObserver::new(Arc::clone(&gate), Source::A)));

        if subscriptions.is_closed() {
            trace!("absorb: first source terminated during subscription, skipping second");
        } else {
            subscriptions.insert(b.subscribe(SourceObserver::new(gate, Source::B)));
        }

        Box::new(subscriptions)
    })
}

/// Extension trait providing [`absorb`] as a method.
pub trait AbsorbExt<T> {
    /// Absorbs `self` and `other` into one observable; see [`absorb`].
    fn absorb_with(&self, other: &Observable<T>) -> Observable<T>;
}

impl<T> AbsorbExt<T> for Observable<T>
where
    T: Send + 'static,
{
    fn absorb_with(&self, other: &Observable<T>) -> Observable<T> {
        absorb(self, other)
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    A,
    B,
}

// Serializes delivery from both sources. The flag is reentrant-locked so an observer
// that makes a source emit again on the same thread does not deadlock.
struct AbsorbGate<T> {
    downstream: Subscriber<T>,
    subscriptions: CompositeSubscription,
    stopped: ReentrantMutex<Cell<bool>>,
}

impl<T> AbsorbGate<T> {
    fn new(downstream: Subscriber<T>, subscriptions: CompositeSubscription) -> Self {
        Self {
            downstream,
            subscriptions,
            stopped: ReentrantMutex::new(Cell::new(false)),
        }
    }

    fn forward(&self, event: Event<T>, source: Source) {
        let is_stop = event.is_stop_event();
        {
            let stopped = self.stopped.lock();
            if stopped.get() {
                return;
            }
            if is_stop {
                // Set before forwarding: nothing may pass after the stop event
                stopped.set(true);
            }
            self.downstream.on(event);
        }

        if is_stop {
            debug!("absorb: stop event from source {:?}, cancelling both sources", source);
            self.subscriptions.unsubscribe();
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped.lock().get() || self.downstream.is_stopped()
    }
}

struct SourceObserver<T> {
    gate: Arc<AbsorbGate<T>>,
    source: Source,
}

impl<T> SourceObserver<T> {
    fn new(gate: Arc<AbsorbGate<T>>, source: Source) -> Self {
        Self { gate, source }
    }
}

impl<T> Observer<T> for SourceObserver<T> {
    fn on(&self, event: Event<T>) {
        self.gate.forward(event, self.source);
    }

    fn is_stopped(&self) -> bool {
        self.gate.is_stopped()
    }
}
