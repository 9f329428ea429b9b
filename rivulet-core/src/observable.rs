// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cold, push-based observables.
//!
//! An [`Observable<T>`] is a recipe: nothing runs until [`Observable::subscribe`] is
//! called, and every call runs the producer again with a fresh [`Subscriber`].
//!
//! ## Example
//!
//! ```
//! use rivulet_core::{Event, Observable};
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let _subscription = Observable::from_iter(vec![1, 2, 3])
//!     .subscribe_fn(move |value| sink.lock().unwrap().push(value));
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
//! ```

use crate::mutex::ReentrantMutex;
use crate::{
    ActionSubscription, AnyObserver, BoxSubscription, CompositeSubscription, Event, Observer,
    RivuletError, Subscription,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type SubscribeFn<T> = dyn Fn(Subscriber<T>) -> BoxSubscription + Send + Sync;

/// A lazily subscribed producer of [`Event`]s.
pub struct Observable<T> {
    subscribe_fn: Arc<SubscribeFn<T>>,
}

/// The observer handed to a producer for one subscription.
///
/// A `Subscriber` enforces the observer grammar `Next* (Error | Completed)?`: once a
/// stop event went through, or the subscription was cancelled, every further event is
/// dropped. After a stop event it also cancels whatever the producer returned, so
/// producers need no cleanup of their own on termination.
///
/// Delivery is serialized: events pushed from several threads reach the observer one
/// at a time, and a stop event is always the last one it sees. The lock is reentrant,
/// so an observer may push into the same subscriber while handling an event.
pub struct Subscriber<T> {
    sink: Arc<Sink<T>>,
}

struct Sink<T> {
    downstream: AnyObserver<T>,
    delivery: ReentrantMutex<()>,
    // Written under `delivery` by stop events; cancellation writes it lock-free
    stopped: AtomicBool,
    upstream: CompositeSubscription,
}

impl<T> Subscriber<T> {
    fn new(downstream: AnyObserver<T>) -> Self {
        Self {
            sink: Arc::new(Sink {
                downstream,
                delivery: ReentrantMutex::new(()),
                stopped: AtomicBool::new(false),
                upstream: CompositeSubscription::new(),
            }),
        }
    }
}

impl<T> Observer<T> for Subscriber<T> {
    fn on(&self, event: Event<T>) {
        let is_stop = event.is_stop_event();
        {
            let _delivery = self.sink.delivery.lock();
            if is_stop {
                if self.sink.stopped.swap(true, Ordering::AcqRel) {
                    return;
                }
            } else if self.sink.stopped.load(Ordering::Acquire) {
                return;
            }
            self.sink.downstream.on(event);
        }

        if is_stop {
            self.sink.upstream.unsubscribe();
        }
    }

    fn is_stopped(&self) -> bool {
        self.sink.stopped.load(Ordering::Acquire) || self.sink.downstream.is_stopped()
    }
}

impl<T> Subscription for Subscriber<T> {
    fn unsubscribe(&self) {
        self.sink.stopped.store(true, Ordering::Release);
        self.sink.upstream.unsubscribe();
    }

    fn is_closed(&self) -> bool {
        self.sink.stopped.load(Ordering::Acquire)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Creates an observable from a subscribe function.
    ///
    /// `subscribe` runs once per subscription. It receives the [`Subscriber`] to push
    /// events into and returns the subscription that stops its production.
    ///
    /// ```
    /// use rivulet_core::{ActionSubscription, Observable, Observer};
    ///
    /// let numbers = Observable::create(|subscriber| {
    ///     subscriber.on_next(1);
    ///     subscriber.on_next(2);
    ///     subscriber.on_completed();
    ///     Box::new(ActionSubscription::empty())
    /// });
    /// # let _ = numbers;
    /// ```
    pub fn create<F>(subscribe: F) -> Self
    where
        F: Fn(Subscriber<T>) -> BoxSubscription + Send + Sync + 'static,
    {
        Self {
            subscribe_fn: Arc::new(subscribe),
        }
    }

    /// Subscribes `observer` and returns the handle cancelling the subscription.
    pub fn subscribe<O>(&self, observer: O) -> BoxSubscription
    where
        O: Observer<T> + 'static,
    {
        let subscriber = Subscriber::new(AnyObserver::from_observer(observer));
        let upstream = (self.subscribe_fn)(subscriber.clone());
        // Cancelled on the spot if the producer already terminated synchronously
        subscriber.sink.upstream.insert(upstream);
        Box::new(subscriber)
    }

    /// Subscribes with a closure receiving values only; stop events are ignored.
    pub fn subscribe_fn<N>(&self, on_next: N) -> BoxSubscription
    where
        N: Fn(T) + Send + Sync + 'static,
    {
        self.subscribe(AnyObserver::from_fns(on_next, |_| {}, || {}))
    }

    /// Subscribes with one closure per event kind.
    pub fn subscribe_all<N, E, C>(
        &self,
        on_next: N,
        on_error: E,
        on_completed: C,
    ) -> BoxSubscription
    where
        N: Fn(T) + Send + Sync + 'static,
        E: Fn(RivuletError) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        self.subscribe(AnyObserver::from_fns(on_next, on_error, on_completed))
    }

    /// Emits `value` and completes.
    pub fn just(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Self::create(move |subscriber| {
            subscriber.on_next(value.clone());
            subscriber.on_completed();
            Box::new(ActionSubscription::empty())
        })
    }

    /// Emits every item of `items` synchronously, then completes.
    ///
    /// Emission stops early once the subscriber is stopped, for instance when an
    /// observer further down cancels its subscription while receiving a value.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Self::create(move |subscriber| {
            for item in items.clone() {
                if subscriber.is_stopped() {
                    return Box::new(ActionSubscription::empty());
                }
                subscriber.on_next(item);
            }
            subscriber.on_completed();
            Box::new(ActionSubscription::empty())
        })
    }

    /// Completes immediately without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Self::create(|subscriber| {
            subscriber.on_completed();
            Box::new(ActionSubscription::empty())
        })
    }

    /// Never emits and never terminates.
    #[must_use]
    pub fn never() -> Self {
        Self::create(|_subscriber| Box::new(ActionSubscription::empty()))
    }

    /// Fails immediately with `error`.
    #[must_use]
    pub fn throw(error: RivuletError) -> Self {
        Self::create(move |subscriber| {
            subscriber.on_error(error.clone());
            Box::new(ActionSubscription::empty())
        })
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}
