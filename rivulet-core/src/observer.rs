// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Event, RivuletError};
use std::fmt;
use std::sync::Arc;

/// Receiver of the events of one subscription.
///
/// Observers take `&self` so that a single observer can be shared between several
/// producers, possibly on different threads. Implementations needing mutable state
/// use interior mutability.
pub trait Observer<T>: Send + Sync {
    /// Handles one event.
    fn on(&self, event: Event<T>);

    /// Delivers a value.
    fn on_next(&self, value: T) {
        self.on(Event::Next(value));
    }

    /// Delivers a terminal error.
    fn on_error(&self, error: RivuletError) {
        self.on(Event::Error(error));
    }

    /// Delivers normal completion.
    fn on_completed(&self) {
        self.on(Event::Completed);
    }

    /// Returns `true` once this observer drops every further event.
    ///
    /// Synchronous producers check it to stop early when their consumer is gone.
    fn is_stopped(&self) -> bool {
        false
    }
}

impl<T, O> Observer<T> for Arc<O>
where
    O: Observer<T> + ?Sized,
{
    fn on(&self, event: Event<T>) {
        (**self).on(event);
    }

    fn is_stopped(&self) -> bool {
        (**self).is_stopped()
    }
}

/// Cheaply cloneable, type-erased observer.
///
/// # Example
///
/// ```
/// use rivulet_core::{AnyObserver, Event, Observer};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = seen.clone();
/// let observer = AnyObserver::new(move |event: Event<i32>| {
///     if event.is_next() {
///         counter.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// observer.on_next(1);
/// observer.on_completed();
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct AnyObserver<T> {
    inner: Arc<dyn Observer<T>>,
}

struct FnObserver<F>(F);

impl<T, F> Observer<T> for FnObserver<F>
where
    F: Fn(Event<T>) + Send + Sync,
{
    fn on(&self, event: Event<T>) {
        (self.0)(event);
    }
}

impl<T: 'static> AnyObserver<T> {
    /// Builds an observer from a closure receiving every event.
    pub fn new<F>(on_event: F) -> Self
    where
        F: Fn(Event<T>) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(FnObserver(on_event)),
        }
    }

    /// Builds an observer from one closure per event kind.
    pub fn from_fns<N, E, C>(on_next: N, on_error: E, on_completed: C) -> Self
    where
        N: Fn(T) + Send + Sync + 'static,
        E: Fn(RivuletError) + Send + Sync + 'static,
        C: Fn() + Send + Sync + 'static,
    {
        Self::new(move |event| match event {
            Event::Next(value) => on_next(value),
            Event::Error(error) => on_error(error),
            Event::Completed => on_completed(),
        })
    }

    /// Wraps an existing observer.
    pub fn from_observer<O>(observer: O) -> Self
    where
        O: Observer<T> + 'static,
    {
        Self {
            inner: Arc::new(observer),
        }
    }
}

impl<T> Observer<T> for AnyObserver<T> {
    fn on(&self, event: Event<T>) {
        self.inner.on(event);
    }

    fn is_stopped(&self) -> bool {
        self.inner.is_stopped()
    }
}

impl<T> Clone for AnyObserver<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for AnyObserver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyObserver").finish_non_exhaustive()
    }
}
