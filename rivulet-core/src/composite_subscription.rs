// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A subscription owning other subscriptions.
//!
//! [`CompositeSubscription`] cancels every subscription it holds exactly once, and
//! cancels on arrival anything inserted after it has already been cancelled. It can be
//! cloned to share the same state, and awaited through [`CompositeSubscription::closed`].

use crate::mutex::Mutex;
use crate::{BoxSubscription, Subscription};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owns zero or more subscriptions and cancels them together.
///
/// # Example
///
/// ```
/// use rivulet_core::{ActionSubscription, CompositeSubscription, Subscription};
///
/// let composite = CompositeSubscription::new();
/// let first = ActionSubscription::empty();
/// assert!(composite.insert(Box::new(first.clone())));
///
/// composite.unsubscribe();
/// assert!(first.is_closed());
///
/// // Inserting after cancellation cancels the newcomer instead of storing it
/// let late = ActionSubscription::empty();
/// assert!(!composite.insert(Box::new(late.clone())));
/// assert!(late.is_closed());
/// ```
#[derive(Clone)]
pub struct CompositeSubscription {
    inner: Arc<Inner>,
}

struct Inner {
    // Mirrors `state.closed` for lock-free reads
    closed: AtomicBool,
    state: Mutex<State>,
    event: Event,
}

struct State {
    closed: bool,
    subscriptions: Vec<BoxSubscription>,
}

impl CompositeSubscription {
    /// Creates an empty composite that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                closed: AtomicBool::new(false),
                state: Mutex::new(State {
                    closed: false,
                    subscriptions: Vec::new(),
                }),
                event: Event::new(),
            }),
        }
    }

    /// Adds a subscription to the composite.
    ///
    /// Returns `false` if the composite was already cancelled, in which case
    /// `subscription` has been cancelled immediately and is not retained.
    pub fn insert(&self, subscription: BoxSubscription) -> bool {
        {
            let mut state = self.inner.state.lock();
            if !state.closed {
                state.subscriptions.push(subscription);
                return true;
            }
        }

        debug!("composite subscription already closed, cancelling inserted subscription");
        subscription.unsubscribe();
        false
    }

    /// Number of subscriptions currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.lock().subscriptions.len()
    }

    /// Returns `true` if no subscription is currently held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Future resolving once the composite has been cancelled.
    ///
    /// Resolves immediately if cancellation already happened.
    pub fn closed(&self) -> Closed<'_> {
        Closed {
            composite: self,
            listener: None,
        }
    }
}

impl Subscription for CompositeSubscription {
    fn unsubscribe(&self) {
        let subscriptions = {
            let mut state = self.inner.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            self.inner.closed.store(true, Ordering::Release);
            core::mem::take(&mut state.subscriptions)
        };

        trace!(
            "composite subscription closed, cancelling {} subscriptions",
            subscriptions.len()
        );

        // Cancelled outside the lock: teardown code may touch this composite again
        for subscription in subscriptions {
            subscription.unsubscribe();
        }

        self.inner.event.notify(usize::MAX);
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl Default for CompositeSubscription {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompositeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeSubscription")
            .field("closed", &self.is_closed())
            .field("len", &self.len())
            .finish()
    }
}

/// Future returned by [`CompositeSubscription::closed()`].
pub struct Closed<'a> {
    composite: &'a CompositeSubscription,
    listener: Option<EventListener>,
}

impl Future for Closed<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.composite.is_closed() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                // Register, then re-check the flag on the next turn: a cancel between
                // the first check and `listen` would otherwise be missed
                None => self.listener = Some(self.composite.inner.event.listen()),
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
