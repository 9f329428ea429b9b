// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellable handles returned by [`Observable::subscribe`](crate::Observable::subscribe).

use crate::mutex::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A handle owning the right to stop receiving events from one subscription.
///
/// `unsubscribe` is idempotent: only the first call has an effect.
pub trait Subscription: Send + Sync {
    /// Stops delivery and releases the resources held by the subscription.
    fn unsubscribe(&self);

    /// Returns `true` once `unsubscribe` has been called.
    fn is_closed(&self) -> bool;
}

/// Owned, type-erased subscription.
pub type BoxSubscription = Box<dyn Subscription>;

impl<S> Subscription for Box<S>
where
    S: Subscription + ?Sized,
{
    fn unsubscribe(&self) {
        (**self).unsubscribe();
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<S> Subscription for Arc<S>
where
    S: Subscription + ?Sized,
{
    fn unsubscribe(&self) {
        (**self).unsubscribe();
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

type Teardown = Box<dyn FnOnce() + Send>;

/// Subscription running a teardown closure exactly once, on the first `unsubscribe`.
///
/// Clones share state, so any clone may cancel.
///
/// # Example
///
/// ```
/// use rivulet_core::{ActionSubscription, Subscription};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let counter = runs.clone();
/// let subscription = ActionSubscription::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// subscription.unsubscribe();
/// subscription.unsubscribe();
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// assert!(subscription.is_closed());
/// ```
#[derive(Clone)]
pub struct ActionSubscription {
    inner: Arc<ActionInner>,
}

struct ActionInner {
    closed: AtomicBool,
    teardown: Mutex<Option<Teardown>>,
}

impl ActionSubscription {
    /// Creates a subscription that runs `teardown` when cancelled.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::with_teardown(Some(Box::new(teardown)))
    }

    /// Creates a subscription with nothing to tear down.
    #[must_use]
    pub fn empty() -> Self {
        Self::with_teardown(None)
    }

    fn with_teardown(teardown: Option<Teardown>) -> Self {
        Self {
            inner: Arc::new(ActionInner {
                closed: AtomicBool::new(false),
                teardown: Mutex::new(teardown),
            }),
        }
    }
}

impl Subscription for ActionSubscription {
    fn unsubscribe(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Taken out of the lock so the teardown may re-enter this subscription
        let teardown = self.inner.teardown.lock().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ActionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSubscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
