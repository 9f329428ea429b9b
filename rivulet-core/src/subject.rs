// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`Subject`] broadcasts each event pushed into it to every observer subscribed at
//! that moment.
//!
//! ## Characteristics
//!
//! - **Hot**: late subscribers do not receive past values, only those sent after subscribing.
//! - **Thread-safe**: cheap to clone; all clones share the same state.
//! - **Terminal replay**: once the subject completed or failed, new subscribers
//!   immediately receive that same stop event.
//! - **Eager removal**: cancelling a subscription removes its observer right away.
//!
//! ## Example
//!
//! ```
//! use rivulet_core::Subject;
//! use std::sync::{Arc, Mutex};
//!
//! let subject = Subject::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let _subscription = subject
//!     .observable()
//!     .subscribe_fn(move |value| sink.lock().unwrap().push(value));
//!
//! subject.next(1).unwrap();
//! subject.next(2).unwrap();
//! subject.complete().unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! assert!(subject.next(3).is_err());
//! ```

use crate::mutex::Mutex;
use crate::{
    ActionSubscription, Event, Observable, Observer, RivuletError, SubjectError,
    SubjectOperation, Subscriber,
};
use std::sync::{Arc, Weak};

struct SubjectState<T> {
    terminal: Option<Terminal>,
    next_id: u64,
    observers: Vec<(u64, Subscriber<T>)>,
}

#[derive(Clone)]
enum Terminal {
    Error(RivuletError),
    Completed,
}

impl Terminal {
    fn to_event<T>(&self) -> Event<T> {
        match self {
            Terminal::Error(e) => Event::Error(e.clone()),
            Terminal::Completed => Event::Completed,
        }
    }

    fn rejecting(&self, operation: SubjectOperation) -> SubjectError {
        let terminated_by = match self {
            Terminal::Error(_) => SubjectOperation::Error,
            Terminal::Completed => SubjectOperation::Complete,
        };
        SubjectError::Closed {
            operation,
            terminated_by,
        }
    }
}

/// A hot source that pushes events to all current subscribers.
///
/// See the [module documentation](self) for details.
pub struct Subject<T> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                terminal: None,
                next_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Returns an observable subscribing to this subject.
    ///
    /// The observable holds only a weak reference: once every `Subject` handle is
    /// dropped, new subscribers complete immediately.
    pub fn observable(&self) -> Observable<T> {
        let state = Arc::downgrade(&self.state);
        Observable::create(move |subscriber| {
            let Some(strong) = state.upgrade() else {
                subscriber.on_completed();
                return Box::new(ActionSubscription::empty());
            };

            let id = {
                let mut guard = strong.lock();
                if let Some(terminal) = guard.terminal.clone() {
                    drop(guard);
                    subscriber.on(terminal.to_event());
                    return Box::new(ActionSubscription::empty());
                }
                let id = guard.next_id;
                guard.next_id += 1;
                guard.observers.push((id, subscriber));
                id
            };

            let weak: Weak<Mutex<SubjectState<T>>> = Arc::downgrade(&strong);
            Box::new(ActionSubscription::new(move || {
                if let Some(state) = weak.upgrade() {
                    state.lock().observers.retain(|(observer_id, _)| *observer_id != id);
                }
            }))
        })
    }

    /// Sends `value` to every current subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already completed or failed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        let observers = {
            let guard = self.state.lock();
            if let Some(terminal) = &guard.terminal {
                warn!("value sent to a closed subject");
                return Err(terminal.rejecting(SubjectOperation::Next));
            }
            guard
                .observers
                .iter()
                .map(|(_, subscriber)| subscriber.clone())
                .collect::<Vec<_>>()
        };

        // Delivered outside the lock so observers may call back into the subject
        for subscriber in observers {
            subscriber.on_next(value.clone());
        }
        Ok(())
    }

    /// Fails every current subscriber with `error` and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already completed or failed.
    pub fn error(&self, error: RivuletError) -> Result<(), SubjectError> {
        self.terminate(Terminal::Error(error), SubjectOperation::Error)
    }

    /// Completes every current subscriber and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject already completed or failed.
    pub fn complete(&self) -> Result<(), SubjectError> {
        self.terminate(Terminal::Completed, SubjectOperation::Complete)
    }

    fn terminate(
        &self,
        terminal: Terminal,
        operation: SubjectOperation,
    ) -> Result<(), SubjectError> {
        let observers = {
            let mut guard = self.state.lock();
            if let Some(existing) = &guard.terminal {
                warn!("{} sent to a closed subject", operation);
                return Err(existing.rejecting(operation));
            }
            guard.terminal = Some(terminal.clone());
            core::mem::take(&mut guard.observers)
        };

        for (_, subscriber) in observers {
            subscriber.on(terminal.to_event());
        }
        Ok(())
    }

    /// Returns `true` once the subject completed or failed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Number of currently subscribed observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().observers.len()
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
