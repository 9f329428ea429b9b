// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use rivulet_core::{Event, Observer};
use std::sync::Arc;

/// Observer recording every event it receives, in order.
///
/// Clones share the same log, so a test keeps one clone and hands the other to
/// `subscribe`.
///
/// ```rust
/// use rivulet_core::Observable;
/// use rivulet_test_utils::RecordingObserver;
///
/// let recorder = RecordingObserver::new();
/// let _subscription = Observable::from_iter(vec![1, 2]).subscribe(recorder.clone());
///
/// assert_eq!(recorder.values(), vec![1, 2]);
/// assert!(recorder.is_completed());
/// ```
pub struct RecordingObserver<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
}

impl<T> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of events received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stop events received; a correct subscription never exceeds one.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_stop_event())
            .count()
    }

    /// Returns `true` once a stop event was recorded.
    #[must_use]
    pub fn has_stopped(&self) -> bool {
        self.stop_count() > 0
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.events.lock().iter().any(Event::is_completed)
    }

    #[must_use]
    pub fn is_errored(&self) -> bool {
        self.events.lock().iter().any(Event::is_error)
    }

    /// Returns `true` if the stop event, if any, is the last event recorded.
    #[must_use]
    pub fn stop_is_last(&self) -> bool {
        let events = self.events.lock();
        match events.iter().position(Event::is_stop_event) {
            Some(index) => index + 1 == events.len(),
            None => true,
        }
    }
}

impl<T: Clone> RecordingObserver<T> {
    /// All recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<Event<T>> {
        self.events.lock().clone()
    }

    /// Values of the recorded `Next` events.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| event.next_value().cloned())
            .collect()
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn on(&self, event: Event<T>) {
        self.events.lock().push(event);
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
