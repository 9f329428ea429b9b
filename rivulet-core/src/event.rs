// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::RivuletError;

/// One notification delivered to an [`Observer`](crate::Observer).
///
/// A subscription delivers any number of `Next` events followed by at most one
/// stop event (`Error` or `Completed`). Nothing is delivered after a stop event.
#[derive(Debug, Clone)]
pub enum Event<T> {
    /// A value produced by the source
    Next(T),
    /// The source failed; terminates the subscription
    Error(RivuletError),
    /// The source finished normally; terminates the subscription
    Completed,
}

impl<T: PartialEq> PartialEq for Event<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Event::Next(a), Event::Next(b)) => a == b,
            (Event::Completed, Event::Completed) => true,
            _ => false, // Errors are never equal
        }
    }
}

impl<T> Event<T> {
    /// Returns `true` if this is a `Next`.
    pub const fn is_next(&self) -> bool {
        matches!(self, Event::Next(_))
    }

    /// Returns `true` if this is an `Error`.
    pub const fn is_error(&self) -> bool {
        matches!(self, Event::Error(_))
    }

    /// Returns `true` if this is `Completed`.
    pub const fn is_completed(&self) -> bool {
        matches!(self, Event::Completed)
    }

    /// Returns `true` for `Error` and `Completed`, the events that end a subscription.
    pub const fn is_stop_event(&self) -> bool {
        !self.is_next()
    }

    /// Borrows the value of a `Next` event.
    pub const fn next_value(&self) -> Option<&T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into the value of a `Next` event, discarding stop events.
    pub fn ok(self) -> Option<T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into the error of an `Error` event, discarding everything else.
    pub fn err(self) -> Option<RivuletError> {
        match self {
            Event::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Maps the value of a `Next` event. Stop events pass through unchanged.
    pub fn map<U, F>(self, f: F) -> Event<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Event::Next(v) => Event::Next(f(v)),
            Event::Error(e) => Event::Error(e),
            Event::Completed => Event::Completed,
        }
    }
}

impl<T> From<Result<T, RivuletError>> for Event<T> {
    fn from(result: Result<T, RivuletError>) -> Self {
        match result {
            Ok(v) => Event::Next(v),
            Err(e) => Event::Error(e),
        }
    }
}
