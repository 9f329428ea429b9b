// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consuming an observable as a `futures::Stream`.

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream, StreamExt};
use futures_channel::mpsc::{self, UnboundedReceiver};
use rivulet_core::{AnyObserver, BoxSubscription, Event, Observable, Subscription};

/// Extension trait turning an [`Observable`] into a pull-based stream.
pub trait ObservableExt<T> {
    /// Subscribes once and yields every event as a stream item.
    ///
    /// Events are buffered on an unbounded channel until polled. The stream ends after
    /// yielding the stop event; dropping it early cancels the subscription.
    ///
    /// # Example
    ///
    /// ```
    /// use futures::StreamExt;
    /// use rivulet::ObservableExt;
    /// use rivulet_core::{Event, Observable};
    ///
    /// # futures::executor::block_on(async {
    /// let events: Vec<Event<i32>> = Observable::from_iter(vec![1, 2])
    ///     .into_stream()
    ///     .collect()
    ///     .await;
    /// assert_eq!(events, vec![Event::Next(1), Event::Next(2), Event::Completed]);
    /// # });
    /// ```
    fn into_stream(self) -> ObservableStream<T>;
}

impl<T> ObservableExt<T> for Observable<T>
where
    T: Send + 'static,
{
    fn into_stream(self) -> ObservableStream<T> {
        let (tx, rx) = mpsc::unbounded();
        let subscription = self.subscribe(AnyObserver::new(move |event: Event<T>| {
            // The receiver is gone only once the stream was dropped
            let _ = tx.unbounded_send(event);
        }));

        ObservableStream {
            receiver: rx,
            subscription,
            cancelled: false,
            terminated: false,
        }
    }
}

/// Stream returned by [`ObservableExt::into_stream`].
pub struct ObservableStream<T> {
    receiver: UnboundedReceiver<Event<T>>,
    subscription: BoxSubscription,
    cancelled: bool,
    terminated: bool,
}

impl<T> ObservableStream<T> {
    /// Cancels the underlying subscription; already buffered events are still yielded.
    pub fn unsubscribe(&mut self) {
        self.subscription.unsubscribe();
        self.cancelled = true;
    }
}

impl<T> Stream for ObservableStream<T> {
    type Item = Event<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        match self.receiver.poll_next_unpin(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_stop_event() {
                    self.terminated = true;
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                self.terminated = true;
                Poll::Ready(None)
            }
            Poll::Pending => {
                // Cancelled without a stop event: the sender lives on in the source,
                // so end the stream once the buffer is drained
                if self.cancelled {
                    self.terminated = true;
                    return Poll::Ready(None);
                }
                Poll::Pending
            }
        }
    }
}

impl<T> FusedStream for ObservableStream<T> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<T> Drop for ObservableStream<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
