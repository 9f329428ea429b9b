// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Driving an observable from a `futures::Stream` on the tokio runtime.

use futures::stream::{self, Stream, StreamExt};
use rivulet_core::{
    BoxSubscription, CompositeSubscription, Event, IntoRivuletError, Observable, Observer,
    Subscriber,
};

/// Creates an observable emitting the items of a stream.
///
/// `factory` runs once per subscription, so every subscriber gets its own stream. The
/// stream is polled on a spawned tokio task; each item becomes `Next` and the end of
/// the stream becomes `Completed`. Cancelling the subscription stops the task.
///
/// # Panics
///
/// Subscribing outside a tokio runtime panics, as `tokio::spawn` does.
///
/// # Example
///
/// ```
/// use futures::StreamExt;
/// use rivulet::{from_stream, ObservableExt};
/// use rivulet_core::Event;
///
/// # #[tokio::main]
/// # async fn main() {
/// let observable = from_stream(|| futures::stream::iter(vec![1, 2, 3]));
/// let events: Vec<Event<i32>> = observable.into_stream().collect().await;
/// assert_eq!(events.len(), 4);
/// # }
/// ```
pub fn from_stream<T, S, F>(factory: F) -> Observable<T>
where
    T: Send + 'static,
    S: Stream<Item = T> + Send + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    Observable::create(move |subscriber| {
        let events = factory()
            .map(Event::Next)
            .chain(stream::once(async { Event::Completed }));
        spawn_pump(events, subscriber)
    })
}

/// Like [`from_stream`], for fallible streams.
///
/// The first `Err` item is emitted as `Error` and ends the subscription.
pub fn try_from_stream<T, E, S, F>(factory: F) -> Observable<T>
where
    T: Send + 'static,
    E: IntoRivuletError,
    S: Stream<Item = Result<T, E>> + Send + 'static,
    F: Fn() -> S + Send + Sync + 'static,
{
    Observable::create(move |subscriber| {
        let events = factory()
            .map(|item| Event::from(item.map_err(IntoRivuletError::into_rivulet_error)))
            .chain(stream::once(async { Event::Completed }));
        spawn_pump(events, subscriber)
    })
}

fn spawn_pump<T, S>(events: S, subscriber: Subscriber<T>) -> BoxSubscription
where
    T: Send + 'static,
    S: Stream<Item = Event<T>> + Send + 'static,
{
    let cancellation = CompositeSubscription::new();
    let token = cancellation.clone();

    tokio::spawn(async move {
        let mut events = Box::pin(events);
        loop {
            tokio::select! {
                biased;
                () = token.closed() => {
                    trace!("from_stream: subscription cancelled, stopping pump");
                    break;
                }
                event = events.next() => {
                    let Some(event) = event else { break };
                    let is_stop = event.is_stop_event();
                    subscriber.on(event);
                    if is_stop {
                        break;
                    }
                }
            }
        }
    });

    Box::new(cancellation)
}
