// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use parking_lot::Mutex;
use rivulet::prelude::*;
use rivulet_test_utils::{assert_quiet_for, wait_until, RecordingObserver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Observable fed through a tokio channel; it can be subscribed once.
fn channel_source<T: Send + 'static>() -> (mpsc::UnboundedSender<T>, Observable<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let slot = Arc::new(Mutex::new(Some(rx)));
    let observable = from_stream(move || {
        let rx = slot.lock().take().expect("channel source subscribed twice");
        UnboundedReceiverStream::new(rx)
    });
    (tx, observable)
}

/// Endless stream yielding to the scheduler between items, counting every pull.
fn counting_ticks(pulled: Arc<AtomicUsize>) -> Observable<usize> {
    from_stream(move || {
        let pulled = Arc::clone(&pulled);
        futures::stream::iter(0usize..).then(move |i| {
            let pulled = Arc::clone(&pulled);
            async move {
                tokio::task::yield_now().await;
                pulled.fetch_add(1, Ordering::SeqCst);
                i
            }
        })
    })
}

#[tokio::test]
async fn test_from_stream_emits_items_then_completes() {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    let _subscription =
        from_stream(|| futures::stream::iter(vec![1, 2, 3])).subscribe(recorder.clone());

    // Assert
    wait_until(|| recorder.has_stopped(), 1_000).await;
    assert_eq!(
        recorder.events(),
        vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Completed]
    );
}

#[tokio::test]
async fn test_from_stream_runs_factory_per_subscription() {
    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);
    let observable = from_stream(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        futures::stream::iter(vec!["x"])
    });

    let first: Vec<Event<&str>> = observable.clone().into_stream().collect().await;
    let second: Vec<Event<&str>> = observable.into_stream().collect().await;

    assert_eq!(first, second);
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_try_from_stream_stops_at_first_error() {
    // Arrange
    let observable = try_from_stream(|| {
        futures::stream::iter(vec!["1", "2", "x", "4"]).map(str::parse::<i32>)
    });

    // Act
    let events: Vec<Event<i32>> = observable.into_stream().collect().await;

    // Assert
    assert_eq!(events.len(), 3);
    assert_eq!(events[..2], [Event::Next(1), Event::Next(2)]);
    assert!(matches!(&events[2], Event::Error(RivuletError::UserError(_))));
}

#[tokio::test]
async fn test_try_from_stream_without_errors_completes() {
    let observable = try_from_stream(|| {
        futures::stream::iter(vec![Ok::<_, std::io::Error>(5), Ok(6)])
    });

    let events: Vec<Event<i32>> = observable.into_stream().collect().await;

    assert_eq!(events, vec![Event::Next(5), Event::Next(6), Event::Completed]);
}

#[tokio::test]
async fn test_channel_values_are_forwarded() -> anyhow::Result<()> {
    let (tx, observable) = channel_source::<u8>();
    let recorder = RecordingObserver::new();
    let _subscription = observable.subscribe(recorder.clone());

    tx.send(1)?;
    tx.send(2)?;
    drop(tx);

    wait_until(|| recorder.is_completed(), 1_000).await;
    assert_eq!(recorder.values(), vec![1, 2]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unsubscribe_stops_the_pump() {
    // Arrange
    let pulled = Arc::new(AtomicUsize::new(0));
    let recorder = RecordingObserver::new();
    let subscription = counting_ticks(Arc::clone(&pulled)).subscribe(recorder.clone());
    wait_until(|| pulled.load(Ordering::SeqCst) > 10, 1_000).await;

    // Act
    subscription.unsubscribe();
    let at_cancel = pulled.load(Ordering::SeqCst);

    // Assert: at most the item in flight is pulled after cancellation
    assert_quiet_for(50, || {
        assert!(pulled.load(Ordering::SeqCst) <= at_cancel + 1);
        assert!(!recorder.has_stopped());
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_absorb_cancels_tokio_source_when_other_completes() -> anyhow::Result<()> {
    // Arrange
    let pulled = Arc::new(AtomicUsize::new(0));
    let (tx, commands) = channel_source::<usize>();
    let recorder = RecordingObserver::new();
    let _subscription =
        absorb(&counting_ticks(Arc::clone(&pulled)), &commands).subscribe(recorder.clone());
    wait_until(|| pulled.load(Ordering::SeqCst) > 5, 1_000).await;

    // Act
    tx.send(usize::MAX)?;
    drop(tx);
    wait_until(|| recorder.is_completed(), 1_000).await;
    let at_stop = pulled.load(Ordering::SeqCst);

    // Assert
    assert!(recorder.values().contains(&usize::MAX));
    assert_quiet_for(50, || {
        assert!(pulled.load(Ordering::SeqCst) <= at_stop + 1);
        assert_eq!(recorder.stop_count(), 1);
        assert!(recorder.stop_is_last());
    })
    .await;
    Ok(())
}
