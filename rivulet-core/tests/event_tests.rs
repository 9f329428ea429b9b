// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Event, RivuletError};

#[test]
fn test_stop_event_classification() {
    assert!(!Event::Next(1).is_stop_event());
    assert!(Event::<i32>::Completed.is_stop_event());
    assert!(Event::<i32>::Error(RivuletError::stream_error("boom")).is_stop_event());
}

#[test]
fn test_predicates() {
    let next = Event::Next(5);
    assert!(next.is_next());
    assert!(!next.is_error());
    assert!(!next.is_completed());

    let completed = Event::<i32>::Completed;
    assert!(completed.is_completed());
    assert!(!completed.is_next());

    let error = Event::<i32>::Error(RivuletError::stream_error("boom"));
    assert!(error.is_error());
    assert!(!error.is_completed());
}

#[test]
fn test_equality_ignores_errors() {
    assert_eq!(Event::Next(1), Event::Next(1));
    assert_ne!(Event::Next(1), Event::Next(2));
    assert_eq!(Event::<i32>::Completed, Event::Completed);
    assert_ne!(
        Event::<i32>::Error(RivuletError::stream_error("a")),
        Event::Error(RivuletError::stream_error("a"))
    );
    assert_ne!(Event::Next(1), Event::Completed);
}

#[test]
fn test_map_transforms_only_values() {
    assert_eq!(Event::Next(2).map(|v| v * 10), Event::Next(20));
    assert_eq!(Event::<i32>::Completed.map(|v| v * 10), Event::Completed);

    let mapped = Event::<i32>::Error(RivuletError::stream_error("kept")).map(|v| v * 10);
    assert!(matches!(
        mapped,
        Event::Error(RivuletError::StreamProcessingError { ref context }) if context == "kept"
    ));
}

#[test]
fn test_accessors() {
    assert_eq!(Event::Next(3).next_value(), Some(&3));
    assert_eq!(Event::Next(3).ok(), Some(3));
    assert_eq!(Event::<i32>::Completed.ok(), None);
    assert!(Event::<i32>::Completed.err().is_none());
    assert!(Event::<i32>::Error(RivuletError::stream_error("x"))
        .err()
        .is_some());
}

#[test]
fn test_from_result() {
    let ok: Event<i32> = Ok(4).into();
    assert_eq!(ok, Event::Next(4));

    let err: Event<i32> = Err(RivuletError::stream_error("failed")).into();
    assert!(err.is_error());
}
