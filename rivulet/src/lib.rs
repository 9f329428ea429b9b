// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Rivulet
//!
//! Combinators for push-based observables built on `rivulet-core`.
//!
//! The headline operator is [`absorb`]: it merges two observables of the same element
//! type, forwards whatever either produces, and ends the moment either one completes or
//! fails, cancelling both.
//!
//! ## Quick Start
//!
//! ```rust
//! use rivulet::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let readings = Subject::<u32>::new();
//! let shutdown = Subject::<u32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! let subscription = readings
//!     .observable()
//!     .absorb_with(&shutdown.observable())
//!     .subscribe_fn(move |value| sink.lock().unwrap().push(value));
//!
//! readings.next(7).unwrap();
//! shutdown.complete().unwrap();
//! readings.next(8).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![7]);
//! assert!(subscription.is_closed());
//! ```
//!
//! ## Bridges
//!
//! - [`ObservableExt::into_stream`] consumes an observable as a `futures::Stream`.
//! - [`from_stream`] / [`try_from_stream`] (feature `runtime-tokio`) drive an
//!   observable from a stream polled on a tokio task.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod absorb;
#[cfg(feature = "runtime-tokio")]
pub mod from_stream;
pub mod into_stream;

pub use self::absorb::{absorb, AbsorbExt};
#[cfg(feature = "runtime-tokio")]
pub use self::from_stream::{from_stream, try_from_stream};
pub use self::into_stream::{ObservableExt, ObservableStream};

// Re-export core types
pub use rivulet_core::{
    ActionSubscription, AnyObserver, BoxSubscription, CompositeSubscription, Event, Observable,
    Observer, RivuletError, Subject, SubjectError, SubjectOperation, Subscriber, Subscription,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{absorb, AbsorbExt, ObservableExt};
    pub use rivulet_core::{
        ActionSubscription, AnyObserver, BoxSubscription, CompositeSubscription, Event,
        Observable, Observer, RivuletError, Subject, Subscriber, Subscription,
    };

    #[cfg(feature = "runtime-tokio")]
    pub use crate::{from_stream, try_from_stream};
}
