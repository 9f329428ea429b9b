// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for push-based observable streams.
//!
//! - [`Event`]: `Next(value)`, `Error(err)` or `Completed`
//! - [`Observer`] / [`AnyObserver`]: receivers of events
//! - [`Subscription`], [`ActionSubscription`], [`CompositeSubscription`]: cancellation handles
//! - [`Observable`] / [`Subscriber`]: cold producers and the guarded sink they push into
//! - [`Subject`]: a hot, multicast source driven imperatively
//!
//! Operators built on these types live in the `rivulet` crate.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod composite_subscription;
pub mod error;
pub mod event;
pub mod mutex;
pub mod observable;
pub mod observer;
pub mod subject;
pub mod subject_error;
pub mod subscription;

pub use self::composite_subscription::{Closed, CompositeSubscription};
pub use self::error::{IntoRivuletError, Result, RivuletError};
pub use self::event::Event;
pub use self::observable::{Observable, Subscriber};
pub use self::observer::{AnyObserver, Observer};
pub use self::subject::Subject;
pub use self::subject_error::{SubjectError, SubjectOperation};
pub use self::subscription::{ActionSubscription, BoxSubscription, Subscription};
