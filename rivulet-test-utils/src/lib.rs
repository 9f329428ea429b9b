// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test doubles for the rivulet workspace.
//!
//! - [`RecordingObserver`] records every event a subscription delivers.
//! - [`SubscriptionProbe`] wraps an observable and counts subscribes and cancellations,
//!   which is how tests prove a source was (or was never) subscribed.
//! - [`helpers`] has async polling helpers for events delivered from other threads.
//!
//! These are for tests only.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod recording_observer;
pub mod subscription_probe;

pub use helpers::{assert_quiet_for, wait_until};
pub use recording_observer::RecordingObserver;
pub use subscription_probe::SubscriptionProbe;
