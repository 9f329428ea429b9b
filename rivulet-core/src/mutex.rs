// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synchronization primitives shared by every subscription and sink in the workspace.
//!
//! `parking_lot` locks do not poison: a panicking observer leaves them usable.

pub use parking_lot::{Mutex, ReentrantMutex};
