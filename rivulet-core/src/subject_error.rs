// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// The [`Subject`](crate::Subject) call that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectOperation {
    Next,
    Error,
    Complete,
}

impl fmt::Display for SubjectOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Next => "next",
            Self::Error => "error",
            Self::Complete => "complete",
        })
    }
}

/// Lifecycle misuse of a [`Subject`](crate::Subject), as opposed to a stream failure.
///
/// Converts into [`RivuletError::SubscriptionClosed`](crate::RivuletError) when a caller
/// wants to forward it downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject already delivered its stop event.
    #[error("subject rejected `{operation}`: already terminated by `{terminated_by}`")]
    Closed {
        /// What the caller attempted
        operation: SubjectOperation,
        /// `Error` or `Complete`, whichever closed the subject
        terminated_by: SubjectOperation,
    },
}

impl SubjectError {
    /// The operation that hit the closed subject.
    #[must_use]
    pub const fn operation(&self) -> SubjectOperation {
        match self {
            Self::Closed { operation, .. } => *operation,
        }
    }
}
