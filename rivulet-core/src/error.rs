// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types carried by [`Event::Error`](crate::Event::Error).
//!
//! Errors in an observable sequence are data: a producer emits them as the terminal
//! event of a subscription, and operators relay them unchanged. Nothing in this
//! workspace panics or returns `Err` because a stream failed.
//!
//! # Examples
//!
//! ```
//! use rivulet_core::{Event, RivuletError};
//!
//! let event: Event<i32> = Event::Error(RivuletError::stream_error("sensor offline"));
//! assert!(event.is_stop_event());
//! ```

use crate::SubjectError;

/// Root error type for everything that flows through an observable.
#[derive(Debug, thiserror::Error)]
pub enum RivuletError {
    /// A producer failed while generating events.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code, wrapped so it can travel as an event.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The producer was already closed when the operation was attempted.
    #[error("Subscription closed: {context}")]
    SubscriptionClosed {
        /// What was being attempted
        context: String,
    },
}

impl RivuletError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a subscription-closed error with the given context
    pub fn closed(context: impl Into<String>) -> Self {
        Self::SubscriptionClosed {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }
}

/// Specialized Result type for rivulet operations
pub type Result<T> = std::result::Result<T, RivuletError>;

/// Extension trait for converting foreign errors into [`RivuletError`].
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoRivuletError {
    /// Convert this error into a `RivuletError`
    fn into_rivulet_error(self) -> RivuletError;
}

impl<E: std::error::Error + Send + Sync + 'static> IntoRivuletError for E {
    fn into_rivulet_error(self) -> RivuletError {
        RivuletError::user_error(self)
    }
}

impl From<SubjectError> for RivuletError {
    fn from(error: SubjectError) -> Self {
        match error {
            SubjectError::Closed { .. } => Self::closed(error.to_string()),
        }
    }
}

impl Clone for RivuletError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed source cannot be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::SubscriptionClosed { context } => Self::SubscriptionClosed {
                context: context.clone(),
            },
        }
    }
}
