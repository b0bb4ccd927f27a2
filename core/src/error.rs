//! Error types for histogram operations.
//!
//! The taxonomy mirrors a simple fault model: the caller can get an argument
//! wrong ([`HistogramError::PreconditionViolation`]), the persisted format can
//! be corrupt ([`HistogramError::FormatError`]), I/O can fail
//! ([`HistogramError::IoError`]), or the histogram itself can end up in a
//! state its own invariants forbid ([`HistogramError::InvariantViolation`]) —
//! the last one indicates a bug in this crate, not a caller mistake.

use std::fmt;
use std::panic::Location;

/// Errors that can occur during histogram construction, update, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum HistogramError {
    /// An argument was out of its documented range (e.g. `base < 2`, a
    /// percentile outside `[0, 1)`, a non-finite sample).
    #[error("precondition violated: {message}")]
    PreconditionViolation {
        /// Human-readable description of the violated precondition.
        message: String,
    },

    /// An internal invariant (sortedness, positivity, count conservation)
    /// failed to hold. This indicates a bug in the histogram implementation.
    #[error("invariant violated: {message}")]
    InvariantViolation {
        /// Human-readable description of the violated invariant.
        message: String,
    },

    /// A persisted record failed its magic-tag or structural validation on
    /// load.
    #[error("corrupt histogram record: {message}")]
    FormatError {
        /// Human-readable description of the format problem.
        message: String,
    },

    /// The underlying sink or source failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A wrapper adding one call-site frame of context on top of another
    /// error, used by [`Context::context`] to build a cause chain in place
    /// of the source program's hand-threaded error stack.
    #[error("{frame}: {source}")]
    WithContext {
        /// The frame describing where and why context was added.
        frame: Frame,
        /// The error this frame wraps.
        #[source]
        source: Box<HistogramError>,
    },
}

impl HistogramError {
    /// Shorthand for a [`HistogramError::PreconditionViolation`].
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`HistogramError::InvariantViolation`]. Emits a
    /// `tracing::error!` event before returning, since an invariant
    /// violation indicates a bug worth flagging loudly even if the caller
    /// swallows the `Result`.
    #[track_caller]
    pub fn invariant(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(location = %Location::caller(), %message, "histogram invariant violated");
        Self::InvariantViolation { message }
    }

    /// Shorthand for a [`HistogramError::FormatError`].
    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }
}

/// One frame of call-site context: where `.context()` was attached and why.
#[derive(Debug)]
pub struct Frame {
    location: &'static Location<'static>,
    message: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.location)
    }
}

/// Extension trait adding call-site-tagged context to a [`HistogramError`],
/// replacing the source program's mutable, per-invocation error stack with
/// an ordinary `std::error::Error` source chain: walking `.source()`
/// outward recovers the same oldest-cause-first trail the original printed.
pub trait Context<T> {
    /// Wrap the error (if any) with an added frame carrying `message` and
    /// the caller's source location.
    fn context(self, message: impl Into<String>) -> Result<T, HistogramError>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Into<HistogramError>,
{
    #[track_caller]
    fn context(self, message: impl Into<String>) -> Result<T, HistogramError> {
        self.map_err(|e| HistogramError::WithContext {
            frame: Frame {
                location: Location::caller(),
                message: message.into(),
            },
            source: Box::new(e.into()),
        })
    }
}

/// Convenience alias used throughout this crate.
pub type Result<T> = std::result::Result<T, HistogramError>;
