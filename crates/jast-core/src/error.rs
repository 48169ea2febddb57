//! Error types and error classification for jast.
//!
//! This module provides a unified error type (`AstError`) returned by every
//! fallible tree operation, plus a stable classification (`ErrorKind`) that
//! callers can match on without caring about the message payload.
//!
//! ## Error Classes
//!
//! - `1`: Null argument (a required property received an absent value)
//! - `2`: Invalid argument (wrong property, wrong category, unknown mode)
//! - `3`: Missing data (extension-data lookup found nothing)
//! - `4`: Illegal state (required context is not present)
//! - `5`: Invalid state (the call would break single ownership)
//!
//! ## Soft failures
//!
//! Operations whose target is simply not found (`remove`, `replace`) do not
//! produce an `AstError`; they return `Ok(false)`.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Error Kinds
// ============================================================================

/// Stable classification of an [`AstError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorKind {
    /// A required property received an absent value.
    NullArgument = 1,
    /// An argument was not acceptable for the target (wrong property, wrong
    /// node category, unknown mode, out-of-bounds index).
    InvalidArgument = 2,
    /// An extension-data lookup found no entry for the key.
    MissingData = 3,
    /// The operation needs context that is not present.
    IllegalState = 4,
    /// The operation would break the single-ownership invariant.
    InvalidState = 5,
}

impl ErrorKind {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Error raised by tree operations.
///
/// Every variant is raised before any structural change is committed, so a
/// failing call leaves the tree exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A required property received an absent value.
    #[error("property '{property}' is required and cannot be absent")]
    NullArgument { property: &'static str },

    /// The argument is not acceptable for this operation.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// `data()` found no entry for the key.
    #[error("no data stored under key {key}")]
    MissingData { key: &'static str },

    /// The operation needs context that is not present.
    #[error("illegal state: {message}")]
    IllegalState { message: String },

    /// The operation would leave a node with two owners.
    #[error("invalid state: {message}")]
    InvalidState { message: String },

    /// The handle refers to an arena slot that has been freed.
    #[error("stale handle {handle}")]
    StaleNode { handle: String },
}

/// Result alias used throughout jast.
pub type AstResult<T> = Result<T, AstError>;

// ============================================================================
// Error Kind Mapping
// ============================================================================

impl From<&AstError> for ErrorKind {
    fn from(err: &AstError) -> Self {
        match err {
            AstError::NullArgument { .. } => ErrorKind::NullArgument,
            AstError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            AstError::MissingData { .. } => ErrorKind::MissingData,
            AstError::IllegalState { .. } => ErrorKind::IllegalState,
            AstError::StaleNode { .. } => ErrorKind::IllegalState,
            AstError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }
}

impl From<AstError> for ErrorKind {
    fn from(err: AstError) -> Self {
        ErrorKind::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl AstError {
    /// Create a null argument error for a required property.
    pub fn null_argument(property: &'static str) -> Self {
        AstError::NullArgument { property }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        AstError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a missing data error for the given key name.
    pub fn missing_data(key: &'static str) -> Self {
        AstError::MissingData { key }
    }

    /// Create an illegal state error.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        AstError::IllegalState {
            message: message.into(),
        }
    }

    /// Create an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AstError::InvalidState {
            message: message.into(),
        }
    }

    /// Create a stale handle error.
    pub fn stale(handle: impl fmt::Display) -> Self {
        AstError::StaleNode {
            handle: handle.to_string(),
        }
    }

    /// Get the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
