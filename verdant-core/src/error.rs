//! Error types for Verdant operations.
//!
//! Every failure the data layer can hit is recovered locally; these types
//! exist so the recovery sites can log a precise cause before falling
//! back. Nothing here crosses the `ResilientSource` boundary.

use std::time::Duration;
use thiserror::Error;

/// Remote fetch errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, or any transport-level error.
    #[error("Network unavailable: {0}")]
    Network(String),

    /// The bounded network attempt did not complete in time.
    #[error("Request timed out after {after:?}")]
    Timeout { after: Duration },

    /// The server answered with a non-2xx status.
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    /// The payload decoded but failed the dataset's validation predicate,
    /// or did not decode at all.
    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: String },
}

/// Cache store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Top-level error for Verdant operations.
///
/// Configuration errors live next to the loader in `verdant-client`.
#[derive(Debug, Error)]
pub enum VerdantError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for Verdant operations.
pub type VerdantResult<T> = Result<T, VerdantError>;
