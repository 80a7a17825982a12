//! Error types raised by storage backends.

use thiserror::Error;

/// Result type for backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// What: Failure modes of a persistence backend.
///
/// Details:
/// - Never surfaced to UI callers: `KeyValueStore` logs these and degrades to
///   "key absent" / "write dropped".
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend file contents could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation issued before the backend finished `init`.
    #[error("storage backend not initialized")]
    NotInitialized,

    /// Key rejected by the backend's naming rules.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend does not implement the requested operation.
    #[error("operation '{0}' not supported by this backend")]
    Unsupported(&'static str),

    /// Backend-specific failure that fits no other variant.
    #[error("backend error: {0}")]
    Backend(String),
}
