//! Persistence backend interface.
//!
//! Backends store raw strings under string keys. Type coercion, default values
//! and error swallowing live one layer up in [`crate::storage::KeyValueStore`].

use futures::future::BoxFuture;

use super::error::{StorageError, StorageResult};

/// Boxed future returned by every backend operation.
pub type BackendFuture<'a, T> = BoxFuture<'a, StorageResult<T>>;

/// Which concrete backend a platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Per-key files with owner-only permissions (native targets).
    Secure,
    /// Single JSON document, enumerable (web target).
    LocalStorage,
    /// Process-local map, nothing survives a restart.
    Memory,
}

/// What: A platform-provided key-value persistence backend.
///
/// Details:
/// - `init` is called once by the owning store before any other operation.
/// - `delete` of an absent key must succeed.
/// - Enumeration (`keys`, `clear`) is optional; backends that cannot
///   enumerate keep the defaults, which report [`StorageError::Unsupported`].
pub trait StorageBackend: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Acquires the underlying platform handle.
    fn init(&self) -> BackendFuture<'_, ()>;

    /// Reads the raw value stored under `key`.
    fn get<'a>(&'a self, key: &'a str) -> BackendFuture<'a, Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BackendFuture<'a, ()>;

    /// Removes `key`.
    fn delete<'a>(&'a self, key: &'a str) -> BackendFuture<'a, ()>;

    /// Whether `key` holds a value.
    fn contains<'a>(&'a self, key: &'a str) -> BackendFuture<'a, bool> {
        Box::pin(async move { Ok(self.get(key).await?.is_some()) })
    }

    /// Whether `keys` and `clear` are implemented.
    fn supports_enumeration(&self) -> bool {
        false
    }

    /// Lists every stored key.
    fn keys(&self) -> BackendFuture<'_, Vec<String>> {
        Box::pin(async { Err(StorageError::Unsupported("keys")) })
    }

    /// Removes every stored key.
    fn clear(&self) -> BackendFuture<'_, ()> {
        Box::pin(async { Err(StorageError::Unsupported("clear")) })
    }
}
