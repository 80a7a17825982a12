//! Typed key-value store over a persistence backend.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;

use super::backend::{BackendKind, StorageBackend};
use super::error::StorageResult;
use super::keys::Namespace;
use super::local::LocalStorageBackend;
use super::memory::MemoryBackend;
use super::secure::SecureFileBackend;
use crate::platform::Platform;

/// Outcome of the one-time backend initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Availability {
    /// Backend initialized; operations reach storage.
    Persistent,
    /// Backend failed to initialize; reads are empty and writes are dropped.
    Degraded,
}

/// What: Best-effort typed persistence with default-value fallback.
///
/// Details:
/// - Strings are stored as-is, numbers as decimal text, booleans as `"1"`/`"0"`
///   and objects as JSON text.
/// - Backend errors never reach the caller: they are logged and the operation
///   behaves as if the key were absent or the write never happened.
/// - The backend is chosen once at construction and never swapped.
pub struct KeyValueStore {
    backend: Arc<dyn StorageBackend>,
    availability: OnceCell<Availability>,
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("backend", &self.backend.name())
            .field("availability", &self.availability.get())
            .finish()
    }
}

impl KeyValueStore {
    /// Wraps an already-constructed backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            availability: OnceCell::new(),
        }
    }

    /// What: Build the store for a backend kind.
    ///
    /// Inputs:
    /// - `kind`: Backend to construct
    /// - `root`: Base data directory (ignored by the memory backend)
    /// - `namespace`: Storage instance to open
    ///
    /// Output:
    /// - Store owning the new backend
    #[must_use]
    pub fn with_kind(kind: BackendKind, root: &Path, namespace: Namespace) -> Self {
        let backend: Arc<dyn StorageBackend> = match kind {
            BackendKind::Secure => Arc::new(SecureFileBackend::new(root, namespace.as_str())),
            BackendKind::LocalStorage => {
                Arc::new(LocalStorageBackend::new(root, namespace.as_str()))
            }
            BackendKind::Memory => Arc::new(MemoryBackend::new()),
        };
        Self::new(backend)
    }

    /// What: Build the store the given platform uses.
    ///
    /// Details:
    /// - Web gets the local-storage backend, every native target the secure backend
    #[must_use]
    pub fn for_platform(platform: Platform, root: &Path, namespace: Namespace) -> Self {
        Self::with_kind(platform.backend_kind(), root, namespace)
    }

    /// Store backed by a fresh in-memory map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Name of the selected backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// What: Initialize the backend exactly once.
    ///
    /// Details:
    /// - Concurrent and repeated calls share one initialization
    /// - A failing backend switches the store into degraded mode instead of
    ///   returning an error
    pub async fn init(&self) {
        self.availability
            .get_or_init(|| async {
                match self.backend.init().await {
                    Ok(()) => {
                        tracing::debug!(backend = self.backend.name(), "storage initialized");
                        Availability::Persistent
                    }
                    Err(e) => {
                        tracing::warn!(
                            backend = self.backend.name(),
                            error = %e,
                            "storage unavailable; continuing without persistence"
                        );
                        Availability::Degraded
                    }
                }
            })
            .await;
    }

    /// What: Initialize the backend, giving up after `limit`.
    ///
    /// Inputs:
    /// - `limit`: Upper bound; `None` waits as long as the backend takes
    ///
    /// Details:
    /// - On expiry the store is switched into degraded mode, so later calls do
    ///   not retry the stalled initialization
    pub async fn init_within(&self, limit: Option<Duration>) {
        let Some(limit) = limit else {
            self.init().await;
            return;
        };
        if tokio::time::timeout(limit, self.init()).await.is_err() {
            self.mark_unavailable();
        }
    }

    /// What: Switch into degraded mode unless initialization already finished.
    ///
    /// Details:
    /// - No effect on a store whose backend initialized successfully
    pub fn mark_unavailable(&self) {
        if self.availability.set(Availability::Degraded).is_ok() {
            tracing::warn!(
                backend = self.backend.name(),
                "storage initialization abandoned; continuing without persistence"
            );
        }
    }

    /// Whether the backend initialized successfully (initializes it if needed).
    pub async fn is_persistent(&self) -> bool {
        self.init().await;
        self.availability.get() == Some(&Availability::Persistent)
    }

    async fn ready_backend(&self) -> Option<&dyn StorageBackend> {
        self.init().await;
        match self.availability.get() {
            Some(Availability::Persistent) => Some(self.backend.as_ref()),
            _ => None,
        }
    }

    /// Log a backend failure and turn it into `None`.
    fn recover<T>(&self, op: &'static str, key: &str, result: StorageResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(
                    backend = self.backend.name(),
                    op,
                    key,
                    error = %e,
                    "storage operation failed"
                );
                None
            }
        }
    }

    /// Persisted string under `key`, if any.
    pub async fn get_string(&self, key: impl AsRef<str>) -> Option<String> {
        let key = key.as_ref();
        let backend = self.ready_backend().await?;
        let result = backend.get(key).await;
        self.recover("get", key, result).flatten()
    }

    /// Persisted string under `key`, or `default` when absent.
    pub async fn get_string_or(&self, key: impl AsRef<str>, default: &str) -> String {
        self.get_string(key)
            .await
            .unwrap_or_else(|| default.to_string())
    }

    /// Persists `value` under `key`, overwriting silently.
    pub async fn set_string(&self, key: impl AsRef<str>, value: &str) {
        let key = key.as_ref();
        let Some(backend) = self.ready_backend().await else {
            return;
        };
        let result = backend.set(key, value).await;
        self.recover("set", key, result);
    }

    /// What: Persisted number under `key`.
    ///
    /// Output:
    /// - `None` when absent
    /// - `Some(NaN)` when the stored text is not a decimal number
    ///
    /// Details:
    /// - Non-numeric text is deliberately not replaced by a default
    pub async fn get_number(&self, key: impl AsRef<str>) -> Option<f64> {
        self.get_string(key).await.map(|raw| decode_number(&raw))
    }

    /// Persisted number under `key`, or `default` when absent.
    pub async fn get_number_or(&self, key: impl AsRef<str>, default: f64) -> f64 {
        self.get_number(key).await.unwrap_or(default)
    }

    /// Persists `value` as decimal text.
    pub async fn set_number(&self, key: impl AsRef<str>, value: f64) {
        self.set_string(key, &value.to_string()).await;
    }

    /// Persisted boolean under `key`; anything other than `"1"` reads as `false`.
    pub async fn get_boolean(&self, key: impl AsRef<str>) -> Option<bool> {
        self.get_string(key).await.map(|raw| raw == "1")
    }

    /// Persisted boolean under `key`, or `default` when absent.
    pub async fn get_boolean_or(&self, key: impl AsRef<str>, default: bool) -> bool {
        self.get_boolean(key).await.unwrap_or(default)
    }

    /// Persists `value` as `"1"` or `"0"`.
    pub async fn set_boolean(&self, key: impl AsRef<str>, value: bool) {
        self.set_string(key, if value { "1" } else { "0" }).await;
    }

    /// What: Persisted JSON object under `key`.
    ///
    /// Output:
    /// - `None` when absent, empty, or not valid JSON for `T`
    ///
    /// Details:
    /// - Parse failures are logged and never propagated
    pub async fn get_object<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Option<T> {
        let key = key.as_ref();
        let raw = self.get_string(key).await?;
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored object is not valid JSON; using default");
                None
            }
        }
    }

    /// Persisted JSON object under `key`, or `default` when absent or malformed.
    pub async fn get_object_or<T: DeserializeOwned>(&self, key: impl AsRef<str>, default: T) -> T {
        self.get_object(key).await.unwrap_or(default)
    }

    /// Persists `value` as JSON text; serialization failures are logged and dropped.
    pub async fn set_object<T: Serialize + ?Sized>(&self, key: impl AsRef<str>, value: &T) {
        let key = key.as_ref();
        match serde_json::to_string(value) {
            Ok(json) => self.set_string(key, &json).await,
            Err(e) => tracing::warn!(key, error = %e, "failed to serialize object"),
        }
    }

    /// Whether `key` holds a value.
    pub async fn contains(&self, key: impl AsRef<str>) -> bool {
        let key = key.as_ref();
        let Some(backend) = self.ready_backend().await else {
            return false;
        };
        let result = backend.contains(key).await;
        self.recover("contains", key, result).unwrap_or(false)
    }

    /// Removes `key`; absent keys are a no-op.
    pub async fn delete(&self, key: impl AsRef<str>) {
        let key = key.as_ref();
        let Some(backend) = self.ready_backend().await else {
            return;
        };
        let result = backend.delete(key).await;
        self.recover("delete", key, result);
    }

    /// What: Every stored key.
    ///
    /// Output:
    /// - Keys in backend order; empty on backends that cannot enumerate
    pub async fn get_all_keys(&self) -> Vec<String> {
        let Some(backend) = self.ready_backend().await else {
            return Vec::new();
        };
        if !backend.supports_enumeration() {
            tracing::debug!(backend = backend.name(), "key enumeration not supported");
            return Vec::new();
        }
        let result = backend.keys().await;
        self.recover("keys", "*", result).unwrap_or_default()
    }

    /// Removes every key; does nothing on backends that cannot enumerate.
    pub async fn clear_all(&self) {
        let Some(backend) = self.ready_backend().await else {
            return;
        };
        if !backend.supports_enumeration() {
            tracing::debug!(backend = backend.name(), "clear not supported");
            return;
        }
        let result = backend.clear().await;
        self.recover("clear", "*", result);
    }
}

/// What: Decode stored number text.
///
/// Details:
/// - Surrounding whitespace is ignored and blank text reads as `0`
/// - Infinities are spelled `Infinity`, `+Infinity` or `-Infinity`, or come
///   from overflow (`1e999`); `inf`, `nan` and anything else that is not a
///   decimal float yield `NaN`
fn decode_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // rejects the `inf`/`nan` spellings of the float grammar
        _ if trimmed
            .chars()
            .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) =>
        {
            f64::NAN
        }
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}
