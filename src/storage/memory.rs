//! In-memory backend for tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::backend::{BackendFuture, StorageBackend};
use super::error::{StorageError, StorageResult};

/// Enumerable backend keeping everything in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Creates a backend pre-populated with `entries`.
    ///
    /// Inputs:
    /// - `entries`: Key/value pairs to seed
    ///
    /// Output:
    /// - Backend holding exactly those pairs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    fn with_map<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> StorageResult<T> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| StorageError::Backend("memory backend mutex poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn get<'a>(&'a self, key: &'a str) -> BackendFuture<'a, Option<String>> {
        Box::pin(async move { self.with_map(|m| m.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            self.with_map(|m| {
                m.insert(key.to_string(), value.to_string());
            })
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            self.with_map(|m| {
                m.remove(key);
            })
        })
    }

    fn supports_enumeration(&self) -> bool {
        true
    }

    fn keys(&self) -> BackendFuture<'_, Vec<String>> {
        Box::pin(async move { self.with_map(|m| m.keys().cloned().collect()) })
    }

    fn clear(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move { self.with_map(BTreeMap::clear) })
    }
}
