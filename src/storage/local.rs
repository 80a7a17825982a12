//! Local-storage style backend used on the web target.
//!
//! The whole namespace lives in one JSON object file that is loaded at `init`
//! and written through on every mutation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, OnceCell};

use super::atomic::write_atomic;
use super::backend::{BackendFuture, StorageBackend};
use super::error::{StorageError, StorageResult};

/// Enumerable backend persisting a namespace as a single JSON document.
#[derive(Debug)]
pub struct LocalStorageBackend {
    file: PathBuf,
    entries: OnceCell<Mutex<BTreeMap<String, String>>>,
}

impl LocalStorageBackend {
    /// What: Create a backend persisting to `root/{namespace}.json`.
    ///
    /// Inputs:
    /// - `root`: Base data directory
    /// - `namespace`: File stem for this instance
    ///
    /// Output:
    /// - Backend; the file is read on `init`
    #[must_use]
    pub fn new(root: &Path, namespace: &str) -> Self {
        Self {
            file: root.join(format!("{namespace}.json")),
            entries: OnceCell::new(),
        }
    }

    /// Path of the backing JSON file.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    fn entries(&self) -> StorageResult<&Mutex<BTreeMap<String, String>>> {
        self.entries.get().ok_or(StorageError::NotInitialized)
    }

    /// What: Read the backing file into a map.
    ///
    /// Output:
    /// - Stored map, or an empty map when the file is missing or empty
    ///
    /// Details:
    /// - A file that is not a JSON object of strings is moved aside to
    ///   `{file}.corrupt` and treated as empty
    async fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let raw = match tokio::fs::read_to_string(&self.file).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                let mut backup = self.file.clone().into_os_string();
                backup.push(".corrupt");
                tracing::warn!(
                    file = %self.file.display(),
                    error = %e,
                    "local storage file is corrupt; starting empty"
                );
                tokio::fs::rename(&self.file, PathBuf::from(backup)).await?;
                Ok(BTreeMap::new())
            }
        }
    }

    /// Persist `map`; the caller holds the entries lock so writes stay ordered.
    async fn flush(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        let json = serde_json::to_vec(map)?;
        write_atomic(&self.file, &json).await?;
        Ok(())
    }
}

impl StorageBackend for LocalStorageBackend {
    fn name(&self) -> &'static str {
        "local-storage"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            self.entries
                .get_or_try_init(|| async {
                    if let Some(dir) = self.file.parent() {
                        tokio::fs::create_dir_all(dir).await?;
                    }
                    let map = self.load().await?;
                    tracing::debug!(
                        file = %self.file.display(),
                        entries = map.len(),
                        "local storage loaded"
                    );
                    Ok::<_, StorageError>(Mutex::new(map))
                })
                .await?;
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BackendFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.entries()?.lock().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let mut map = self.entries()?.lock().await;
            let previous = map.insert(key.to_string(), value.to_string());
            if let Err(e) = self.flush(&map).await {
                match previous {
                    Some(old) => map.insert(key.to_string(), old),
                    None => map.remove(key),
                };
                return Err(e);
            }
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let mut map = self.entries()?.lock().await;
            let Some(previous) = map.remove(key) else {
                return Ok(());
            };
            if let Err(e) = self.flush(&map).await {
                map.insert(key.to_string(), previous);
                return Err(e);
            }
            Ok(())
        })
    }

    fn supports_enumeration(&self) -> bool {
        true
    }

    fn keys(&self) -> BackendFuture<'_, Vec<String>> {
        Box::pin(async move { Ok(self.entries()?.lock().await.keys().cloned().collect()) })
    }

    fn clear(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            let mut map = self.entries()?.lock().await;
            let previous = std::mem::take(&mut *map);
            if let Err(e) = self.flush(&map).await {
                *map = previous;
                return Err(e);
            }
            Ok(())
        })
    }
}
