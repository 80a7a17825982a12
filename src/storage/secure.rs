//! Secure per-key backend used on native targets.
//!
//! Mirrors the behaviour of a platform keychain: every key is its own item,
//! items are only readable by the owning user, and the store cannot be
//! enumerated.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use super::atomic::write_atomic;
use super::backend::{BackendFuture, StorageBackend};
use super::error::{StorageError, StorageResult};

/// Extension of value files inside the namespace directory.
const VALUE_EXT: &str = ".val";

/// Non-enumerable backend storing one owner-only file per key.
#[derive(Debug)]
pub struct SecureFileBackend {
    dir: PathBuf,
    ready: AtomicBool,
}

impl SecureFileBackend {
    /// What: Create a backend rooted at `root/namespace`.
    ///
    /// Inputs:
    /// - `root`: Base data directory
    /// - `namespace`: Subdirectory holding this instance's items
    ///
    /// Output:
    /// - Backend; nothing touches disk until `init`
    #[must_use]
    pub fn new(root: &Path, namespace: &str) -> Self {
        Self {
            dir: root.join(namespace),
            ready: AtomicBool::new(false),
        }
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// What: Map a key to its value file, enforcing secure-store key rules.
    ///
    /// # Errors
    /// - `NotInitialized` before `init` completed
    /// - `InvalidKey` when the key is empty or contains characters other than
    ///   ASCII alphanumerics, `.`, `-` and `_`
    fn item_path(&self, key: &str) -> StorageResult<PathBuf> {
        if !self.ready.load(Ordering::Acquire) {
            return Err(StorageError::NotInitialized);
        }
        if !is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}{VALUE_EXT}")))
    }
}

/// Whether `key` is accepted by the secure store.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}

impl StorageBackend for SecureFileBackend {
    fn name(&self) -> &'static str {
        "secure"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&self.dir).await?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                tokio::fs::set_permissions(&self.dir, std::fs::Permissions::from_mode(0o700))
                    .await?;
            }
            self.ready.store(true, Ordering::Release);
            tracing::debug!(dir = %self.dir.display(), "secure storage ready");
            Ok(())
        })
    }

    fn get<'a>(&'a self, key: &'a str) -> BackendFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.item_path(key)?;
            match tokio::fs::read_to_string(&path).await {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let path = self.item_path(key)?;
            write_atomic(&path, value.as_bytes()).await?;
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async move {
            let path = self.item_path(key)?;
            match tokio::fs::remove_file(&path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        })
    }

    fn contains<'a>(&'a self, key: &'a str) -> BackendFuture<'a, bool> {
        Box::pin(async move {
            let path = self.item_path(key)?;
            Ok(tokio::fs::try_exists(&path).await?)
        })
    }
}
