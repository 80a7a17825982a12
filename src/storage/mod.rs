//! Cross-platform key-value storage.
//!
//! # Overview
//!
//! - [`StorageBackend`]: raw string persistence provided per platform
//! - [`KeyValueStore`]: typed wrapper with default-value fallback that never
//!   surfaces backend errors to its callers
//! - [`StorageKey`] / [`Namespace`]: the closed registry of keys and instances
//!
//! # Backends
//!
//! - [`SecureFileBackend`]: native targets; one owner-only file per key, not
//!   enumerable
//! - [`LocalStorageBackend`]: web target; one JSON document per namespace,
//!   enumerable
//! - [`MemoryBackend`]: tests and ephemeral runs

mod atomic;
mod backend;
mod error;
mod keys;
mod kv;
mod local;
mod memory;
mod secure;

pub use backend::{BackendFuture, BackendKind, StorageBackend};
pub use error::{StorageError, StorageResult};
pub use keys::{Namespace, StorageKey};
pub use kv::KeyValueStore;
pub use local::LocalStorageBackend;
pub use memory::MemoryBackend;
pub use secure::SecureFileBackend;
