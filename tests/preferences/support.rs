//! Stub collaborators shared by the preference tests.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use prefkit::i18n::{
    FixedLocaleProvider, LanguageTag, LocaleError, LocaleProvider, LocalizationBridge, Localizer,
};
use prefkit::prefs::{PreferenceOptions, PreferenceStore};
use prefkit::storage::{BackendFuture, KeyValueStore, StorageBackend, StorageError};

/// Bridge over the bundled catalogs that remembers every activation attempt.
#[derive(Default)]
pub struct RecordingBridge {
    inner: Localizer,
    attempts: Mutex<Vec<String>>,
}

impl RecordingBridge {
    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().expect("attempts lock").clone()
    }

    pub fn active(&self) -> String {
        self.inner.active_language()
    }
}

impl LocalizationBridge for RecordingBridge {
    fn set_active_language<'a>(
        &'a self,
        tag: &'a LanguageTag,
    ) -> BoxFuture<'a, Result<(), LocaleError>> {
        self.attempts
            .lock()
            .expect("attempts lock")
            .push(tag.to_string());
        self.inner.set_active_language(tag)
    }
}

/// Locale provider that blows up when asked.
pub struct PanickingLocale;

impl LocaleProvider for PanickingLocale {
    fn preferred_locale(&self) -> Option<String> {
        panic!("locale service crashed");
    }
}

/// Backend whose initialization fails.
pub struct FailingBackend;

/// Backend that opens fine but errors on every operation.
pub struct ErroringBackend;

/// Backend whose initialization never completes.
pub struct StalledBackend;

macro_rules! unreachable_ops {
    () => {
        fn get<'a>(&'a self, _key: &'a str) -> BackendFuture<'a, Option<String>> {
            Box::pin(async { Err(StorageError::NotInitialized) })
        }

        fn set<'a>(&'a self, _key: &'a str, _value: &'a str) -> BackendFuture<'a, ()> {
            Box::pin(async { Err(StorageError::NotInitialized) })
        }

        fn delete<'a>(&'a self, _key: &'a str) -> BackendFuture<'a, ()> {
            Box::pin(async { Err(StorageError::NotInitialized) })
        }
    };
}

impl StorageBackend for FailingBackend {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(async { Err(StorageError::Backend("secure storage unavailable".into())) })
    }

    unreachable_ops!();
}

impl StorageBackend for ErroringBackend {
    fn name(&self) -> &'static str {
        "erroring"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn get<'a>(&'a self, _key: &'a str) -> BackendFuture<'a, Option<String>> {
        Box::pin(async { Err(StorageError::Io(std::io::Error::other("read failed"))) })
    }

    fn set<'a>(&'a self, _key: &'a str, _value: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async { Err(StorageError::Io(std::io::Error::other("write failed"))) })
    }

    fn delete<'a>(&'a self, _key: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(async { Err(StorageError::Io(std::io::Error::other("delete failed"))) })
    }
}

impl StorageBackend for StalledBackend {
    fn name(&self) -> &'static str {
        "stalled"
    }

    fn init(&self) -> BackendFuture<'_, ()> {
        Box::pin(futures::future::pending())
    }

    unreachable_ops!();
}

/// Collaborators of one spawned preference store.
pub struct Harness {
    pub store: Arc<KeyValueStore>,
    pub bridge: Arc<RecordingBridge>,
    pub prefs: PreferenceStore,
}

/// What: Spawn a preference store over `store`.
///
/// Inputs:
/// - `store`: Storage, possibly pre-seeded
/// - `locale`: Answer of the locale provider; `None` means unknown
pub fn spawn_with(store: Arc<KeyValueStore>, locale: Option<&str>) -> Harness {
    let provider: Arc<dyn LocaleProvider> = match locale {
        Some(l) => Arc::new(FixedLocaleProvider::new(l)),
        None => Arc::new(FixedLocaleProvider::unknown()),
    };
    spawn_custom(store, provider, PreferenceOptions::default())
}

pub fn spawn_custom(
    store: Arc<KeyValueStore>,
    locale: Arc<dyn LocaleProvider>,
    options: PreferenceOptions,
) -> Harness {
    let bridge = Arc::new(RecordingBridge::default());
    let prefs = PreferenceStore::spawn(Arc::clone(&store), bridge.clone(), locale, options);
    Harness {
        store,
        bridge,
        prefs,
    }
}

/// Fresh in-memory store.
pub fn memory() -> Arc<KeyValueStore> {
    Arc::new(KeyValueStore::in_memory())
}
