//! Initialization never leaves the app stuck, whatever the collaborators do.

use std::sync::Arc;
use std::time::Duration;

use prefkit::i18n::{FixedLocaleProvider, LanguageTag, LocalizationBridge};
use prefkit::prefs::{Phase, PreferenceOptions, PreferenceState, Theme};
use prefkit::storage::{KeyValueStore, MemoryBackend, StorageKey};

use crate::support::{
    ErroringBackend, FailingBackend, PanickingLocale, StalledBackend, spawn_custom, spawn_with,
};

fn bounded(ms: u64) -> PreferenceOptions {
    PreferenceOptions {
        init_timeout: Some(Duration::from_millis(ms)),
    }
}

/// What: A backend that cannot open still yields a usable app
///
/// - Input: backend whose `init` errors, device locale `ru`
/// - Output: ready with device-derived values; setters update memory only
#[tokio::test]
async fn failing_backend_still_reaches_ready() {
    let store = Arc::new(KeyValueStore::new(Arc::new(FailingBackend)));
    let h = spawn_with(Arc::clone(&store), Some("ru"));
    h.prefs.initialize_app().await;

    assert!(h.prefs.is_ready());
    assert_eq!(h.prefs.theme(), Theme::Dark);
    assert_eq!(h.prefs.language().as_str(), "ru");
    assert!(!store.is_persistent().await);

    h.prefs.set_theme(Theme::Light).await;
    assert_eq!(h.prefs.theme(), Theme::Light);
}

#[tokio::test]
async fn panicking_locale_provider_falls_back_to_defaults() {
    let backend = MemoryBackend::with_entries([("app_theme", "light")]);
    let store = Arc::new(KeyValueStore::new(Arc::new(backend)));
    let h = spawn_custom(store, Arc::new(PanickingLocale), PreferenceOptions::default());
    h.prefs.initialize_app().await;

    // the whole load is discarded, including the theme it already read
    assert_eq!(h.prefs.state(), PreferenceState::ready_defaults());

    // the worker survived the panic
    h.prefs.set_language("ru").await;
    assert_eq!(h.prefs.language().as_str(), "ru");
}

#[tokio::test]
async fn stalled_backend_times_out_to_defaults() {
    let store = Arc::new(KeyValueStore::new(Arc::new(StalledBackend)));
    let h = spawn_custom(store, Arc::new(FixedLocaleProvider::new("ru")), bounded(50));

    tokio::time::timeout(Duration::from_secs(5), h.prefs.initialize_app())
        .await
        .expect("initialization bounded by init_timeout");
    let state = h.prefs.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.language.as_str(), "en");
}

/// What: After an init timeout, setters no longer wait on the stalled backend
///
/// - Input: stalled backend, 50ms `init_timeout`, `set_theme` after init
/// - Output: the write completes promptly and the theme becomes current
#[tokio::test]
async fn setters_complete_after_init_timeout() {
    let store = Arc::new(KeyValueStore::new(Arc::new(StalledBackend)));
    let h = spawn_custom(
        Arc::clone(&store),
        Arc::new(FixedLocaleProvider::unknown()),
        bounded(50),
    );
    h.prefs.initialize_app().await;
    assert!(!store.is_persistent().await);

    tokio::time::timeout(Duration::from_secs(2), h.prefs.set_theme(Theme::Light))
        .await
        .expect("set_theme not blocked by storage");
    assert_eq!(h.prefs.theme(), Theme::Light);
    tokio::time::timeout(Duration::from_secs(2), h.prefs.set_language("ru"))
        .await
        .expect("set_language not blocked by storage");
    assert_eq!(h.prefs.language().as_str(), "ru");
}

/// What: A setter queued ahead of init cannot hold the app in loading
///
/// - Input: stalled backend, 50ms `init_timeout`, `set_theme` sent before `initialize_app`
/// - Output: initialization still finishes and the gate opens
#[tokio::test]
async fn setter_ahead_of_init_does_not_block_readiness() {
    let store = Arc::new(KeyValueStore::new(Arc::new(StalledBackend)));
    let h = spawn_custom(store, Arc::new(FixedLocaleProvider::new("ru")), bounded(50));
    let gate = h.prefs.gate();

    drop(h.prefs.set_theme(Theme::Light));
    tokio::time::timeout(Duration::from_secs(2), h.prefs.initialize_app())
        .await
        .expect("initialization finished");
    assert!(gate.is_ready());
    assert_eq!(h.prefs.state().phase, Phase::Ready);
}

/// What: Storage that fails every call still yields device-derived preferences
///
/// - Input: backend that opens but errors on get/set/delete, device locale `ru`
/// - Output: `{dark, ru, Ready}`; setters update memory
#[tokio::test]
async fn erroring_backend_still_reaches_ready() {
    let store = Arc::new(KeyValueStore::new(Arc::new(ErroringBackend)));
    let h = spawn_with(Arc::clone(&store), Some("ru"));
    h.prefs.initialize_app().await;

    let state = h.prefs.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.language.as_str(), "ru");

    h.prefs.set_theme(Theme::Light).await;
    assert_eq!(h.prefs.theme(), Theme::Light);
    assert_eq!(store.get_string_or(StorageKey::AppTheme, "dark").await, "dark");

    let fresh = Arc::new(KeyValueStore::new(Arc::new(ErroringBackend)));
    let unknown = spawn_with(fresh, None);
    unknown.prefs.initialize_app().await;
    assert_eq!(unknown.prefs.language().as_str(), "en");
}

#[tokio::test]
async fn fallback_reactivates_english_in_bridge() {
    let store = Arc::new(KeyValueStore::in_memory());
    let h = spawn_custom(store, Arc::new(PanickingLocale), PreferenceOptions::default());
    h.bridge
        .set_active_language(&LanguageTag::new("ru"))
        .await
        .expect("ru is bundled");
    assert_eq!(h.bridge.active(), "ru");

    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.language().as_str(), "en");
    assert_eq!(h.bridge.active(), "en");
    assert_eq!(h.bridge.attempts(), vec!["ru", "en"]);
}
