//! Startup resolution of theme and language.

use std::sync::Arc;

use prefkit::prefs::{Phase, Theme};
use prefkit::storage::{KeyValueStore, MemoryBackend, StorageKey};

use crate::support::{memory, spawn_with};

fn seeded(entries: &[(&str, &str)]) -> Arc<KeyValueStore> {
    let backend = MemoryBackend::with_entries(entries.iter().copied());
    Arc::new(KeyValueStore::new(Arc::new(backend)))
}

/// What: First launch derives the language from the device and defaults the theme
///
/// - Input: empty storage, device locale `ru-RU`
/// - Output: `{dark, ru}` ready, bridge activated once, nothing persisted
#[tokio::test]
async fn fresh_install_uses_device_locale() {
    let h = spawn_with(memory(), Some("ru-RU"));
    h.prefs.initialize_app().await;

    let state = h.prefs.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.theme, Theme::Dark);
    assert_eq!(state.language.as_str(), "ru");
    assert_eq!(h.bridge.attempts(), vec!["ru"]);
    assert_eq!(h.bridge.active(), "ru");
    assert_eq!(h.store.get_string(StorageKey::AppLanguage).await, None);
}

#[tokio::test]
async fn unsupported_or_unknown_device_locale_means_english() {
    for locale in [Some("fr-FR"), Some("C"), None] {
        let h = spawn_with(memory(), locale);
        h.prefs.initialize_app().await;
        assert_eq!(h.prefs.language().as_str(), "en", "{locale:?}");
    }
}

#[tokio::test]
async fn persisted_values_win_over_device() {
    let store = seeded(&[("app_theme", "light"), ("app_language", "ru")]);
    let h = spawn_with(store, Some("en-US"));
    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.theme(), Theme::Light);
    assert_eq!(h.prefs.language().as_str(), "ru");
}

#[tokio::test]
async fn invalid_persisted_theme_falls_back_to_dark() {
    let store = seeded(&[("app_theme", "purple")]);
    let h = spawn_with(store, None);
    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.theme(), Theme::Dark);
    assert!(h.prefs.is_ready());
}

#[tokio::test]
async fn empty_persisted_language_is_treated_as_absent() {
    let store = seeded(&[("app_language", "")]);
    let h = spawn_with(store, Some("ru"));
    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.language().as_str(), "ru");
}

#[tokio::test]
async fn persisted_unsupported_language_is_kept() {
    let store = seeded(&[("app_language", "fr")]);
    let h = spawn_with(store, Some("ru"));
    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.language().as_str(), "fr");
    assert_eq!(h.bridge.attempts(), vec!["fr"]);
    // bridge rejected it, previous catalog stays active
    assert_eq!(h.bridge.active(), "en");
}

/// What: Values under the legacy key move to `app_language`
///
/// - Input: only `app-language = ru` persisted
/// - Output: language `ru`, stored under the new key, legacy key removed
#[tokio::test]
async fn legacy_language_key_is_migrated() {
    let store = seeded(&[("app-language", "ru")]);
    let h = spawn_with(Arc::clone(&store), Some("en"));
    h.prefs.initialize_app().await;

    assert_eq!(h.prefs.language().as_str(), "ru");
    assert_eq!(
        store.get_string(StorageKey::AppLanguage).await.as_deref(),
        Some("ru")
    );
    assert!(!store.contains(StorageKey::LegacyLanguage).await);
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let h = spawn_with(memory(), Some("ru"));
    h.prefs.initialize_app().await;
    h.prefs.set_theme(Theme::Light).await;

    h.prefs.initialize_app().await;
    assert_eq!(h.prefs.theme(), Theme::Light);
    assert_eq!(h.bridge.attempts(), vec!["ru"]);
}

#[tokio::test]
async fn concurrent_initialization_runs_once() {
    let h = spawn_with(memory(), Some("ru"));
    let (a, b) = (h.prefs.clone(), h.prefs.clone());
    tokio::join!(a.initialize_app(), b.initialize_app());
    assert!(h.prefs.is_ready());
    assert_eq!(h.bridge.attempts(), vec!["ru"]);
}

/// What: The gate opens exactly when initialization finished
///
/// - Input: gate taken before initialization
/// - Output: closed, then open once `wait_ready` returns
#[tokio::test]
async fn gate_opens_after_initialization() {
    let h = spawn_with(memory(), None);
    let gate = h.prefs.gate();
    assert!(!gate.is_ready());

    let prefs = h.prefs.clone();
    let init = tokio::spawn(async move { prefs.initialize_app().await });
    gate.wait_ready().await;
    assert!(gate.is_ready());
    assert!(h.prefs.is_ready());
    init.await.expect("init task");

    // already ready: returns immediately
    gate.wait_ready().await;
}
