//! Values written through each backend read back unchanged.

use prefkit::storage::{BackendKind, KeyValueStore, Namespace, StorageKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    age: u32,
    tags: Vec<String>,
}

const KINDS: [BackendKind; 3] = [
    BackendKind::Secure,
    BackendKind::LocalStorage,
    BackendKind::Memory,
];

/// What: Typed setters and getters agree on every backend
///
/// - Input: string, number, boolean and object values
/// - Output: identical values read back; delete removes them
#[tokio::test]
async fn typed_values_round_trip_on_every_backend() {
    for kind in KINDS {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::with_kind(kind, tmp.path(), Namespace::Settings);

        store.set_string(StorageKey::AppTheme, "light").await;
        assert_eq!(
            store.get_string(StorageKey::AppTheme).await.as_deref(),
            Some("light"),
            "{kind:?}"
        );

        store.set_number(StorageKey::LastSync, 1_700_000_000.5).await;
        assert_eq!(
            store.get_number(StorageKey::LastSync).await,
            Some(1_700_000_000.5),
            "{kind:?}"
        );

        store.set_boolean(StorageKey::FirstLaunch, true).await;
        assert_eq!(store.get_boolean(StorageKey::FirstLaunch).await, Some(true));
        store.set_boolean(StorageKey::FirstLaunch, false).await;
        assert_eq!(store.get_boolean(StorageKey::FirstLaunch).await, Some(false));

        let profile = Profile {
            name: "Ада".into(),
            age: 36,
            tags: vec!["admin".into()],
        };
        store.set_object(StorageKey::UserProfile, &profile).await;
        assert_eq!(
            store.get_object::<Profile>(StorageKey::UserProfile).await,
            Some(profile),
            "{kind:?}"
        );

        assert!(store.contains(StorageKey::UserProfile).await);
        store.delete(StorageKey::UserProfile).await;
        assert!(!store.contains(StorageKey::UserProfile).await);
        assert_eq!(store.get_object::<Profile>(StorageKey::UserProfile).await, None);
        // deleting twice is harmless
        store.delete(StorageKey::UserProfile).await;
    }
}

#[tokio::test]
async fn booleans_and_numbers_use_text_encoding() {
    let store = KeyValueStore::in_memory();
    store.set_boolean(StorageKey::FirstLaunch, true).await;
    store.set_number(StorageKey::LastSync, 42.0).await;
    assert_eq!(
        store.get_string(StorageKey::FirstLaunch).await.as_deref(),
        Some("1")
    );
    assert_eq!(
        store.get_string(StorageKey::LastSync).await.as_deref(),
        Some("42")
    );
}

#[tokio::test]
async fn enumeration_depends_on_backend() {
    for kind in KINDS {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = KeyValueStore::with_kind(kind, tmp.path(), Namespace::Cache);
        store.set_string(StorageKey::ApiCache, "{}").await;
        store.set_string(StorageKey::Theme, "dark").await;

        let keys = store.get_all_keys().await;
        match kind {
            BackendKind::Secure => assert!(keys.is_empty()),
            _ => assert_eq!(keys, vec!["api_cache".to_string(), "theme".to_string()]),
        }

        store.clear_all().await;
        match kind {
            // not enumerable: clear is a no-op
            BackendKind::Secure => assert!(store.contains(StorageKey::Theme).await),
            _ => assert!(!store.contains(StorageKey::Theme).await),
        }
    }
}
