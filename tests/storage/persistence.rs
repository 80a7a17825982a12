//! On-disk backends keep values across store instances.

use prefkit::platform::Platform;
use prefkit::storage::{KeyValueStore, Namespace, StorageKey};

#[tokio::test]
async fn values_survive_a_restart_on_each_platform() {
    for platform in [Platform::Desktop, Platform::Web] {
        let tmp = tempfile::tempdir().expect("tempdir");
        {
            let store = KeyValueStore::for_platform(platform, tmp.path(), Namespace::Settings);
            store.set_string(StorageKey::AppLanguage, "ru").await;
            store.set_boolean(StorageKey::FirstLaunch, false).await;
        }
        let reopened = KeyValueStore::for_platform(platform, tmp.path(), Namespace::Settings);
        assert_eq!(
            reopened.get_string(StorageKey::AppLanguage).await.as_deref(),
            Some("ru"),
            "{platform}"
        );
        assert_eq!(reopened.get_boolean(StorageKey::FirstLaunch).await, Some(false));
    }
}

#[tokio::test]
async fn namespaces_are_isolated() {
    for platform in [Platform::Android, Platform::Web] {
        let tmp = tempfile::tempdir().expect("tempdir");
        let user = KeyValueStore::for_platform(platform, tmp.path(), Namespace::User);
        let cache = KeyValueStore::for_platform(platform, tmp.path(), Namespace::Cache);
        user.set_string(StorageKey::UserToken, "secret").await;
        assert_eq!(cache.get_string(StorageKey::UserToken).await, None, "{platform}");
        assert_eq!(
            user.get_string(StorageKey::UserToken).await.as_deref(),
            Some("secret")
        );
    }
}

#[tokio::test]
async fn web_store_recovers_from_corrupt_document() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("settings.json"), "][").expect("write corrupt file");

    let store = KeyValueStore::for_platform(Platform::Web, tmp.path(), Namespace::Settings);
    assert!(store.is_persistent().await);
    assert_eq!(store.get_string(StorageKey::AppTheme).await, None);
    store.set_string(StorageKey::AppTheme, "light").await;

    let reopened = KeyValueStore::for_platform(Platform::Web, tmp.path(), Namespace::Settings);
    assert_eq!(
        reopened.get_string(StorageKey::AppTheme).await.as_deref(),
        Some("light")
    );
}
