//! Registry of storage keys and namespaces shared by every consumer.
//!
//! Keeping the full set in one enum prevents two features from reusing the
//! same key for different data.

use std::fmt;
use std::str::FromStr;

/// Every key the application is allowed to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Auth token written by the auth collaborator.
    UserToken,
    /// Cached user profile JSON.
    UserProfile,
    /// Free-form user preferences JSON.
    UserPreferences,
    /// Generic theme slot (unused by the preference store).
    Theme,
    /// Generic language slot (unused by the preference store).
    Language,
    /// Persisted theme of the preference store.
    AppTheme,
    /// Persisted language of the preference store.
    AppLanguage,
    /// Language key written by older releases; migrated to `AppLanguage`.
    LegacyLanguage,
    /// First-launch marker.
    FirstLaunch,
    /// API response cache.
    ApiCache,
    /// Timestamp of the last sync.
    LastSync,
}

impl StorageKey {
    /// All registered keys.
    pub const ALL: [Self; 11] = [
        Self::UserToken,
        Self::UserProfile,
        Self::UserPreferences,
        Self::Theme,
        Self::Language,
        Self::AppTheme,
        Self::AppLanguage,
        Self::LegacyLanguage,
        Self::FirstLaunch,
        Self::ApiCache,
        Self::LastSync,
    ];

    /// What: Physical key string written to the backend.
    ///
    /// Output:
    /// - Stable string identifier; changing one breaks existing installs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserToken => "user_token",
            Self::UserProfile => "user_profile",
            Self::UserPreferences => "user_preferences",
            Self::Theme => "theme",
            Self::Language => "language",
            Self::AppTheme => "app_theme",
            Self::AppLanguage => "app_language",
            Self::LegacyLanguage => "app-language",
            Self::FirstLaunch => "first_launch",
            Self::ApiCache => "api_cache",
            Self::LastSync => "last_sync",
        }
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Separate storage instances. Keys in different namespaces never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// General-purpose instance.
    #[default]
    Default,
    /// User/auth data.
    User,
    /// App settings (theme, language).
    Settings,
    /// Disposable caches.
    Cache,
}

impl Namespace {
    /// Directory or file stem used by on-disk backends.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::User => "user",
            Self::Settings => "settings",
            Self::Cache => "cache",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "user" => Ok(Self::User),
            "settings" => Ok(Self::Settings),
            "cache" => Ok(Self::Cache),
            other => Err(format!("unknown storage namespace '{other}'")),
        }
    }
}
