//! Language tags and the supported-locale set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages that ship a translation catalog.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "ru"];

/// Language used whenever nothing better is known.
pub const DEFAULT_LANGUAGE: &str = "en";

/// What: Identifier selecting a translation set (`en`, `ru`, ...).
///
/// Details:
/// - Not validated on construction: a tag outside [`SUPPORTED_LANGUAGES`] can
///   be stored and persisted; only activation in the bridge may reject it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Wraps `tag` as-is.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// English.
    #[must_use]
    pub fn english() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }

    /// Tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a catalog exists for this tag.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_LANGUAGES.contains(&self.0.as_str())
    }

    /// What: Map a host locale onto the supported set.
    ///
    /// Inputs:
    /// - `locale`: Host locale such as `ru-RU`, `ru`, `pt_BR`
    ///
    /// Output:
    /// - The supported tag matching the locale's language subtag, else English
    ///
    /// Details:
    /// - Only the primary subtag is compared (`ru-RU` → `ru`)
    #[must_use]
    pub fn from_device_locale(locale: &str) -> Self {
        let primary = locale
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|&&supported| supported == primary)
            .map_or_else(Self::english, |&supported| Self::new(supported))
    }
}

impl Default for LanguageTag {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
