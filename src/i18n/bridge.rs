//! Localization bridge: activates the language chosen by the preference store.

use std::collections::HashMap;
use std::sync::RwLock;

use futures::future::BoxFuture;

use crate::i18n::LocaleError;
use crate::i18n::language::{DEFAULT_LANGUAGE, LanguageTag};
use crate::i18n::loader::load_bundled_catalogs;
use crate::i18n::translations::{TranslationMap, format_positional, translate_with_fallback};

/// What: One-way sync target for the preferred language.
///
/// Details:
/// - Activation is idempotent
/// - A rejected tag is not fatal for the caller; the preference keeps the
///   requested value regardless
pub trait LocalizationBridge: Send + Sync {
    /// Makes `tag` the active locale of the rendering layer.
    fn set_active_language<'a>(
        &'a self,
        tag: &'a LanguageTag,
    ) -> BoxFuture<'a, Result<(), LocaleError>>;
}

/// Catalog-backed bridge with translation lookups.
#[derive(Debug)]
pub struct Localizer {
    catalogs: HashMap<String, TranslationMap>,
    active: RwLock<String>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// What: Localizer over the bundled catalogs, English active.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalogs(load_bundled_catalogs())
    }

    /// Localizer over caller-provided catalogs, English active.
    #[must_use]
    pub fn with_catalogs(catalogs: HashMap<String, TranslationMap>) -> Self {
        Self {
            catalogs,
            active: RwLock::new(DEFAULT_LANGUAGE.to_string()),
        }
    }

    /// Currently active language tag.
    #[must_use]
    pub fn active_language(&self) -> String {
        self.active
            .read()
            .map_or_else(|_| DEFAULT_LANGUAGE.to_string(), |guard| guard.clone())
    }

    /// Tags that have a catalog.
    #[must_use]
    pub fn available_languages(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.catalogs.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// What: Switch the active catalog synchronously.
    ///
    /// # Errors
    /// - `LocaleError::Unsupported` when no catalog exists for `tag`
    /// - `LocaleError::Poisoned` when the active-language lock is poisoned
    pub fn activate(&self, tag: &LanguageTag) -> Result<(), LocaleError> {
        if !self.catalogs.contains_key(tag.as_str()) {
            return Err(LocaleError::Unsupported(tag.to_string()));
        }
        let mut active = self.active.write().map_err(|_| LocaleError::Poisoned)?;
        if *active != tag.as_str() {
            tracing::debug!(from = %active, to = %tag, "switching active locale");
            *active = tag.to_string();
        }
        Ok(())
    }

    /// What: Translate `key` in the active language.
    ///
    /// Output:
    /// - Active translation, else English, else the key itself
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        let empty = TranslationMap::new();
        let active = self.active_language();
        let primary = self.catalogs.get(&active).unwrap_or(&empty);
        let fallback = self.catalogs.get(DEFAULT_LANGUAGE).unwrap_or(&empty);
        translate_with_fallback(key, primary, fallback)
    }

    /// Translate `key` and fill its `{}` placeholders with `args`.
    #[must_use]
    pub fn t_fmt(&self, key: &str, args: &[&dyn std::fmt::Display]) -> String {
        format_positional(&self.t(key), args)
    }
}

impl LocalizationBridge for Localizer {
    fn set_active_language<'a>(
        &'a self,
        tag: &'a LanguageTag,
    ) -> BoxFuture<'a, Result<(), LocaleError>> {
        Box::pin(async move { self.activate(tag) })
    }
}
