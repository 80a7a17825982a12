//! Host locale detection.

use std::env;

/// What: Source of the host's preferred language tag.
///
/// Details:
/// - Consulted once during preference initialization, only when no language
///   has been persisted yet
/// - Returning `None` means "unknown"; the caller falls back to English
pub trait LocaleProvider: Send + Sync {
    /// Preferred locale tag of the host (e.g. `ru-RU`, `en`).
    fn preferred_locale(&self) -> Option<String>;
}

/// Reads the locale from `LC_ALL`, `LC_MESSAGES` and `LANG`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleProvider;

impl LocaleProvider for SystemLocaleProvider {
    fn preferred_locale(&self) -> Option<String> {
        detect_system_locale()
    }
}

/// Provider returning a fixed answer; used for config overrides and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedLocaleProvider(Option<String>);

impl FixedLocaleProvider {
    /// Provider that always reports `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self(Some(locale.into()))
    }

    /// Provider that never knows the locale.
    #[must_use]
    pub const fn unknown() -> Self {
        Self(None)
    }
}

impl LocaleProvider for FixedLocaleProvider {
    fn preferred_locale(&self) -> Option<String> {
        self.0.clone()
    }
}

/// What: Detect system locale from environment variables.
///
/// Output:
/// - `Option<String>` containing locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in order
/// - The POSIX placeholders `C` and `POSIX` count as "not set"
pub fn detect_system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find_map(|raw| parse_locale_string(&raw))
}

/// What: Normalize a POSIX locale string.
///
/// Inputs:
/// - `locale_str`: Value like "de_DE.UTF-8", "ru-RU", "en_US.utf8@euro"
///
/// Output:
/// - Tag like "de-DE", or `None` for blank and POSIX placeholder values
///
/// Details:
/// - Drops the encoding (`.UTF-8`) and modifier (`@euro`)
/// - Language lowercased, region uppercased
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    let without_modifier = trimmed.split('@').next()?;
    let locale_part = without_modifier.split('.').next()?;
    if locale_part.is_empty() || locale_part == "C" || locale_part == "POSIX" {
        return None;
    }

    let normalized = locale_part.replace('_', "-");
    let mut parts = normalized.split('-').filter(|p| !p.is_empty());
    let language = parts.next()?.to_lowercase();
    match parts.next() {
        Some(region) => Some(format!("{language}-{}", region.to_uppercase())),
        None => Some(language),
    }
}
