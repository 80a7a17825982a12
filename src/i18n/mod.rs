//! Internationalization: language tags, locale detection and the localization bridge.
//!
//! # Overview
//!
//! - **Locale Detection**: [`SystemLocaleProvider`] reads `LC_ALL`, `LC_MESSAGES`, `LANG`
//! - **Supported Set**: [`LanguageTag::from_device_locale`] maps a host locale
//!   onto `en`/`ru`, anything else becomes `en`
//! - **Bridge**: [`LocalizationBridge`] is what the preference store drives;
//!   [`Localizer`] implements it over the bundled catalogs
//! - **Lookup**: [`Localizer::t`] and [`Localizer::t_fmt`], falling back to
//!   English and finally to the key itself
//!
//! # Catalogs
//!
//! Catalogs live in `config/locales/{tag}.yml` and are compiled in. Each file
//! holds one top-level locale key with a nested structure flattened into
//! dot-notation keys (`theme.dark`).
//!
//! # Adding a New Locale
//!
//! 1. Create `config/locales/{tag}.yml` with the same keys as `en.yml`
//! 2. Add it to the bundled catalog list in `loader.rs`
//! 3. Add the tag to [`SUPPORTED_LANGUAGES`]

mod bridge;
mod detection;
mod language;
mod loader;
pub mod translations;

pub use bridge::{LocalizationBridge, Localizer};
pub use detection::{
    FixedLocaleProvider, LocaleProvider, SystemLocaleProvider, detect_system_locale,
};
pub use language::{DEFAULT_LANGUAGE, LanguageTag, SUPPORTED_LANGUAGES};
pub use loader::{load_bundled_catalogs, parse_locale_yaml};
pub use translations::TranslationMap;

use thiserror::Error;

/// Errors raised while loading catalogs or activating a language.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// No catalog exists for the requested tag.
    #[error("unsupported language '{0}'")]
    Unsupported(String),

    /// A catalog could not be parsed.
    #[error("invalid locale catalog: {0}")]
    Catalog(String),

    /// The active-language lock was poisoned by a panicking writer.
    #[error("locale state poisoned")]
    Poisoned,
}
