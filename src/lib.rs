//! Library entry for prefkit: typed key-value storage and the theme/language
//! preferences built on it.
//!
//! - [`storage`]: backends, the key registry and [`storage::KeyValueStore`]
//! - [`prefs`]: [`prefs::PreferenceStore`] and [`prefs::InitializationGate`]
//! - [`i18n`]: language tags, locale detection and the localization bridge
//! - [`platform`], [`config`], [`paths`]: host wiring used by the binary

pub mod config;
pub mod i18n;
pub mod paths;
pub mod platform;
pub mod prefs;
pub mod storage;
