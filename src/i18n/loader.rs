//! Locale catalog parsing.
//!
//! Catalogs are compiled into the binary so every platform (including the web
//! target, which has no filesystem) sees the same translations.

use std::collections::HashMap;

use crate::i18n::LocaleError;
use crate::i18n::translations::TranslationMap;

/// Catalogs bundled with the crate, keyed by language tag.
const BUNDLED_CATALOGS: [(&str, &str); 2] = [
    ("en", include_str!("../../config/locales/en.yml")),
    ("ru", include_str!("../../config/locales/ru.yml")),
];

/// What: Parse every bundled catalog.
///
/// Output:
/// - Map of language tag to flattened translations
///
/// Details:
/// - A catalog that fails to parse is logged and skipped; the language then
///   behaves as unsupported
#[must_use]
pub fn load_bundled_catalogs() -> HashMap<String, TranslationMap> {
    let mut catalogs = HashMap::new();
    for (tag, source) in BUNDLED_CATALOGS {
        match parse_locale_yaml(source) {
            Ok(map) => {
                tracing::debug!(locale = tag, keys = map.len(), "loaded bundled catalog");
                catalogs.insert(tag.to_string(), map);
            }
            Err(e) => tracing::warn!(locale = tag, error = %e, "skipping bundled catalog"),
        }
    }
    catalogs
}

/// What: Parse YAML content into a `TranslationMap`.
///
/// Inputs:
/// - `yaml_content`: YAML document with a single top-level locale key
///
/// Output:
/// - `Result<TranslationMap, LocaleError>` with dot-notation keys
///
/// # Errors
/// - `LocaleError::Catalog` when the YAML cannot be parsed or is not a mapping
///
/// Details:
/// - The top-level locale key (e.g. `en:`) is skipped
pub fn parse_locale_yaml(yaml_content: &str) -> Result<TranslationMap, LocaleError> {
    let doc: serde_norway::Value = serde_norway::from_str(yaml_content)
        .map_err(|e| LocaleError::Catalog(format!("failed to parse YAML: {e}")))?;
    let Some(root) = doc.as_mapping() else {
        return Err(LocaleError::Catalog(
            "catalog root must be a mapping".to_string(),
        ));
    };

    let mut translations = HashMap::new();
    for (_locale_key, locale_value) in root {
        flatten_yaml_value(locale_value, "", &mut translations);
    }
    Ok(translations)
}

/// What: Recursively flatten YAML structure into dot-notation keys.
///
/// Inputs:
/// - `value`: Current YAML value
/// - `prefix`: Current key prefix (e.g., "preferences")
/// - `translations`: Map to populate
///
/// Details:
/// - Scalars other than strings are stored in their display form
/// - Sequences and nulls carry no translation and are skipped
fn flatten_yaml_value(
    value: &serde_norway::Value,
    prefix: &str,
    translations: &mut TranslationMap,
) {
    match value {
        serde_norway::Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key_str) = key.as_str() {
                    let next = if prefix.is_empty() {
                        key_str.to_string()
                    } else {
                        format!("{prefix}.{key_str}")
                    };
                    flatten_yaml_value(val, &next, translations);
                }
            }
        }
        serde_norway::Value::String(s) => {
            translations.insert(prefix.to_string(), s.clone());
        }
        serde_norway::Value::Bool(b) => {
            translations.insert(prefix.to_string(), b.to_string());
        }
        serde_norway::Value::Number(n) => {
            translations.insert(prefix.to_string(), n.to_string());
        }
        _ => {}
    }
}
