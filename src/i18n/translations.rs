//! Translation map and lookup utilities.

use std::collections::HashMap;

/// Translation map: dot-notation key -> translated string.
pub type TranslationMap = HashMap<String, String>;

/// What: Look up `key` in the active catalog, then in the fallback catalog.
///
/// Inputs:
/// - `key`: Dot-notation key (e.g., "theme.dark")
/// - `active`: Catalog of the active language
/// - `fallback`: English catalog
///
/// Output:
/// - Translation, or the key itself when neither catalog has it
pub fn translate_with_fallback(
    key: &str,
    active: &TranslationMap,
    fallback: &TranslationMap,
) -> String {
    if let Some(translation) = active.get(key) {
        return translation.clone();
    }
    if let Some(translation) = fallback.get(key) {
        tracing::debug!(key, "translation missing in active catalog, using fallback");
        return translation.clone();
    }
    tracing::debug!(key, "missing translation key");
    key.to_string()
}

/// What: Replace `{}` placeholders in order.
///
/// Inputs:
/// - `template`: Text with zero or more `{}`
/// - `args`: Values substituted left to right
///
/// Output:
/// - Formatted text; surplus placeholders stay as `{}`
pub fn format_positional(template: &str, args: &[&dyn std::fmt::Display]) -> String {
    args.iter().fold(template.to_string(), |acc, arg| {
        acc.replacen("{}", &arg.to_string(), 1)
    })
}
