//! Handlers for the CLI subcommands.

use std::sync::Arc;

use prefkit::i18n::Localizer;
use prefkit::prefs::PreferenceStore;
use prefkit::storage::KeyValueStore;

use super::definition::Command;

/// Collaborators every handler works against.
pub struct Session {
    /// Raw storage, shared with the preference store.
    pub store: Arc<KeyValueStore>,
    /// Initialized preference store.
    pub prefs: PreferenceStore,
    /// Bridge driven by `prefs`, used for output text.
    pub localizer: Arc<Localizer>,
}

/// What: Execute one subcommand.
///
/// Inputs:
/// - `command`: Parsed subcommand
/// - `session`: Store handles; `prefs` must already be initialized
///
/// Output:
/// - Lines to print, in the active language
///
/// Details:
/// - Theme and language changes are awaited so they are persisted before the
///   process exits
pub async fn execute(command: &Command, session: &Session) -> Vec<String> {
    let t = &session.localizer;
    match command {
        Command::Show => show(session).await,
        Command::Theme { theme } => {
            session.prefs.set_theme(*theme).await;
            tracing::info!(%theme, "theme set from CLI");
            vec![t.t_fmt("preferences.theme", &[&t.t(&format!("theme.{theme}"))])]
        }
        Command::Language { tag } => {
            session.prefs.set_language(tag.as_str()).await;
            tracing::info!(language = %tag, "language set from CLI");
            vec![t.t_fmt("preferences.language", &[tag])]
        }
        Command::Get { key } => match session.store.get_string(key).await {
            Some(value) => vec![value],
            None => vec![t.t_fmt("storage.missing", &[key])],
        },
        Command::Delete { key } => {
            session.store.delete(key).await;
            vec![t.t_fmt("storage.deleted", &[key])]
        }
        Command::Keys => {
            let keys = session.store.get_all_keys().await;
            if keys.is_empty() {
                vec![t.t("storage.no_keys")]
            } else {
                keys
            }
        }
        Command::Clear => {
            session.store.clear_all().await;
            vec![t.t("storage.cleared")]
        }
        Command::Translate { key } => vec![t.t(key)],
    }
}

async fn show(session: &Session) -> Vec<String> {
    let t = &session.localizer;
    let state = session.prefs.state();
    let backend = if session.store.is_persistent().await {
        session.store.backend_name().to_string()
    } else {
        format!("{} (unavailable)", session.store.backend_name())
    };
    vec![
        t.t_fmt(
            "preferences.theme",
            &[&t.t(&format!("theme.{}", state.theme))],
        ),
        t.t_fmt("preferences.language", &[&state.language]),
        t.t_fmt("preferences.backend", &[&backend]),
        t.t_fmt("preferences.ready", &[&state.is_initialized()]),
    ]
}
