//! Preference store: single source of truth for theme and language.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use super::gate::InitializationGate;
use super::types::{Phase, PreferenceState, Theme};
use crate::i18n::{LanguageTag, LocaleProvider, LocalizationBridge};
use crate::storage::{KeyValueStore, StorageKey};

/// Tuning knobs for the preference store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferenceOptions {
    /// Upper bound for the initial load and for opening storage ahead of it;
    /// `None` waits as long as storage takes.
    pub init_timeout: Option<Duration>,
}

/// Mutations handled by the worker, strictly in send order.
enum Command {
    Initialize(oneshot::Sender<()>),
    SetTheme(Theme, oneshot::Sender<()>),
    SetLanguage(LanguageTag, oneshot::Sender<()>),
}

/// Why the initial load produced no values.
#[derive(Debug, Error)]
enum LoadFailure {
    #[error("initialization panicked: {0}")]
    Panicked(String),
    #[error("initialization timed out after {0:?}")]
    TimedOut(Duration),
}

/// Values produced by a successful load.
struct Resolved {
    theme: Theme,
    language: LanguageTag,
}

/// What: Completion handle of a queued preference write.
///
/// Details:
/// - Await it to know the value is persisted and visible to readers
/// - Dropping it does not cancel the write
#[derive(Debug)]
pub struct PendingWrite {
    done: oneshot::Receiver<()>,
}

impl Future for PendingWrite {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.done).poll(cx).map(|_| ())
    }
}

/// What: Handle to the process-wide theme/language preferences.
///
/// Details:
/// - Constructed once by the app shell and passed to whoever needs it; clones
///   share the same state
/// - Every mutation (`initialize_app`, `set_theme`, `set_language`) is queued
///   to one worker task, so storage writes happen in call order and never
///   interleave
/// - Readers never wait: they see the last published [`PreferenceState`]
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    state: Arc<watch::Sender<PreferenceState>>,
    commands: mpsc::UnboundedSender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialize(_) => f.write_str("Initialize"),
            Self::SetTheme(theme, _) => write!(f, "SetTheme({theme})"),
            Self::SetLanguage(language, _) => write!(f, "SetLanguage({language})"),
        }
    }
}

impl PreferenceStore {
    /// What: Start the preference worker.
    ///
    /// Inputs:
    /// - `store`: Storage shared with other consumers
    /// - `bridge`: Receives every resolved or changed language
    /// - `locale`: Host locale, consulted when no language is persisted
    /// - `options`: Timeout settings
    ///
    /// Output:
    /// - Handle in the `Uninitialized` phase
    ///
    /// Details:
    /// - Must be called inside a Tokio runtime
    /// - The worker stops once every handle is dropped
    #[must_use]
    pub fn spawn(
        store: Arc<KeyValueStore>,
        bridge: Arc<dyn LocalizationBridge>,
        locale: Arc<dyn LocaleProvider>,
        options: PreferenceOptions,
    ) -> Self {
        let (state_tx, _) = watch::channel(PreferenceState::default());
        let state = Arc::new(state_tx);
        let (commands, rx) = mpsc::unbounded_channel();
        let worker = Worker {
            store,
            bridge,
            locale,
            options,
            state: Arc::clone(&state),
        };
        tokio::spawn(worker.run(rx));
        Self { state, commands }
    }

    /// What: Load persisted preferences and mark the store ready.
    ///
    /// Details:
    /// - Returns once the store is `Ready`; later calls are no-ops
    /// - Never fails: any problem during the load falls back to dark/English
    pub async fn initialize_app(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.commands.send(Command::Initialize(done_tx)).is_ok() && done_rx.await.is_ok() {
            return;
        }
        tracing::warn!("preference worker unavailable; applying default preferences");
        self.state.send_if_modified(|s| {
            if s.is_initialized() {
                return false;
            }
            *s = PreferenceState::ready_defaults();
            true
        });
    }

    /// What: Persist `theme` and make it current.
    ///
    /// Output:
    /// - [`PendingWrite`] resolving once applied; may be dropped
    pub fn set_theme(&self, theme: Theme) -> PendingWrite {
        let (done_tx, done) = oneshot::channel();
        if self.commands.send(Command::SetTheme(theme, done_tx)).is_err() {
            tracing::warn!(%theme, "preference worker unavailable; theme not persisted");
            self.state.send_modify(|s| s.theme = theme);
        }
        PendingWrite { done }
    }

    /// What: Persist `language`, activate it, and make it current.
    ///
    /// Output:
    /// - [`PendingWrite`] resolving once applied; may be dropped
    ///
    /// Details:
    /// - The tag is not checked against the supported set; an unsupported tag
    ///   is persisted and becomes current even if the bridge rejects it
    pub fn set_language(&self, language: impl Into<LanguageTag>) -> PendingWrite {
        let language = language.into();
        let (done_tx, done) = oneshot::channel();
        if let Err(mpsc::error::SendError(cmd)) =
            self.commands.send(Command::SetLanguage(language, done_tx))
        {
            tracing::warn!(?cmd, "preference worker unavailable; language not persisted");
            if let Command::SetLanguage(language, _) = cmd {
                self.state.send_modify(|s| s.language = language);
            }
        }
        PendingWrite { done }
    }

    /// Snapshot of the current preferences.
    #[must_use]
    pub fn state(&self) -> PreferenceState {
        self.state.borrow().clone()
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.state.borrow().theme
    }

    /// Current language.
    #[must_use]
    pub fn language(&self) -> LanguageTag {
        self.state.borrow().language.clone()
    }

    /// Whether initialization finished.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_initialized()
    }

    /// Receiver notified on every preference change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PreferenceState> {
        self.state.subscribe()
    }

    /// Readiness gate for the presentation layer.
    #[must_use]
    pub fn gate(&self) -> InitializationGate {
        InitializationGate::new(self.state.subscribe())
    }
}

/// Owns the collaborators and applies queued commands one at a time.
struct Worker {
    store: Arc<KeyValueStore>,
    bridge: Arc<dyn LocalizationBridge>,
    locale: Arc<dyn LocaleProvider>,
    options: PreferenceOptions,
    state: Arc<watch::Sender<PreferenceState>>,
}

impl Worker {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(cmd) = rx.recv().await {
            tracing::trace!(?cmd, "applying preference command");
            let done = match cmd {
                Command::Initialize(done) => {
                    self.initialize().await;
                    done
                }
                Command::SetTheme(theme, done) => {
                    self.apply_theme(theme).await;
                    done
                }
                Command::SetLanguage(language, done) => {
                    self.apply_language(language).await;
                    done
                }
            };
            let _ = done.send(());
        }
        tracing::debug!("preference worker stopped");
    }

    /// What: Run the load once and publish the result as `Ready`.
    ///
    /// Details:
    /// - Panics inside the load and an expired `init_timeout` both publish the
    ///   hardcoded defaults instead and re-activate English in the bridge
    /// - An expired `init_timeout` also puts storage into degraded mode
    async fn initialize(&self) {
        let already_ready = self.state.borrow().is_initialized();
        if already_ready {
            tracing::debug!("preferences already initialized");
            return;
        }
        self.state.send_modify(|s| s.phase = Phase::Initializing);

        let load = AssertUnwindSafe(self.load()).catch_unwind();
        let outcome = match self.options.init_timeout {
            Some(limit) => match tokio::time::timeout(limit, load).await {
                Ok(result) => result.map_err(panic_failure),
                Err(_) => {
                    self.store.mark_unavailable();
                    Err(LoadFailure::TimedOut(limit))
                }
            },
            None => load.await.map_err(panic_failure),
        };

        let ready = match outcome {
            Ok(resolved) => PreferenceState {
                phase: Phase::Ready,
                theme: resolved.theme,
                language: resolved.language,
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to initialize app settings; using defaults");
                let defaults = PreferenceState::ready_defaults();
                self.activate(&defaults.language).await;
                defaults
            }
        };
        tracing::info!(
            theme = %ready.theme,
            language = %ready.language,
            backend = self.store.backend_name(),
            "preferences initialized"
        );
        self.state.send_replace(ready);
    }

    async fn load(&self) -> Resolved {
        self.store.init().await;

        let theme = match self.store.get_string(StorageKey::AppTheme).await {
            Some(raw) => Theme::from_persisted(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "ignoring invalid persisted theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let language = self.resolve_language().await;
        self.activate(&language).await;
        Resolved { theme, language }
    }

    /// What: Pick the language: persisted, then legacy key, then host locale.
    ///
    /// Details:
    /// - Persisted values are taken as-is, supported or not
    /// - A value found under the legacy key is moved to `app_language`
    /// - The host locale is mapped onto the supported set (`en` otherwise)
    async fn resolve_language(&self) -> LanguageTag {
        if let Some(saved) = self
            .store
            .get_string(StorageKey::AppLanguage)
            .await
            .filter(|s| !s.is_empty())
        {
            return LanguageTag::new(saved);
        }

        if let Some(legacy) = self
            .store
            .get_string(StorageKey::LegacyLanguage)
            .await
            .filter(|s| !s.is_empty())
        {
            tracing::info!(language = %legacy, "migrating legacy language key");
            self.store.set_string(StorageKey::AppLanguage, &legacy).await;
            self.store.delete(StorageKey::LegacyLanguage).await;
            return LanguageTag::new(legacy);
        }

        let device = self.locale.preferred_locale();
        let resolved = device
            .as_deref()
            .map_or_else(LanguageTag::english, LanguageTag::from_device_locale);
        tracing::debug!(device = ?device, language = %resolved, "no persisted language");
        resolved
    }

    async fn activate(&self, language: &LanguageTag) {
        if let Err(e) = self.bridge.set_active_language(language).await {
            tracing::warn!(%language, error = %e, "failed to activate language");
        }
    }

    /// Open storage for a setter, bounded like the initial load.
    async fn open_storage(&self) {
        self.store.init_within(self.options.init_timeout).await;
    }

    async fn apply_theme(&self, theme: Theme) {
        self.open_storage().await;
        self.store
            .set_string(StorageKey::AppTheme, theme.as_str())
            .await;
        self.state.send_modify(|s| s.theme = theme);
        tracing::debug!(%theme, "theme updated");
    }

    async fn apply_language(&self, language: LanguageTag) {
        self.open_storage().await;
        self.store
            .set_string(StorageKey::AppLanguage, language.as_str())
            .await;
        self.activate(&language).await;
        tracing::debug!(%language, "language updated");
        self.state.send_modify(|s| s.language = language);
    }
}

/// Turn a caught panic payload into a loggable failure.
fn panic_failure(payload: Box<dyn Any + Send>) -> LoadFailure {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    LoadFailure::Panicked(message)
}
