//! Readiness gate consumed by the presentation layer.

use tokio::sync::watch;

use super::types::PreferenceState;

/// What: Read-only view telling the UI when it may render.
///
/// Details:
/// - Holds no state of its own; readiness is read from the preference state
/// - Cheap to clone and hand to every surface that needs it
#[derive(Debug, Clone)]
pub struct InitializationGate {
    state: watch::Receiver<PreferenceState>,
}

impl InitializationGate {
    pub(crate) const fn new(state: watch::Receiver<PreferenceState>) -> Self {
        Self { state }
    }

    /// Whether preferences finished loading.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_initialized()
    }

    /// What: Wait until preferences finished loading.
    ///
    /// Details:
    /// - Returns immediately when already ready
    /// - Also returns if the store is dropped before becoming ready
    pub async fn wait_ready(&self) {
        let mut state = self.state.clone();
        if state.wait_for(PreferenceState::is_initialized).await.is_err() {
            tracing::debug!("preference store dropped before becoming ready");
        }
    }
}
