//! Theme and language preferences.
//!
//! [`PreferenceStore`] resolves the persisted values once at startup and is
//! the single writer afterwards. [`InitializationGate`] lets the UI hold its
//! first render until that resolution finished.

mod gate;
mod store;
mod types;

pub use gate::InitializationGate;
pub use store::{PendingWrite, PreferenceOptions, PreferenceStore};
pub use types::{Phase, PreferenceState, Theme};
