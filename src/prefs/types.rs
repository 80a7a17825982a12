//! Preference value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::LanguageTag;

/// Color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme; the default.
    #[default]
    Dark,
}

impl Theme {
    /// Value written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// What: Decode a persisted theme.
    ///
    /// Output:
    /// - `Some` only for the exact strings `light` and `dark`; anything else is
    ///   treated as corrupt
    #[must_use]
    pub fn from_persisted(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_persisted(&s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown theme '{s}' (expected light or dark)"))
    }
}

/// Lifecycle of the preference store. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing loaded yet.
    #[default]
    Uninitialized,
    /// Persisted values are being read.
    Initializing,
    /// Values resolved; safe to render.
    Ready,
}

/// Snapshot of the resolved preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceState {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Active theme.
    pub theme: Theme,
    /// Active language.
    pub language: LanguageTag,
}

impl PreferenceState {
    /// Whether initialization finished.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// The hardcoded fallback: dark theme, English, ready.
    #[must_use]
    pub fn ready_defaults() -> Self {
        Self {
            phase: Phase::Ready,
            theme: Theme::Dark,
            language: LanguageTag::english(),
        }
    }
}
