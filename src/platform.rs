//! Runtime platform detection and the storage backend each platform uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::BackendKind;

/// Platform the app shell runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple mobile.
    Ios,
    /// Android mobile.
    Android,
    /// Browser (wasm).
    Web,
    /// Native desktop host.
    Desktop,
}

impl Platform {
    /// What: Platform of the current compile target.
    ///
    /// Output:
    /// - `Web` for `wasm32`, `Ios`/`Android` for those OSes, otherwise `Desktop`
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else {
            Self::Desktop
        }
    }

    /// Whether this is the browser target.
    #[must_use]
    pub const fn is_web(self) -> bool {
        matches!(self, Self::Web)
    }

    /// What: Storage backend used on this platform.
    ///
    /// Details:
    /// - The web has no secure element, so it gets local storage; every
    ///   native target gets the secure per-key store
    #[must_use]
    pub const fn backend_kind(self) -> BackendKind {
        if self.is_web() {
            BackendKind::LocalStorage
        } else {
            BackendKind::Secure
        }
    }

    /// Lowercase identifier used in config files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            "desktop" | "native" => Ok(Self::Desktop),
            other => Err(format!(
                "unknown platform '{other}' (expected ios, android, web or desktop)"
            )),
        }
    }
}
