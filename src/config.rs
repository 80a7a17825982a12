//! TOML configuration for the `prefkit` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::platform::Platform;
use crate::prefs::PreferenceOptions;
use crate::storage::Namespace;

/// Written to the config path on first run.
pub const SKELETON_CONFIG_CONTENT: &str = "# prefkit configuration\n\
#\n\
# Target platform; selects the storage backend (web -> local storage, others -> secure files).\n\
# ios | android | web | desktop. Detected from the build target when unset.\n\
# platform = \"desktop\"\n\
#\n\
# Directory holding persisted values. Defaults to $XDG_DATA_HOME/prefkit.\n\
# data_dir = \"/path/to/data\"\n\
#\n\
# Storage namespace: default | user | settings | cache\n\
namespace = \"settings\"\n\
#\n\
# Overrides the system locale used when no language is persisted (e.g. \"ru\").\n\
# locale = \"en\"\n\
#\n\
# Give up on loading persisted preferences after this many milliseconds.\n\
# init_timeout_ms = 2000\n\
#\n\
# trace | debug | info | warn | error (RUST_LOG and --log-level take precedence)\n\
log_level = \"info\"\n";

/// Errors raised while reading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`AppConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What: Settings read from `prefkit.toml`.
///
/// Details:
/// - Every field is optional in the file; unknown keys are rejected so typos
///   surface as a logged parse error
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Platform override.
    pub platform: Option<Platform>,
    /// Data directory override.
    pub data_dir: Option<PathBuf>,
    /// Storage namespace.
    pub namespace: Namespace,
    /// Locale override for first-run language detection.
    pub locale: Option<String>,
    /// Init timeout in milliseconds.
    pub init_timeout_ms: Option<u64>,
    /// Default log level.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: None,
            data_dir: None,
            namespace: Namespace::Settings,
            locale: None,
            init_timeout_ms: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// What: Parse config text.
    ///
    /// # Errors
    /// - `ConfigError::Parse` for invalid TOML, wrong value types or unknown keys
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// What: Read and parse the file at `path`.
    ///
    /// # Errors
    /// - `ConfigError::Io` when the file cannot be read
    /// - `ConfigError::Parse` when its content is invalid
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// What: Load the config, creating a skeleton when absent.
    ///
    /// Inputs:
    /// - `path`: Config file location
    ///
    /// Output:
    /// - Parsed config, or defaults when the file is missing or invalid
    ///
    /// Details:
    /// - A missing file is created with [`SKELETON_CONFIG_CONTENT`]
    /// - Read and parse errors are logged; startup never fails on config
    #[must_use]
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            if let Some(dir) = path.parent() {
                let _ = fs::create_dir_all(dir);
            }
            match fs::write(path, SKELETON_CONFIG_CONTENT) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "wrote default config skeleton");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "could not write config skeleton"
                    );
                }
            }
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(cfg) => {
                tracing::debug!(path = %path.display(), "loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring config; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Configured init timeout, if any.
    #[must_use]
    pub fn init_timeout(&self) -> Option<Duration> {
        self.init_timeout_ms.map(Duration::from_millis)
    }

    /// Preference store options derived from this config.
    #[must_use]
    pub fn preference_options(&self) -> PreferenceOptions {
        PreferenceOptions {
            init_timeout: self.init_timeout(),
        }
    }
}
