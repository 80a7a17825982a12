//! XDG directories used by the binary.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "prefkit";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    home_default
        .iter()
        .fold(PathBuf::from(home), |base, seg| base.join(seg))
}

/// Create `dir` if needed; failure is logged and the path returned anyway.
fn ensured(dir: PathBuf) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::debug!(path = %dir.display(), error = %e, "could not create directory");
    }
    dir
}

/// Config directory: `$XDG_CONFIG_HOME/prefkit` or `~/.config/prefkit` (ensured to exist).
#[must_use]
pub fn config_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR))
}

/// Data directory holding the persisted stores: `$XDG_DATA_HOME/prefkit` or
/// `~/.local/share/prefkit` (ensured to exist).
#[must_use]
pub fn data_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR))
}

/// Logs directory under config: `<config_dir>/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    ensured(config_dir().join("logs"))
}

/// Default config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(format!("{APP_DIR}.toml"))
}
