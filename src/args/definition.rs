//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use prefkit::platform::Platform;
use prefkit::prefs::Theme;

/// prefkit - inspect and edit persisted app preferences
#[derive(Parser, Debug)]
#[command(name = "prefkit")]
#[command(version)]
#[command(about = "Inspect and edit persisted theme, language and raw storage keys", long_about = None)]
pub struct Args {
    /// Target platform, selecting the storage backend (ios, android, web, desktop)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Directory holding persisted values (default: $XDG_DATA_HOME/prefkit)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/prefkit/prefkit.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Action to perform after preferences are loaded
    #[command(subcommand)]
    pub command: Command,
}

/// Actions run against the initialized store.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the resolved theme, language and storage backend
    Show,
    /// Persist a theme (light or dark)
    Theme {
        /// New theme
        theme: Theme,
    },
    /// Persist a language tag (not validated)
    Language {
        /// New language tag, e.g. en or ru
        tag: String,
    },
    /// Print the raw value of a storage key
    Get {
        /// Storage key
        key: String,
    },
    /// Remove a storage key
    Delete {
        /// Storage key
        key: String,
    },
    /// List stored keys (empty when the backend cannot enumerate)
    Keys,
    /// Remove every key of the namespace
    Clear,
    /// Translate a catalog key in the active language
    Translate {
        /// Dot-notation key, e.g. theme.dark
        key: String,
    },
}
