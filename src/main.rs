//! prefkit binary: wires storage, preferences and localization the way an app shell does.

mod args;

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, OnceLock};

use clap::Parser;
use prefkit::config::AppConfig;
use prefkit::i18n::{FixedLocaleProvider, LocaleProvider, Localizer, SystemLocaleProvider};
use prefkit::paths;
use prefkit::platform::Platform;
use prefkit::prefs::PreferenceStore;
use prefkit::storage::KeyValueStore;

use crate::args::{Args, Session};

struct PrefkitTimer;

impl tracing_subscriber::fmt::time::FormatTime for PrefkitTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `level`: Default filter directive, used when `RUST_LOG` is unset
///
/// Details:
/// - Writes to `logs_dir()/prefkit.log` through a non-blocking appender
/// - Falls back to stderr when the log file cannot be opened
fn init_logging(level: &str) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    let log_path = paths::logs_dir().join("prefkit.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(PrefkitTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(PrefkitTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

/// What: Build the storage the command operates on.
///
/// Details:
/// - `--ephemeral` wins; otherwise the platform (flag, config, detection)
///   picks the backend rooted at the data directory
fn build_store(args: &Args, config: &AppConfig) -> KeyValueStore {
    if args.ephemeral {
        return KeyValueStore::in_memory();
    }
    let platform = args
        .platform
        .or(config.platform)
        .unwrap_or_else(Platform::detect);
    let root = args
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(paths::data_dir);
    tracing::debug!(
        %platform,
        root = %root.display(),
        namespace = %config.namespace,
        "selecting storage"
    );
    KeyValueStore::for_platform(platform, &root, config.namespace)
}

fn locale_provider(config: &AppConfig) -> Arc<dyn LocaleProvider> {
    match &config.locale {
        Some(locale) => Arc::new(FixedLocaleProvider::new(locale.clone())),
        None => Arc::new(SystemLocaleProvider),
    }
}

async fn run(args: Args, config: AppConfig) -> Result<(), Box<dyn Error>> {
    let store = Arc::new(build_store(&args, &config));
    let localizer = Arc::new(Localizer::new());
    let prefs = PreferenceStore::spawn(
        Arc::clone(&store),
        localizer.clone(),
        locale_provider(&config),
        config.preference_options(),
    );

    let gate = prefs.gate();
    let loader = prefs.clone();
    tokio::spawn(async move { loader.initialize_app().await });
    gate.wait_ready().await;

    let session = Session {
        store,
        prefs,
        localizer,
    };
    let lines = crate::args::execute(&args.command, &session).await;
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(paths::config_file);
    let parsed = AppConfig::load_from(&config_path).ok();

    let configured_level = parsed
        .as_ref()
        .map_or_else(|| AppConfig::default().log_level, |c| c.log_level.clone());
    init_logging(&crate::args::determine_log_level(&args, &configured_level));

    // Re-run through the logging path to write the skeleton or report the error.
    let config = parsed.unwrap_or_else(|| AppConfig::load_or_init(&config_path));

    tracing::info!(command = ?args.command, "prefkit starting");
    if let Err(err) = run(args, config).await {
        tracing::error!(error = %err, "prefkit failed");
        eprintln!("prefkit: {err}");
        std::process::exit(1);
    }
    tracing::info!("prefkit exited");
}
