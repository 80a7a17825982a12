//! Shared utilities for argument processing.

/// What: Determine the log level based on command-line arguments and config.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `configured`: `log_level` from the config file.
///
/// Output:
/// - Log level directive (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`, which overrides the config.
/// - `RUST_LOG`, when set, still wins at subscriber construction.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args, configured: &str) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level
            .clone()
            .unwrap_or_else(|| configured.to_string())
    }
}
