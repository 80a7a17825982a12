//! Command-line argument parsing and handling.

pub mod commands;
pub mod definition;
pub mod utils;

// Re-export commonly used items
pub use commands::{Session, execute};
pub use definition::{Args, Command};
pub use utils::determine_log_level;
