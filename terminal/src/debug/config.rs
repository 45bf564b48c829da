//! Logging configuration from environment variables

use std::path::PathBuf;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "swap_terminal=info,lib_solana=info,warn";

/// Log file name inside the log directory (daily rotation appends the date)
pub const LOG_FILE_NAME: &str = "swap-terminal.log";

/// Logging system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log level filter (e.g., "swap_terminal=debug,info")
    pub log_level: String,
    /// Directory for the rotating file log; `None` logs to stderr only
    pub log_dir: Option<PathBuf>,
    /// Include file and line in stderr output
    pub with_source_location: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
            with_source_location: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    ///
    /// - `RUST_LOG`: filter directives
    /// - `SWAP_LOG_DIR`: enables the file log in that directory
    /// - `SWAP_LOG_SOURCE=1`: file/line in console output
    pub fn from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            log_dir: std::env::var("SWAP_LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            with_source_location: std::env::var("SWAP_LOG_SOURCE")
                .map(|v| v == "1")
                .unwrap_or(false),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }
}
