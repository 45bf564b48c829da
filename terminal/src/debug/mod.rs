//! # Logging and Task Tracking
//!
//! Structured logging setup for the swap terminal and instrumented task
//! spawning for the quote debounce timers.
//!
//! ## Usage
//!
//! ```rust,no_run
//! // Initialize at startup, keep the guard alive
//! let _guard = swap_terminal::debug::init_logger();
//!
//! // Log with structured fields
//! tracing::info!(signature = "5h3...", "Swap confirmed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `swap_terminal=info,lib_solana=info,warn`)
//! - `SWAP_LOG_DIR`: Directory for the daily-rotated file log (off when unset)
//! - `SWAP_LOG_SOURCE`: Show file/line in console output (1=on)

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};
