//! # Utilities Library
//!
//! Shared utility functions for environment variables, validation and display formatting.

pub mod envs;
pub mod format;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse, get_env_parse_or};
pub use format::{format_address, short_signature, truncate_address};
pub use validation::{parse_slippage_percent, validate_mint_address, validate_not_empty, validate_slippage_bps};
