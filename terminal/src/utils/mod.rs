//! # Utility Functions
//!
//! Shared utility functions used across the terminal application.
//!
//! ## Modules
//!
//! - **[`amount`]**: Human-decimal ↔ smallest-unit amount conversion
//!
//! ## Related Modules
//!
//! - [`lib_utils::format`]: Address shortening
//! - [`lib_utils::validation`]: Mint address and slippage validation

pub mod amount;
