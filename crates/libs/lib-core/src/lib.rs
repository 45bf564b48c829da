//! # Core Library
//!
//! Configuration, error taxonomy, DTOs and capability traits shared by the
//! swap pipeline and its adapters.

pub mod config;
pub mod dto;
pub mod error;
pub mod service;
pub mod tokens;

// Re-export commonly used types
pub use config::{Config, Network};
pub use error::{LedgerError, ProviderError, SwapError, WalletError};
pub use service::{LedgerConnection, Notification, NotificationLevel, Notifier, QuoteProvider, TokenDecimals, Wallet};
pub use tokens::StaticTokenDecimals;
