//! # Async Tasks
//!
//! Quote fetching and swap execution, driven by the orchestrator.

pub mod quote;
pub mod swap;

pub use quote::{QuoteFetcher, QuoteOutcome};
pub use swap::SwapExecutor;
