//! # Swap Terminal - Library Root
//!
//! Quote/swap orchestration for Jupiter swaps on Solana: debounced quote
//! acquisition, quote-to-transaction conversion, signing handoff, submission
//! and confirmation with failure classification.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │            swap-terminal (this crate)                  │
//! ├────────────────────────────────────────────────────────┤
//! │  app      - App orchestrator, QuoteFetcher,            │
//! │             SwapExecutor, QuoteView                    │
//! │  utils    - Amount conversion (rust_decimal)           │
//! │  notify   - Tracing / channel notifiers                │
//! │  debug    - Logging setup, tracked task spawning       │
//! └────────────────────────────────────────────────────────┘
//!          │ QuoteProvider            │ LedgerConnection / Wallet
//!          ▼                          ▼
//! ┌─────────────────┐       ┌─────────────────────────────┐
//! │  Jupiter v6 API │       │  Solana RPC / local keypair │
//! └─────────────────┘       └─────────────────────────────┘
//! ```
//!
//! Collaborators are the capability traits of [`lib_core::service`], so the
//! pipeline runs unchanged against the `lib-solana` adapters or test doubles.

pub mod app;
pub mod debug;
pub mod notify;
pub mod utils;

pub use app::{App, AppEvent, QuoteOutcome, QuoteView, Services, SwapInputs, SwapStatus};
pub use notify::{ChannelNotifier, TracingNotifier};
