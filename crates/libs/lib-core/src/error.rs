//! # Centralized Error Handling
//!
//! Error types for the quote/swap pipeline and its collaborators. All types
//! follow the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! [`SwapError`] is the taxonomy surfaced to the user:
//!
//! 1. **Input** - [`InputValidation`](SwapError::InputValidation) (silent, suppresses quoting)
//! 2. **Quoting** - [`Quote`](SwapError::Quote)
//! 3. **Swap attempt** - [`Precondition`](SwapError::Precondition), [`Build`](SwapError::Build),
//!    [`Signing`](SwapError::Signing), [`Submission`](SwapError::Submission),
//!    [`Execution`](SwapError::Execution), [`Expired`](SwapError::Expired),
//!    [`Cancelled`](SwapError::Cancelled), [`Confirmation`](SwapError::Confirmation)
//!
//! Collaborators report their own typed errors ([`ProviderError`],
//! [`WalletError`], [`LedgerError`]); the pipeline classifies them into a
//! `SwapError` depending on the step that failed.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{ProviderError, SwapError};
//!
//! let err = ProviderError::Rejected { message: "insufficient liquidity".to_string() };
//! let swap_err = SwapError::Quote(err.user_message());
//! assert_eq!(swap_err.to_string(), "Failed to fetch quote: insufficient liquidity");
//! ```

use thiserror::Error;

/// Failure taxonomy of the quote/swap pipeline.
///
/// Every variant except [`InputValidation`](SwapError::InputValidation) is
/// shown to the user. None of them are retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// Amount is empty, non-numeric or not positive.
    #[error("Invalid input: {0}")]
    InputValidation(String),

    /// Quote provider rejected the request or returned nothing.
    #[error("Failed to fetch quote: {0}")]
    Quote(String),

    /// Swap requested without a wallet, without a current quote, or while
    /// another attempt is in flight.
    #[error("Cannot swap: {0}")]
    Precondition(String),

    /// Swap transaction could not be built or decoded.
    #[error("Failed to build swap transaction: {0}")]
    Build(String),

    /// Wallet refused or failed to sign.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Broadcast failed after the connection layer's retries.
    #[error("Failed to submit transaction: {0}")]
    Submission(String),

    /// Transaction landed but failed on-chain. `details` is the raw error payload.
    #[error("Transaction {signature} failed on-chain: {details}")]
    Execution { signature: String, details: String },

    /// Blockhash validity window elapsed before confirmation.
    #[error("Transaction {signature} expired: block height exceeded {last_valid_block_height}")]
    Expired {
        signature: String,
        last_valid_block_height: u64,
    },

    /// The attempt was abandoned before anything was broadcast.
    #[error("Swap cancelled: {0}")]
    Cancelled(String),

    /// Confirmation status could not be determined; the transaction may still land.
    #[error("Could not confirm transaction {signature}: {message}")]
    Confirmation { signature: String, message: String },
}

impl SwapError {
    /// Short kind name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SwapError::InputValidation(_) => "InputValidation",
            SwapError::Quote(_) => "Quote",
            SwapError::Precondition(_) => "Precondition",
            SwapError::Build(_) => "Build",
            SwapError::Signing(_) => "Signing",
            SwapError::Submission(_) => "Submission",
            SwapError::Execution { .. } => "Execution",
            SwapError::Expired { .. } => "Expired",
            SwapError::Cancelled(_) => "Cancelled",
            SwapError::Confirmation { .. } => "Confirmation",
        }
    }

    /// Whether this error is swallowed instead of shown to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, SwapError::InputValidation(_))
    }
}

/// Generic message used when the provider gives nothing better.
pub const GENERIC_QUOTE_FAILURE: &str = "failed to fetch quote";

/// Errors reported by a quote provider.
///
/// Provider calls return `Result<T, ProviderError>`, so every call site
/// matches the failure path explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider answered with an error; `message` is its own text.
    #[error("Provider rejected request: {message}")]
    Rejected { message: String },

    /// The provider answered successfully but with no usable payload.
    #[error("Provider returned an empty response")]
    Empty,

    /// Network or HTTP-level failure.
    #[error("Provider request failed: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("Provider response could not be decoded: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Best available human message: the provider's own text when present,
    /// otherwise a generic description.
    pub fn user_message(&self) -> String {
        match self {
            ProviderError::Rejected { message } if !message.trim().is_empty() => message.clone(),
            ProviderError::Rejected { .. } => GENERIC_QUOTE_FAILURE.to_string(),
            ProviderError::Empty => "received an empty quote response".to_string(),
            ProviderError::Transport(msg) | ProviderError::Decode(msg) if !msg.trim().is_empty() => msg.clone(),
            ProviderError::Transport(_) | ProviderError::Decode(_) => GENERIC_QUOTE_FAILURE.to_string(),
        }
    }
}

/// Wallet errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No keypair is loaded
    #[error("Wallet not connected")]
    NotConnected,
    /// User declined the signature request
    #[error("User rejected the request: {0}")]
    Rejected(String),
    /// Signing failed for another reason
    #[error("Signing error: {0}")]
    SigningError(String),
    /// Failed to load keypair from file
    #[error("Keypair load error: {0}")]
    KeypairLoadError(String),
    /// Invalid keypair format
    #[error("Invalid keypair: {0}")]
    InvalidKeypair(String),
}

/// Ledger connection errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// RPC transport or node error
    #[error("RPC error: {0}")]
    Rpc(String),
    /// Current block height passed the transaction's last valid block height.
    #[error("Block height exceeded: transaction {signature} is no longer valid after block {last_valid_block_height}")]
    BlockHeightExceeded {
        signature: String,
        last_valid_block_height: u64,
    },
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(format!("JSON error: {}", err))
    }
}
