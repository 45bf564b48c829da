//! # Service Traits
//!
//! Capabilities the swap pipeline depends on, injected as trait objects so
//! that the pipeline can run against real infrastructure or test doubles.
//!
//! - [`QuoteProvider`]: prices swaps and builds swap transactions
//! - [`Wallet`]: exposes the signer identity and signs transactions
//! - [`LedgerConnection`]: broadcasts raw transactions and confirms them
//! - [`Notifier`]: user-facing info/success/error messages
//! - [`TokenDecimals`]: mint → decimal precision lookup

use crate::dto::{ConfirmRequest, Confirmation, Quote, QuoteRequest, SendOptions, SwapRequest, SwapTransaction};
use crate::error::{LedgerError, ProviderError, WalletError};
use async_trait::async_trait;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;

/// Liquidity aggregator.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Price a swap of `request.amount` smallest units.
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, ProviderError>;

    /// Build the unsigned transaction executing `request.quote_response`.
    async fn build_swap_transaction(&self, request: &SwapRequest) -> Result<SwapTransaction, ProviderError>;
}

/// Signer holding the user's key.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Public key of the connected wallet, `None` when disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    fn is_connected(&self) -> bool {
        self.public_key().is_some()
    }

    /// Sign `transaction`, returning the signed copy.
    async fn sign_transaction(&self, transaction: VersionedTransaction) -> Result<VersionedTransaction, WalletError>;
}

/// Connection to a ledger node.
#[async_trait]
pub trait LedgerConnection: Send + Sync {
    /// Broadcast a serialized, signed transaction and return its signature.
    ///
    /// Success only means the node accepted the broadcast.
    async fn send_raw_transaction(&self, raw_transaction: &[u8], options: &SendOptions) -> Result<String, LedgerError>;

    /// Wait until the transaction reaches `commitment` or its blockhash expires.
    async fn confirm_transaction(
        &self,
        request: &ConfirmRequest,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, LedgerError>;
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Sink for user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn info(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Info,
            message: message.to_string(),
        });
    }

    fn success(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Notification {
            level: NotificationLevel::Error,
            message: message.to_string(),
        });
    }
}

/// Decimal precision per mint.
pub trait TokenDecimals: Send + Sync {
    /// `None` for mints the registry does not know.
    fn decimals(&self, mint: &str) -> Option<u8>;
}
