//! # Solana Library
//!
//! Solana integration for the swap pipeline: the Jupiter quote provider, the
//! RPC ledger connection and the local keypair wallet.

pub mod client;
pub mod jupiter;
pub mod wallet;

// Re-export commonly used types from root for convenience
pub use client::SolanaClient;
pub use jupiter::JupiterClient;
pub use wallet::KeypairWallet;
