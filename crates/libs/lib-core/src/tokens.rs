//! # Token Decimals
//!
//! Known mints and the decimals registry used to convert human amounts
//! into smallest units.

use crate::service::TokenDecimals;
use std::collections::HashMap;

/// Wrapped SOL
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
/// USDC (mainnet)
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
/// USDC (devnet)
pub const USDC_DEVNET_MINT: &str = "Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGtKJr";

/// In-memory mint → decimals map.
///
/// Lookups for mints that were never registered return `None`; there is no
/// fallback precision.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenDecimals {
    decimals: HashMap<String, u8>,
}

impl StaticTokenDecimals {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with SOL (9) and both USDC mints (6).
    pub fn with_known_mints() -> Self {
        Self::new()
            .with(SOL_MINT, 9)
            .with(USDC_MINT, 6)
            .with(USDC_DEVNET_MINT, 6)
    }

    /// Register a mint, builder style.
    pub fn with(mut self, mint: impl Into<String>, decimals: u8) -> Self {
        self.insert(mint, decimals);
        self
    }

    pub fn insert(&mut self, mint: impl Into<String>, decimals: u8) {
        self.decimals.insert(mint.into(), decimals);
    }
}

impl TokenDecimals for StaticTokenDecimals {
    fn decimals(&self, mint: &str) -> Option<u8> {
        self.decimals.get(mint).copied()
    }
}
