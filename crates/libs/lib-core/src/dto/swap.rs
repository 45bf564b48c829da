//! # Swap Data Transfer Objects
//!
//! Request and response of the aggregator's swap-build endpoint.

use super::quote::Quote;
use serde::{Deserialize, Serialize};

/// Body of the swap-build request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub quote_response: Quote,
    /// Signer address, base58
    pub user_public_key: String,
    /// Wrap SOL into wSOL before the swap and unwrap after
    pub wrap_and_unwrap_sol: bool,
    /// Let the provider size the compute-unit limit by simulation
    pub dynamic_compute_unit_limit: bool,
}

impl SwapRequest {
    /// Request with automatic SOL wrapping and dynamic compute-unit estimation.
    pub fn new(quote: Quote, user_public_key: impl Into<String>) -> Self {
        Self {
            quote_response: quote,
            user_public_key: user_public_key.into(),
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
        }
    }
}

/// Response from the swap-build endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    /// Base64-encoded serialized versioned transaction, unsigned
    pub swap_transaction: String,
    /// Block height after which the transaction is invalid
    pub last_valid_block_height: u64,
    /// Priority fee chosen by the provider, in lamports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioritization_fee_lamports: Option<u64>,
}
