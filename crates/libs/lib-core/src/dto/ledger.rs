//! # Ledger Data Transfer Objects
//!
//! Submission options and confirmation context for the ledger connection.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    pub skip_preflight: bool,
    /// Broadcast retries performed by the RPC node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            max_retries: Some(5),
        }
    }
}

/// What a confirmation is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    /// Transaction signature, base58
    pub signature: String,
    /// Recent blockhash the transaction was built with
    pub blockhash: String,
    /// Last block height at which the blockhash is valid
    pub last_valid_block_height: u64,
}

/// Outcome of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Confirmation {
    pub slot: Option<u64>,
    /// Raw on-chain error payload, `None` when the transaction succeeded
    pub err: Option<Value>,
}

impl Confirmation {
    pub fn is_success(&self) -> bool {
        self.err.is_none()
    }
}
