//! # Quote Data Transfer Objects
//!
//! Quote request parameters and the quote returned by the aggregator.
//!
//! ## Wire Format
//!
//! Field names are **camelCase** on the wire, matching the Jupiter v6 API:
//!
//! ```json
//! {
//!   "inputMint": "So11111111111111111111111111111111111111112",
//!   "inAmount": "100000000",
//!   "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
//!   "outAmount": "11845000",
//!   "otherAmountThreshold": "11785775",
//!   "swapMode": "ExactIn",
//!   "slippageBps": 50,
//!   "priceImpactPct": "0.0001",
//!   "routePlan": [
//!     { "swapInfo": { "ammKey": "...", "label": "Whirlpool", "inputMint": "...", "outputMint": "...",
//!                     "inAmount": "100000000", "outAmount": "11845000" }, "percent": 100 }
//!   ],
//!   "contextSlot": 291546120,
//!   "timeTaken": 0.012
//! }
//! ```
//!
//! A quote is echoed back verbatim when building the swap transaction, so
//! fields not modelled here are kept in `extra` and serialized again.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label shown for route steps the provider left unnamed.
pub const UNKNOWN_ROUTE_LABEL: &str = "Unknown";

/// Parameters of a quote request, amount already in smallest units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Priced proposal for swapping `in_amount` of `input_mint` into `output_mint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input_mint: String,
    /// Smallest units, integer string
    pub in_amount: String,
    pub output_mint: String,
    /// Smallest units, integer string
    pub out_amount: String,
    /// Minimum output after slippage, integer string
    pub other_amount_threshold: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_mode: Option<String>,
    pub slippage_bps: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee: Option<PlatformFee>,
    /// Fraction, decimal string (`"0.01"` is 1%)
    pub price_impact_pct: String,
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_slot: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    /// Route step labels in order, unnamed steps shown as [`UNKNOWN_ROUTE_LABEL`].
    pub fn route_labels(&self) -> Vec<&str> {
        self.route_plan
            .iter()
            .map(|step| step.swap_info.label.as_deref().unwrap_or(UNKNOWN_ROUTE_LABEL))
            .collect()
    }
}

/// Platform fee charged on top of the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFee {
    pub amount: String,
    pub fee_bps: u16,
}

/// A step in the aggregator's routing plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub swap_info: SwapInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Details about a single pool hop within a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub amm_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_mint: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
