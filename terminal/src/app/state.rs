//! # Application State
//!
//! State shared between the orchestrator and its async tasks, behind
//! `Arc<parking_lot::RwLock<AppState>>`. Locks are never held across an
//! `.await`.

use lib_core::config::{Config, Network};
use lib_core::dto::Quote;
use lib_core::error::SwapError;
use std::sync::Arc;

/// User-editable swap parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapInputs {
    pub input_mint: String,
    pub output_mint: String,
    /// Human-decimal amount, kept as typed
    pub amount: String,
    pub slippage_bps: u16,
}

impl SwapInputs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            input_mint: config.input_mint.clone(),
            output_mint: config.output_mint.clone(),
            amount: config.amount.clone(),
            slippage_bps: config.slippage_bps,
        }
    }
}

/// A quote together with the inputs that produced it
#[derive(Debug, Clone)]
pub struct StoredQuote {
    pub quote: Arc<Quote>,
    pub inputs: SwapInputs,
    /// Request sequence number that produced this quote
    pub seq: u64,
}

impl StoredQuote {
    /// Whether the quote still prices the given inputs
    pub fn matches(&self, inputs: &SwapInputs) -> bool {
        &self.inputs == inputs
    }
}

/// Swap attempt state machine
///
/// `Idle -> BuildingTransaction -> AwaitingSignature -> Submitted -> Confirmed`,
/// with `Failed` reachable from every non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SwapStatus {
    #[default]
    Idle,
    BuildingTransaction,
    AwaitingSignature,
    /// Broadcast accepted; holds the transaction signature
    Submitted(String),
    /// Confirmed at "confirmed" commitment; holds the transaction signature
    Confirmed(String),
    Failed(SwapError),
}

impl SwapStatus {
    /// An attempt is between its precondition check and a terminal state
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            SwapStatus::BuildingTransaction | SwapStatus::AwaitingSignature | SwapStatus::Submitted(_)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SwapStatus::Confirmed(_) | SwapStatus::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            SwapStatus::Idle => "Idle",
            SwapStatus::BuildingTransaction => "BuildingTransaction",
            SwapStatus::AwaitingSignature => "AwaitingSignature",
            SwapStatus::Submitted(_) => "Submitted",
            SwapStatus::Confirmed(_) => "Confirmed",
            SwapStatus::Failed(_) => "Failed",
        }
    }
}

/// Comprehensive swap state
#[derive(Debug, Clone)]
pub struct SwapState {
    pub inputs: SwapInputs,
    /// Current swap quote (if any)
    pub quote: Option<StoredQuote>,
    /// A live quote request is outstanding
    pub quote_loading: bool,
    /// Current (or last finished) swap attempt
    pub status: SwapStatus,
    /// Signature of the last confirmed swap
    pub last_signature: Option<String>,
}

impl SwapState {
    pub fn new(inputs: SwapInputs) -> Self {
        Self {
            inputs,
            quote: None,
            quote_loading: false,
            status: SwapStatus::Idle,
            last_signature: None,
        }
    }

    /// The stored quote, only if it was produced by the current inputs
    pub fn current_quote(&self) -> Option<&StoredQuote> {
        self.quote.as_ref().filter(|q| q.matches(&self.inputs))
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub network: Network,
    pub swap: SwapState,
}

impl AppState {
    pub fn new(network: Network, inputs: SwapInputs) -> Self {
        Self {
            network,
            swap: SwapState::new(inputs),
        }
    }
}
