//! # Application Events
//!
//! Input mutations delivered to [`App::handle_event`](crate::app::App::handle_event).

/// User edits and wallet changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Input token mint changed
    InputMintChanged(String),
    /// Output token mint changed
    OutputMintChanged(String),
    /// Amount text changed (human decimal, as typed)
    AmountChanged(String),
    /// Slippage changed, in basis points
    SlippageChanged(u16),
    /// Slippage changed, as a percentage string ("0.5" is 50 bps)
    SlippagePercentChanged(String),
    /// Wallet connected, disconnected or switched accounts
    WalletChanged,
}

impl AppEvent {
    /// Events that invalidate the current quote immediately
    pub fn invalidates_quote(&self) -> bool {
        matches!(
            self,
            AppEvent::InputMintChanged(_)
                | AppEvent::OutputMintChanged(_)
                | AppEvent::SlippageChanged(_)
                | AppEvent::SlippagePercentChanged(_)
        )
    }
}
