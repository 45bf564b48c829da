//! # Application Orchestrator
//!
//! [`App`] owns the swap inputs and the current quote, turns input events
//! into debounced quote fetches and exposes the two user actions:
//! [`App::refresh_quote`] and [`App::confirm_swap`].
//!
//! ## Event Flow
//!
//! ```text
//! AppEvent ──► handle_event ──► QuoteFetcher (debounce 500ms) ──► QuoteProvider
//!                                     │
//!                                     ▼
//!                               AppState.swap.quote ──► QuoteView
//!
//! confirm_swap ──► SwapExecutor ──► QuoteProvider (build) ──► Wallet (sign)
//!                                          ──► LedgerConnection (submit, confirm) ──► Notifier
//! ```
//!
//! Mint and slippage changes clear the quote synchronously; amount changes
//! only reschedule the fetch, leaving the old quote displayed as provisional.

pub mod events;
pub mod state;
pub mod tasks;
pub mod view;

pub use events::AppEvent;
pub use state::{AppState, StoredQuote, SwapInputs, SwapStatus};
pub use tasks::{QuoteFetcher, QuoteOutcome, SwapExecutor};
pub use view::QuoteView;

use crate::utils::amount::parse_amount;
use lib_core::config::Config;
use lib_core::dto::{Quote, SendOptions};
use lib_core::error::SwapError;
use lib_core::service::{LedgerConnection, Notifier, QuoteProvider, TokenDecimals, Wallet};
use lib_utils::validation::{parse_slippage_percent, validate_slippage_bps};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Collaborators injected into the [`App`]
#[derive(Clone)]
pub struct Services {
    pub provider: Arc<dyn QuoteProvider>,
    pub wallet: Arc<dyn Wallet>,
    pub ledger: Arc<dyn LedgerConnection>,
    pub notifier: Arc<dyn Notifier>,
    pub decimals: Arc<dyn TokenDecimals>,
}

/// Quote/swap orchestrator
pub struct App {
    /// Shared state (quote, inputs, swap status)
    pub state: Arc<RwLock<AppState>>,
    quotes: QuoteFetcher,
    executor: SwapExecutor,
    wallet: Arc<dyn Wallet>,
    decimals: Arc<dyn TokenDecimals>,
    notifier: Arc<dyn Notifier>,
}

impl App {
    /// Build the orchestrator with inputs, debounce window and submission
    /// options taken from `config`.
    pub fn new(config: &Config, services: Services) -> Self {
        let state = Arc::new(RwLock::new(AppState::new(
            config.network,
            SwapInputs::from_config(config),
        )));

        let quotes = QuoteFetcher::new(
            Arc::clone(&state),
            Arc::clone(&services.provider),
            Arc::clone(&services.wallet),
            Arc::clone(&services.decimals),
            Arc::clone(&services.notifier),
            config.quote_debounce(),
        );

        let send_options = SendOptions {
            skip_preflight: true,
            max_retries: Some(config.submit_max_retries),
        };

        let executor = SwapExecutor::new(
            Arc::clone(&state),
            services.provider,
            Arc::clone(&services.wallet),
            services.ledger,
            Arc::clone(&services.notifier),
            config.network,
            send_options,
        );

        Self {
            state,
            quotes,
            executor,
            wallet: services.wallet,
            decimals: services.decimals,
            notifier: services.notifier,
        }
    }

    /// Apply an input event.
    ///
    /// Must be called from within a tokio runtime (the debounce timer is a
    /// spawned task).
    pub fn handle_event(&self, event: AppEvent) {
        debug!(?event, "Handling event");
        let invalidates = event.invalidates_quote();

        let changed = {
            let mut state = self.state.write();
            apply_event(&mut state.swap.inputs, event)
        };

        match changed {
            Ok(true) => {}
            Ok(false) => return,
            Err(message) => {
                warn!(%message, "Input rejected");
                self.notifier.error(&message);
                return;
            }
        }

        if invalidates {
            self.quotes.invalidate();
        }
        self.quotes.schedule();
    }

    /// Fetch a quote now, bypassing the debounce window.
    pub async fn refresh_quote(&self) -> Result<QuoteOutcome, SwapError> {
        self.quotes.request_now().await
    }

    /// Execute a swap for the current quote.
    pub async fn confirm_swap(&self) -> Result<String, SwapError> {
        self.executor.execute().await
    }

    /// Refresh is possible with a wallet, a positive amount and nothing in progress
    pub fn can_refresh(&self) -> bool {
        let state = self.state.read();
        self.wallet.is_connected()
            && parse_amount(&state.swap.inputs.amount).is_ok()
            && !state.swap.quote_loading
            && !state.swap.status.is_in_flight()
    }

    /// Swap is possible with a wallet and a quote for the current inputs
    pub fn can_swap(&self) -> bool {
        let state = self.state.read();
        self.wallet.is_connected()
            && state.swap.current_quote().is_some()
            && !state.swap.quote_loading
            && !state.swap.status.is_in_flight()
    }

    pub fn inputs(&self) -> SwapInputs {
        self.state.read().swap.inputs.clone()
    }

    pub fn status(&self) -> SwapStatus {
        self.state.read().swap.status.clone()
    }

    pub fn is_quote_loading(&self) -> bool {
        self.state.read().swap.quote_loading
    }

    /// The stored quote, only if it matches the current inputs
    pub fn current_quote(&self) -> Option<Arc<Quote>> {
        self.state
            .read()
            .swap
            .current_quote()
            .map(|stored| Arc::clone(&stored.quote))
    }

    /// The stored quote, possibly provisional
    pub fn stored_quote(&self) -> Option<StoredQuote> {
        self.state.read().swap.quote.clone()
    }

    /// Display model of the stored quote
    pub fn quote_view(&self) -> Option<QuoteView> {
        let state = self.state.read();
        state
            .swap
            .quote
            .as_ref()
            .map(|stored| QuoteView::new(stored, &state.swap.inputs, self.decimals.as_ref()))
    }

    /// Block explorer link for a transaction on the configured network
    pub fn explorer_url(&self, signature: &str) -> String {
        self.state.read().network.explorer_tx_url(signature)
    }

    pub fn quote_fetcher(&self) -> &QuoteFetcher {
        &self.quotes
    }
}

/// Mutate `inputs`; `Ok(false)` when the event changes nothing.
fn apply_event(inputs: &mut SwapInputs, event: AppEvent) -> Result<bool, String> {
    fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    match event {
        AppEvent::InputMintChanged(mint) => Ok(set(&mut inputs.input_mint, mint.trim().to_string())),
        AppEvent::OutputMintChanged(mint) => Ok(set(&mut inputs.output_mint, mint.trim().to_string())),
        AppEvent::AmountChanged(amount) => Ok(set(&mut inputs.amount, amount)),
        AppEvent::SlippageChanged(bps) => {
            validate_slippage_bps(bps)?;
            Ok(set(&mut inputs.slippage_bps, bps))
        }
        AppEvent::SlippagePercentChanged(percent) => {
            let bps = parse_slippage_percent(&percent)?;
            validate_slippage_bps(bps)?;
            Ok(set(&mut inputs.slippage_bps, bps))
        }
        AppEvent::WalletChanged => Ok(true),
    }
}
