//! # Quote Tasks
//!
//! Debounced, cancellable quote fetching with stale-response suppression.
//!
//! One sequence counter drives both mechanisms. Every schedule, manual
//! refresh or clear takes a new sequence number; a pending debounce timer
//! or an in-flight response whose number is no longer the latest is
//! dropped. The counter is only advanced while the state write lock is
//! held, so "check latest, then store" is atomic with respect to it.

use crate::app::state::{AppState, StoredQuote, SwapInputs};
use crate::debug::spawn_tracked;
use crate::utils::amount::{parse_amount, to_smallest_unit};
use lib_core::dto::{Quote, QuoteRequest};
use lib_core::error::SwapError;
use lib_core::service::{Notifier, QuoteProvider, TokenDecimals, Wallet};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Result of a quote request that did not fail
#[derive(Debug, Clone)]
pub enum QuoteOutcome {
    /// A quote was fetched and stored
    Fetched(Arc<Quote>),
    /// Guard failed (no wallet, amount not positive); the quote was cleared
    NoOp,
    /// Superseded by a later request; the response was discarded
    Stale,
}

struct Inner {
    state: Arc<RwLock<AppState>>,
    provider: Arc<dyn QuoteProvider>,
    wallet: Arc<dyn Wallet>,
    decimals: Arc<dyn TokenDecimals>,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    seq: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

/// Debounced quote fetcher
///
/// Cloning is cheap; clones share the timer and sequence counter.
#[derive(Clone)]
pub struct QuoteFetcher {
    inner: Arc<Inner>,
}

impl QuoteFetcher {
    pub fn new(
        state: Arc<RwLock<AppState>>,
        provider: Arc<dyn QuoteProvider>,
        wallet: Arc<dyn Wallet>,
        decimals: Arc<dyn TokenDecimals>,
        notifier: Arc<dyn Notifier>,
        debounce: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state,
                provider,
                wallet,
                decimals,
                notifier,
                debounce,
                seq: AtomicU64::new(0),
                pending: Mutex::new(None),
            }),
        }
    }

    /// Latest issued sequence number
    pub fn latest_seq(&self) -> u64 {
        self.inner.seq.load(Ordering::SeqCst)
    }

    /// A debounce timer is waiting to fire
    pub fn has_pending_timer(&self) -> bool {
        self.inner
            .pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// (Re)start the debounce timer for the current inputs.
    ///
    /// Returns `false` when the guard fails; the stored quote is then
    /// cleared synchronously and no timer is started.
    pub fn schedule(&self) -> bool {
        self.cancel_pending();

        let seq = {
            let mut state = self.inner.state.write();
            let seq = self.next_seq();

            if let Err(reason) = self.guard(&state.swap.inputs) {
                debug!(seq, reason, "Quote guard failed, clearing quote");
                state.swap.quote = None;
                state.swap.quote_loading = false;
                return false;
            }
            seq
        };

        let this = self.clone();
        let handle = spawn_tracked("quote_debounce", async move {
            tokio::time::sleep(this.inner.debounce).await;
            if !this.is_latest(seq) {
                return;
            }
            // Detach the request so a later cancel only ignores it
            spawn_tracked("quote_fetch", async move {
                // Failures are already logged and notified
                let _ = this.fetch(seq).await;
            });
        });

        debug!(seq, debounce_ms = self.inner.debounce.as_millis() as u64, "Quote fetch scheduled");
        *self.inner.pending.lock() = Some(handle);
        true
    }

    /// Fetch immediately, bypassing the debounce window.
    pub async fn request_now(&self) -> Result<QuoteOutcome, SwapError> {
        self.cancel_pending();
        let seq = {
            let _state = self.inner.state.write();
            self.next_seq()
        };
        self.fetch(seq).await
    }

    /// Drop the stored quote, cancel any pending timer and invalidate
    /// in-flight responses.
    pub fn invalidate(&self) {
        self.cancel_pending();
        let mut state = self.inner.state.write();
        let seq = self.next_seq();
        state.swap.quote = None;
        state.swap.quote_loading = false;
        debug!(seq, "Quote invalidated");
    }

    /// Abort the pending debounce timer, if any.
    pub fn cancel_pending(&self) {
        if let Some(handle) = self.inner.pending.lock().take() {
            handle.abort();
        }
    }

    async fn fetch(&self, seq: u64) -> Result<QuoteOutcome, SwapError> {
        let inputs = {
            let mut state = self.inner.state.write();
            if !self.is_latest(seq) {
                return Ok(QuoteOutcome::Stale);
            }
            let inputs = state.swap.inputs.clone();
            if let Err(reason) = self.guard(&inputs) {
                debug!(seq, reason, "Quote guard failed, clearing quote");
                state.swap.quote = None;
                state.swap.quote_loading = false;
                return Ok(QuoteOutcome::NoOp);
            }
            inputs
        };

        let request = match self.build_request(&inputs) {
            Ok(request) => request,
            Err(err) if err.is_silent() => {
                debug!(seq, %err, "Amount not quotable, clearing quote");
                self.clear_if_latest(seq);
                return Ok(QuoteOutcome::NoOp);
            }
            Err(err) => {
                if self.clear_if_latest(seq) {
                    error!(seq, %err, "Quote request not sent");
                    self.inner.notifier.error(&err.to_string());
                }
                return Err(err);
            }
        };

        {
            let mut state = self.inner.state.write();
            if !self.is_latest(seq) {
                return Ok(QuoteOutcome::Stale);
            }
            state.swap.quote_loading = true;
        }

        debug!(
            seq,
            input_mint = %request.input_mint,
            output_mint = %request.output_mint,
            amount = request.amount,
            slippage_bps = request.slippage_bps,
            "Requesting quote"
        );

        let result = self.inner.provider.get_quote(&request).await;

        let mut state = self.inner.state.write();
        if !self.is_latest(seq) {
            warn!(seq, latest = self.latest_seq(), "Discarding stale quote response");
            return Ok(QuoteOutcome::Stale);
        }
        state.swap.quote_loading = false;

        match result {
            Ok(quote) => {
                let quote = Arc::new(quote);
                state.swap.quote = Some(StoredQuote {
                    quote: Arc::clone(&quote),
                    inputs,
                    seq,
                });
                drop(state);

                info!(
                    seq,
                    in_amount = %quote.in_amount,
                    out_amount = %quote.out_amount,
                    price_impact_pct = %quote.price_impact_pct,
                    "Quote updated"
                );
                self.inner.notifier.success("Quote updated!");
                Ok(QuoteOutcome::Fetched(quote))
            }
            Err(provider_err) => {
                state.swap.quote = None;
                drop(state);

                let err = SwapError::Quote(provider_err.user_message());
                error!(seq, error = %provider_err, "Quote request failed");
                self.inner.notifier.error(&err.to_string());
                Err(err)
            }
        }
    }

    fn build_request(&self, inputs: &SwapInputs) -> Result<QuoteRequest, SwapError> {
        let decimals = self
            .inner
            .decimals
            .decimals(&inputs.input_mint)
            .ok_or_else(|| SwapError::Quote(format!("unknown token decimals for mint {}", inputs.input_mint)))?;

        let amount = to_smallest_unit(&inputs.amount, decimals)?;

        Ok(QuoteRequest {
            input_mint: inputs.input_mint.clone(),
            output_mint: inputs.output_mint.clone(),
            amount,
            slippage_bps: inputs.slippage_bps,
        })
    }

    /// No wallet or a non-positive amount means nothing to quote
    fn guard(&self, inputs: &SwapInputs) -> Result<(), &'static str> {
        if !self.inner.wallet.is_connected() {
            return Err("wallet not connected");
        }
        if parse_amount(&inputs.amount).is_err() {
            return Err("amount is not a positive number");
        }
        Ok(())
    }

    fn clear_if_latest(&self, seq: u64) -> bool {
        let mut state = self.inner.state.write();
        if !self.is_latest(seq) {
            return false;
        }
        state.swap.quote = None;
        state.swap.quote_loading = false;
        true
    }

    fn next_seq(&self) -> u64 {
        self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest_seq() == seq
    }
}
