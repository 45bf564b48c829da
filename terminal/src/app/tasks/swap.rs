//! # Swap Tasks
//!
//! Swap execution: build, sign, submit and confirm a swap for the current
//! quote, classifying every failure into a [`SwapError`].

use crate::app::state::{AppState, SwapStatus};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use lib_core::config::Network;
use lib_core::dto::{ConfirmRequest, Quote, SendOptions, SwapRequest};
use lib_core::error::{LedgerError, SwapError};
use lib_core::service::{LedgerConnection, Notifier, QuoteProvider, Wallet};
use lib_utils::format::short_signature;
use parking_lot::RwLock;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Drives one swap attempt at a time through the state machine in
/// [`SwapStatus`].
pub struct SwapExecutor {
    state: Arc<RwLock<AppState>>,
    provider: Arc<dyn QuoteProvider>,
    wallet: Arc<dyn Wallet>,
    ledger: Arc<dyn LedgerConnection>,
    notifier: Arc<dyn Notifier>,
    network: Network,
    send_options: SendOptions,
    commitment: CommitmentConfig,
}

impl SwapExecutor {
    pub fn new(
        state: Arc<RwLock<AppState>>,
        provider: Arc<dyn QuoteProvider>,
        wallet: Arc<dyn Wallet>,
        ledger: Arc<dyn LedgerConnection>,
        notifier: Arc<dyn Notifier>,
        network: Network,
        send_options: SendOptions,
    ) -> Self {
        Self {
            state,
            provider,
            wallet,
            ledger,
            notifier,
            network,
            send_options,
            commitment: CommitmentConfig::confirmed(),
        }
    }

    /// Execute a swap for the stored quote.
    ///
    /// Returns the transaction signature once confirmed. A precondition
    /// failure leaves the current attempt untouched; any later failure,
    /// including dropping the returned future, leaves it `Failed`.
    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<String, SwapError> {
        let (quote, signer) = match self.begin() {
            Ok(started) => started,
            Err(err) => {
                warn!(%err, "Swap rejected");
                self.notifier.error(&err.to_string());
                return Err(err);
            }
        };

        let mut guard = AttemptGuard {
            executor: self,
            armed: true,
        };
        let result = self.run(&quote, signer).await;
        guard.armed = false;

        match result {
            Ok(signature) => {
                self.finish(&quote, &signature);
                Ok(signature)
            }
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Precondition check; marks the attempt in flight before the first await.
    fn begin(&self) -> Result<(Arc<Quote>, Pubkey), SwapError> {
        let mut state = self.state.write();

        if state.swap.status.is_in_flight() {
            return Err(SwapError::Precondition("another swap is already in progress".to_string()));
        }

        let signer = self
            .wallet
            .public_key()
            .ok_or_else(|| SwapError::Precondition("wallet not connected".to_string()))?;

        let quote = match &state.swap.quote {
            None => return Err(SwapError::Precondition("no quote available".to_string())),
            Some(stored) if !stored.matches(&state.swap.inputs) => {
                return Err(SwapError::Precondition(
                    "quote does not match the current inputs, refresh it first".to_string(),
                ))
            }
            Some(stored) => Arc::clone(&stored.quote),
        };

        state.swap.status = SwapStatus::BuildingTransaction;
        info!(wallet = %signer, in_amount = %quote.in_amount, "Swap attempt started");
        Ok((quote, signer))
    }

    async fn run(&self, quote: &Arc<Quote>, signer: Pubkey) -> Result<String, SwapError> {
        // Step 1: Build the unsigned transaction
        self.notifier.info("Preparing transaction...");
        let request = SwapRequest::new(quote.as_ref().clone(), signer.to_string());
        let built = self
            .provider
            .build_swap_transaction(&request)
            .await
            .map_err(|e| SwapError::Build(e.to_string()))?;

        let transaction = decode_transaction(&built.swap_transaction)?;
        let blockhash = transaction.message.recent_blockhash().to_string();
        debug!(%blockhash, last_valid_block_height = built.last_valid_block_height, "Swap transaction built");

        // Step 2: Sign
        self.transition(SwapStatus::AwaitingSignature);
        self.notifier.info("Please sign the transaction in your wallet...");
        let signed = self
            .wallet
            .sign_transaction(transaction)
            .await
            .map_err(|e| SwapError::Signing(e.to_string()))?;

        // Step 3: Submit
        let raw = bincode::serialize(&signed)
            .map_err(|e| SwapError::Submission(format!("failed to serialize signed transaction: {}", e)))?;
        let signature = self
            .ledger
            .send_raw_transaction(&raw, &self.send_options)
            .await
            .map_err(|e| SwapError::Submission(e.to_string()))?;

        self.transition(SwapStatus::Submitted(signature.clone()));
        self.notifier.info(&format!(
            "Transaction sent! ID: {}... confirming",
            short_signature(&signature, 10)
        ));

        // Step 4: Confirm
        let confirm = ConfirmRequest {
            signature: signature.clone(),
            blockhash,
            last_valid_block_height: built.last_valid_block_height,
        };

        match self.ledger.confirm_transaction(&confirm, self.commitment).await {
            Ok(confirmation) => match confirmation.err {
                Some(details) => Err(SwapError::Execution {
                    signature,
                    details: details.to_string(),
                }),
                None => Ok(signature),
            },
            Err(LedgerError::BlockHeightExceeded {
                last_valid_block_height,
                ..
            }) => Err(SwapError::Expired {
                signature,
                last_valid_block_height,
            }),
            Err(LedgerError::Rpc(message)) => Err(SwapError::Confirmation { signature, message }),
        }
    }

    fn transition(&self, status: SwapStatus) {
        debug!(status = status.label(), "Swap status");
        self.state.write().swap.status = status;
    }

    fn finish(&self, quote: &Arc<Quote>, signature: &str) {
        {
            let mut state = self.state.write();
            // A consumed quote is never reused; a newer one stays
            if state
                .swap
                .quote
                .as_ref()
                .is_some_and(|stored| Arc::ptr_eq(&stored.quote, quote))
            {
                state.swap.quote = None;
            }
            state.swap.status = SwapStatus::Confirmed(signature.to_string());
            state.swap.last_signature = Some(signature.to_string());
        }

        info!(
            signature,
            explorer = %self.network.explorer_tx_url(signature),
            "Swap confirmed"
        );
        self.notifier.success(&format!("Swap succeeded! Transaction ID: {}", signature));
    }

    /// Settle an attempt whose future was dropped mid-flight.
    fn abandon(&self) {
        let err = {
            let mut state = self.state.write();
            let err = match &state.swap.status {
                SwapStatus::Submitted(signature) => SwapError::Confirmation {
                    signature: signature.clone(),
                    message: "attempt dropped before confirmation".to_string(),
                },
                status if status.is_in_flight() => {
                    SwapError::Cancelled(format!("attempt dropped while {}", status.label()))
                }
                _ => return,
            };
            state.swap.status = SwapStatus::Failed(err.clone());
            err
        };

        warn!(kind = err.kind(), error = %err, "Swap attempt abandoned");
        self.notifier.error(&format!("Swap failed: {}", err));
    }

    fn fail(&self, err: &SwapError) {
        self.state.write().swap.status = SwapStatus::Failed(err.clone());
        error!(kind = err.kind(), error = %err, "Swap failed");
        self.notifier.error(&format!("Swap failed: {}", err));
    }
}

/// Marks the attempt `Failed` if dropped while still armed
struct AttemptGuard<'a> {
    executor: &'a SwapExecutor,
    armed: bool,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.executor.abandon();
        }
    }
}

/// Decode a base64, bincode-serialized versioned transaction.
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, SwapError> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| SwapError::Build(format!("invalid base64 transaction: {}", e)))?;

    bincode::deserialize(&bytes).map_err(|e| SwapError::Build(format!("invalid transaction bytes: {}", e)))
}
