//! # Test Doubles
//!
//! Scripted collaborators for driving the swap pipeline without network
//! access: a quote provider, a wallet, a ledger connection and a
//! notification recorder.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use lib_core::config::Config;
use lib_core::dto::{ConfirmRequest, Confirmation, Quote, QuoteRequest, SendOptions, SwapRequest, SwapTransaction};
use lib_core::error::{LedgerError, ProviderError, WalletError};
use lib_core::service::{LedgerConnection, Notification, NotificationLevel, Notifier, QuoteProvider, Wallet};
use lib_core::tokens::{StaticTokenDecimals, SOL_MINT, USDC_MINT};
use lib_solana::KeypairWallet;
use parking_lot::Mutex;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::hash::Hash;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::transaction::VersionedTransaction;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use swap_terminal::{App, Services};

pub const LAST_VALID_BLOCK_HEIGHT: u64 = 1_000;

/// SOL -> USDC, 0.1 SOL, 50 bps
pub fn test_config() -> Config {
    Config {
        input_mint: SOL_MINT.to_string(),
        output_mint: USDC_MINT.to_string(),
        amount: "0.1".to_string(),
        slippage_bps: 50,
        quote_debounce_ms: 500,
        ..Config::default()
    }
}

/// Jupiter-shaped quote
pub fn quote(in_amount: &str, out_amount: &str) -> Quote {
    serde_json::from_value(serde_json::json!({
        "inputMint": SOL_MINT,
        "inAmount": in_amount,
        "outputMint": USDC_MINT,
        "outAmount": out_amount,
        "otherAmountThreshold": out_amount,
        "swapMode": "ExactIn",
        "slippageBps": 50,
        "priceImpactPct": "0.0001",
        "routePlan": [{
            "swapInfo": {
                "ammKey": "HJPjoWUrhoZzkNfRpHuieeFk9WcZWjwy6PBjZ81ngndJ",
                "label": "Whirlpool",
                "inputMint": SOL_MINT,
                "outputMint": USDC_MINT,
                "inAmount": in_amount,
                "outAmount": out_amount
            },
            "percent": 100
        }]
    }))
    .expect("Quote fixture should deserialize")
}

/// Base64 unsigned transaction whose fee payer is `payer`
pub fn unsigned_transaction(payer: &Pubkey) -> String {
    let message = Message::new_with_blockhash(&[], Some(payer), &Hash::new_unique());
    let tx = VersionedTransaction {
        signatures: vec![Signature::default(); message.header.num_required_signatures as usize],
        message: VersionedMessage::Legacy(message),
    };
    BASE64.encode(bincode::serialize(&tx).expect("Transaction should serialize"))
}

// ============================================================================
// Quote provider
// ============================================================================

struct Scripted {
    delay: Duration,
    result: Result<Quote, ProviderError>,
}

/// Quote provider answering from a script, falling back to a fixed quote
pub struct MockQuoteProvider {
    script: Mutex<VecDeque<Scripted>>,
    fallback: Quote,
    requests: Mutex<Vec<QuoteRequest>>,
    swap_requests: Mutex<Vec<SwapRequest>>,
    build_error: Mutex<Option<ProviderError>>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: quote("100000000", "11845000"),
            requests: Mutex::new(Vec::new()),
            swap_requests: Mutex::new(Vec::new()),
            build_error: Mutex::new(None),
        }
    }

    /// Queue the answer for the next quote request
    pub fn respond(&self, result: Result<Quote, ProviderError>) {
        self.respond_after(Duration::ZERO, result);
    }

    /// Queue an answer delivered after `delay`
    pub fn respond_after(&self, delay: Duration, result: Result<Quote, ProviderError>) {
        self.script.lock().push_back(Scripted { delay, result });
    }

    pub fn fail_build(&self, err: ProviderError) {
        *self.build_error.lock() = Some(err);
    }

    pub fn quote_calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.requests.lock().clone()
    }

    pub fn swap_calls(&self) -> usize {
        self.swap_requests.lock().len()
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, ProviderError> {
        self.requests.lock().push(request.clone());
        let scripted = self.script.lock().pop_front();

        match scripted {
            Some(Scripted { delay, result }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(self.fallback.clone()),
        }
    }

    async fn build_swap_transaction(&self, request: &SwapRequest) -> Result<SwapTransaction, ProviderError> {
        self.swap_requests.lock().push(request.clone());
        tokio::task::yield_now().await;

        if let Some(err) = self.build_error.lock().clone() {
            return Err(err);
        }

        let payer: Pubkey = request
            .user_public_key
            .parse()
            .map_err(|_| ProviderError::Rejected {
                message: "invalid userPublicKey".to_string(),
            })?;

        Ok(SwapTransaction {
            swap_transaction: unsigned_transaction(&payer),
            last_valid_block_height: LAST_VALID_BLOCK_HEIGHT,
            prioritization_fee_lamports: None,
        })
    }
}

// ============================================================================
// Wallet
// ============================================================================

/// Keypair wallet that can be told to refuse signing or to never answer
pub struct MockWallet {
    inner: KeypairWallet,
    reject: AtomicBool,
    hang: AtomicBool,
}

impl MockWallet {
    pub fn connected() -> Self {
        Self {
            inner: KeypairWallet::from_keypair(Keypair::new()),
            reject: AtomicBool::new(false),
            hang: AtomicBool::new(false),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            inner: KeypairWallet::new(),
            reject: AtomicBool::new(false),
            hang: AtomicBool::new(false),
        }
    }

    pub fn rejecting() -> Self {
        let wallet = Self::connected();
        wallet.set_reject(true);
        wallet
    }

    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    /// Signing requests stay pending while set
    pub fn set_hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    pub fn connect(&self) {
        self.inner.connect(Keypair::new());
    }

    pub fn disconnect(&self) {
        self.inner.disconnect();
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.inner.public_key()
    }

    async fn sign_transaction(&self, transaction: VersionedTransaction) -> Result<VersionedTransaction, WalletError> {
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.reject.load(Ordering::SeqCst) {
            return Err(WalletError::Rejected("declined in wallet".to_string()));
        }
        self.inner.sign_transaction(transaction).await
    }
}

// ============================================================================
// Ledger
// ============================================================================

/// Ledger connection with scripted submit and confirm results
pub struct MockLedger {
    send_result: Mutex<Result<String, LedgerError>>,
    confirm_result: Mutex<Result<Confirmation, LedgerError>>,
    submitted: Mutex<Vec<Vec<u8>>>,
    send_options: Mutex<Vec<SendOptions>>,
    confirm_requests: Mutex<Vec<(ConfirmRequest, CommitmentConfig)>>,
    hang_confirm: AtomicBool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            send_result: Mutex::new(Ok("5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW".to_string())),
            confirm_result: Mutex::new(Ok(Confirmation {
                slot: Some(42),
                err: None,
            })),
            submitted: Mutex::new(Vec::new()),
            send_options: Mutex::new(Vec::new()),
            confirm_requests: Mutex::new(Vec::new()),
            hang_confirm: AtomicBool::new(false),
        }
    }

    pub fn set_send_result(&self, result: Result<String, LedgerError>) {
        *self.send_result.lock() = result;
    }

    pub fn set_confirm_result(&self, result: Result<Confirmation, LedgerError>) {
        *self.confirm_result.lock() = result;
    }

    /// Confirmation requests stay pending while set
    pub fn set_hang_confirm(&self, hang: bool) {
        self.hang_confirm.store(hang, Ordering::SeqCst);
    }

    pub fn submits(&self) -> usize {
        self.submitted.lock().len()
    }

    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().clone()
    }

    pub fn send_options(&self) -> Vec<SendOptions> {
        self.send_options.lock().clone()
    }

    pub fn confirm_requests(&self) -> Vec<(ConfirmRequest, CommitmentConfig)> {
        self.confirm_requests.lock().clone()
    }
}

#[async_trait]
impl LedgerConnection for MockLedger {
    async fn send_raw_transaction(&self, raw_transaction: &[u8], options: &SendOptions) -> Result<String, LedgerError> {
        self.submitted.lock().push(raw_transaction.to_vec());
        self.send_options.lock().push(options.clone());
        tokio::task::yield_now().await;
        self.send_result.lock().clone()
    }

    async fn confirm_transaction(
        &self,
        request: &ConfirmRequest,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, LedgerError> {
        self.confirm_requests.lock().push((request.clone(), commitment));
        tokio::task::yield_now().await;
        if self.hang_confirm.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.confirm_result.lock().clone()
    }
}

// ============================================================================
// Notifier
// ============================================================================

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationLevel::Error)
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationLevel::Success)
    }

    pub fn clear(&self) {
        self.notifications.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

// ============================================================================
// Harness
// ============================================================================

/// App wired to test doubles, with handles kept for assertions
pub struct Harness {
    pub app: App,
    pub provider: Arc<MockQuoteProvider>,
    pub wallet: Arc<MockWallet>,
    pub ledger: Arc<MockLedger>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_wallet(MockWallet::connected())
    }

    pub fn with_wallet(wallet: MockWallet) -> Self {
        Self::build(test_config(), wallet)
    }

    pub fn build(config: Config, wallet: MockWallet) -> Self {
        let provider = Arc::new(MockQuoteProvider::new());
        let wallet = Arc::new(wallet);
        let ledger = Arc::new(MockLedger::new());
        let notifier = Arc::new(RecordingNotifier::default());

        let app = App::new(
            &config,
            Services {
                provider: provider.clone(),
                wallet: wallet.clone(),
                ledger: ledger.clone(),
                notifier: notifier.clone(),
                decimals: Arc::new(StaticTokenDecimals::with_known_mints()),
            },
        );

        Self {
            app,
            provider,
            wallet,
            ledger,
            notifier,
        }
    }

    pub fn wallet_pubkey(&self) -> Pubkey {
        self.wallet.public_key().expect("Wallet should be connected in test")
    }
}
