//! # Swap Flow Tests
//!
//! End-to-end behaviour of the orchestrator against scripted collaborators:
//! debouncing, stale-response suppression, quote invalidation and the swap
//! state machine. Timer-driven tests run on tokio's paused clock.

mod common;

use common::{quote, Harness, MockWallet, LAST_VALID_BLOCK_HEIGHT};
use lib_core::dto::Confirmation;
use lib_core::error::{LedgerError, ProviderError, SwapError};
use lib_core::service::Wallet;
use lib_core::tokens::{SOL_MINT, USDC_DEVNET_MINT};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::transaction::VersionedTransaction;
use std::time::Duration;
use swap_terminal::{AppEvent, QuoteOutcome, SwapStatus};

async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Harness with a quote for the configured inputs already stored
async fn quoted() -> Harness {
    let harness = Harness::new();
    let outcome = harness.app.refresh_quote().await.expect("Quote should be fetched in test");
    assert!(matches!(outcome, QuoteOutcome::Fetched(_)));
    harness.notifier.clear();
    harness
}

// ============================================================================
// Quoting
// ============================================================================

#[tokio::test]
async fn test_quote_sol_to_usdc_display() {
    // Arrange
    let harness = Harness::new();
    harness.provider.respond(Ok(quote("100000000", "11845000")));

    // Act
    let outcome = harness.app.refresh_quote().await.unwrap();

    // Assert
    assert!(matches!(outcome, QuoteOutcome::Fetched(_)));
    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount, 100_000_000);
    assert_eq!(requests[0].input_mint, SOL_MINT);
    assert_eq!(requests[0].slippage_bps, 50);

    let view = harness.app.quote_view().expect("Quote view should exist");
    assert_eq!(view.input_amount, "0.1000");
    assert_eq!(view.output_amount, "11.845000");
    assert!(!view.provisional);
    assert!(harness.app.can_swap());
    assert_eq!(harness.notifier.successes(), vec!["Quote updated!".to_string()]);
    assert!(!harness.app.is_quote_loading());
}

#[tokio::test]
async fn test_provider_rejection_clears_quote_and_notifies_once() {
    // Arrange
    let harness = quoted().await;
    harness.provider.respond(Err(ProviderError::Rejected {
        message: "insufficient liquidity".to_string(),
    }));

    // Act
    let result = harness.app.refresh_quote().await;

    // Assert
    assert_eq!(result.unwrap_err(), SwapError::Quote("insufficient liquidity".to_string()));
    assert!(harness.app.stored_quote().is_none());
    assert!(!harness.app.is_quote_loading());

    let errors = harness.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("insufficient liquidity"));
}

#[tokio::test(start_paused = true)]
async fn test_rapid_amount_changes_collapse_into_one_request() {
    // Arrange
    let harness = Harness::new();

    // Act
    harness.app.handle_event(AppEvent::AmountChanged("0.2".to_string()));
    settle(200).await;
    harness.app.handle_event(AppEvent::AmountChanged("0.3".to_string()));
    settle(200).await;
    harness.app.handle_event(AppEvent::AmountChanged("0.4".to_string()));
    settle(400).await;
    assert_eq!(harness.provider.quote_calls(), 0);
    settle(200).await;

    // Assert
    let requests = harness.provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount, 400_000_000);
    assert!(harness.app.stored_quote().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    // Arrange: the first request answers after the second one
    let harness = Harness::new();
    harness
        .provider
        .respond_after(Duration::from_secs(2), Ok(quote("200000000", "1")));
    harness
        .provider
        .respond_after(Duration::from_millis(100), Ok(quote("300000000", "35535000")));

    // Act
    harness.app.handle_event(AppEvent::AmountChanged("0.2".to_string()));
    settle(600).await;
    assert_eq!(harness.provider.quote_calls(), 1);
    assert!(harness.app.is_quote_loading());

    harness.app.handle_event(AppEvent::AmountChanged("0.3".to_string()));
    settle(700).await;
    assert_eq!(harness.provider.quote_calls(), 2);

    // Let the slow response arrive
    settle(2_000).await;

    // Assert
    let stored = harness.app.stored_quote().expect("Quote should be stored");
    assert_eq!(stored.quote.out_amount, "35535000");
    assert_eq!(stored.inputs.amount, "0.3");
    assert!(!harness.app.is_quote_loading());
    assert_eq!(harness.notifier.successes().len(), 1);
}

#[tokio::test]
async fn test_mint_and_slippage_changes_clear_quote_synchronously() {
    let harness = quoted().await;

    harness
        .app
        .handle_event(AppEvent::OutputMintChanged(USDC_DEVNET_MINT.to_string()));
    assert!(harness.app.stored_quote().is_none());
    assert!(!harness.app.can_swap());

    let outcome = harness.app.refresh_quote().await.unwrap();
    assert!(matches!(outcome, QuoteOutcome::Fetched(_)));

    harness.app.handle_event(AppEvent::SlippageChanged(100));
    assert!(harness.app.stored_quote().is_none());
    assert_eq!(harness.app.inputs().slippage_bps, 100);
}

#[tokio::test]
async fn test_amount_change_keeps_provisional_quote() {
    let harness = quoted().await;

    harness.app.handle_event(AppEvent::AmountChanged("0.25".to_string()));

    assert!(harness.app.stored_quote().is_some());
    assert!(harness.app.current_quote().is_none());
    assert!(harness.app.quote_view().expect("Quote view should exist").provisional);
    assert!(harness.app.quote_fetcher().has_pending_timer());

    // A provisional quote cannot be swapped
    let err = harness.app.confirm_swap().await.unwrap_err();
    assert!(matches!(err, SwapError::Precondition(_)));
    assert_eq!(harness.app.status(), SwapStatus::Idle);
    assert_eq!(harness.provider.swap_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_guard_without_wallet_makes_no_request() {
    let harness = Harness::with_wallet(MockWallet::disconnected());

    let outcome = harness.app.refresh_quote().await.unwrap();
    assert!(matches!(outcome, QuoteOutcome::NoOp));

    harness.app.handle_event(AppEvent::AmountChanged("1".to_string()));
    settle(1_000).await;

    assert_eq!(harness.provider.quote_calls(), 0);
    assert!(harness.app.stored_quote().is_none());
    assert!(!harness.app.can_refresh());
}

#[tokio::test(start_paused = true)]
async fn test_guard_zero_amount_clears_quote() {
    let harness = quoted().await;

    harness.app.handle_event(AppEvent::AmountChanged("0".to_string()));
    assert!(harness.app.stored_quote().is_none());
    assert!(!harness.app.quote_fetcher().has_pending_timer());

    settle(1_000).await;
    assert_eq!(harness.provider.quote_calls(), 1);
    assert!(harness.notifier.errors().is_empty());
}

#[tokio::test]
async fn test_wallet_disconnect_clears_quote() {
    let harness = quoted().await;

    harness.wallet.disconnect();
    harness.app.handle_event(AppEvent::WalletChanged);

    assert!(harness.app.stored_quote().is_none());
}

#[tokio::test]
async fn test_invalid_slippage_is_rejected() {
    let harness = quoted().await;

    harness
        .app
        .handle_event(AppEvent::SlippagePercentChanged("abc".to_string()));

    assert_eq!(harness.app.inputs().slippage_bps, 50);
    assert!(harness.app.stored_quote().is_some());
    assert_eq!(harness.notifier.errors().len(), 1);
}

// ============================================================================
// Swapping
// ============================================================================

#[tokio::test]
async fn test_successful_swap() {
    // Arrange
    let harness = quoted().await;
    let signer = harness.wallet_pubkey();

    // Act
    let signature = harness.app.confirm_swap().await.unwrap();

    // Assert
    assert_eq!(harness.app.status(), SwapStatus::Confirmed(signature.clone()));
    assert!(harness.app.stored_quote().is_none());
    assert_eq!(harness.ledger.submits(), 1);

    let options = &harness.ledger.send_options()[0];
    assert!(options.skip_preflight);
    assert_eq!(options.max_retries, Some(5));

    let (confirm, commitment) = &harness.ledger.confirm_requests()[0];
    assert_eq!(confirm.signature, signature);
    assert_eq!(confirm.last_valid_block_height, LAST_VALID_BLOCK_HEIGHT);
    assert_eq!(*commitment, CommitmentConfig::confirmed());

    let raw = &harness.ledger.submitted()[0];
    let signed: VersionedTransaction = bincode::deserialize(raw).unwrap();
    assert_eq!(signed.message.static_account_keys()[0], signer);
    assert!(signed.signatures[0].verify(&signer.to_bytes(), &signed.message.serialize()));

    let successes = harness.notifier.successes();
    assert_eq!(successes.len(), 1);
    assert!(successes[0].contains(&signature));
}

#[tokio::test]
async fn test_wallet_rejection_fails_with_signing_and_keeps_quote() {
    // Arrange
    let harness = Harness::with_wallet(MockWallet::rejecting());
    harness.app.refresh_quote().await.unwrap();

    // Act
    let err = harness.app.confirm_swap().await.unwrap_err();

    // Assert
    assert!(matches!(err, SwapError::Signing(_)));
    assert!(matches!(harness.app.status(), SwapStatus::Failed(SwapError::Signing(_))));
    assert!(harness.app.stored_quote().is_some());
    assert_eq!(harness.ledger.submits(), 0);
    assert!(harness
        .notifier
        .errors()
        .iter()
        .any(|message| message.contains("User rejected")));
}

#[tokio::test]
async fn test_onchain_failure_reports_raw_payload() {
    // Arrange
    let harness = quoted().await;
    let payload = serde_json::json!({ "InstructionError": [0, { "Custom": 6001 }] });
    harness.ledger.set_send_result(Ok("abc123".to_string()));
    harness.ledger.set_confirm_result(Ok(Confirmation {
        slot: Some(7),
        err: Some(payload.clone()),
    }));

    // Act
    let err = harness.app.confirm_swap().await.unwrap_err();

    // Assert
    assert_eq!(
        err,
        SwapError::Execution {
            signature: "abc123".to_string(),
            details: payload.to_string(),
        }
    );
    assert!(matches!(harness.app.status(), SwapStatus::Failed(SwapError::Execution { .. })));

    let errors = harness.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains(r#"{"InstructionError":[0,{"Custom":6001}]}"#));
    assert!(errors[0].contains("abc123"));
}

#[tokio::test]
async fn test_expired_blockhash() {
    let harness = quoted().await;
    harness.ledger.set_send_result(Ok("abc123".to_string()));
    harness.ledger.set_confirm_result(Err(LedgerError::BlockHeightExceeded {
        signature: "abc123".to_string(),
        last_valid_block_height: LAST_VALID_BLOCK_HEIGHT,
    }));

    let err = harness.app.confirm_swap().await.unwrap_err();

    assert_eq!(
        err,
        SwapError::Expired {
            signature: "abc123".to_string(),
            last_valid_block_height: LAST_VALID_BLOCK_HEIGHT,
        }
    );
}

#[tokio::test]
async fn test_submission_failure() {
    let harness = quoted().await;
    harness
        .ledger
        .set_send_result(Err(LedgerError::Rpc("node is behind".to_string())));

    let err = harness.app.confirm_swap().await.unwrap_err();

    assert!(matches!(err, SwapError::Submission(ref message) if message.contains("node is behind")));
    assert!(harness.ledger.confirm_requests().is_empty());
}

#[tokio::test]
async fn test_retry_after_wallet_rejection_confirms() {
    // Arrange
    let harness = Harness::with_wallet(MockWallet::rejecting());
    harness.app.refresh_quote().await.unwrap();
    assert!(harness.app.confirm_swap().await.is_err());
    harness.notifier.clear();

    // Act
    harness.wallet.set_reject(false);
    let signature = harness.app.confirm_swap().await.unwrap();

    // Assert
    assert_eq!(harness.app.status(), SwapStatus::Confirmed(signature));
    assert_eq!(harness.provider.swap_calls(), 2);
    assert_eq!(harness.ledger.submits(), 1);
    assert_eq!(harness.notifier.successes().len(), 1);
}

#[tokio::test]
async fn test_retry_after_submission_failure_confirms() {
    // Arrange
    let harness = quoted().await;
    harness
        .ledger
        .set_send_result(Err(LedgerError::Rpc("node is behind".to_string())));
    assert!(matches!(harness.app.confirm_swap().await, Err(SwapError::Submission(_))));

    // Act
    harness.ledger.set_send_result(Ok("abc123".to_string()));
    let signature = harness.app.confirm_swap().await.unwrap();

    // Assert
    assert_eq!(signature, "abc123");
    assert_eq!(harness.app.status(), SwapStatus::Confirmed("abc123".to_string()));
    assert_eq!(harness.ledger.submits(), 2);
    assert_eq!(harness.ledger.confirm_requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_confirmation_fails_and_allows_retry() {
    // Arrange
    let harness = quoted().await;
    harness.ledger.set_send_result(Ok("abc123".to_string()));
    harness.ledger.set_hang_confirm(true);

    // Act
    let dropped = tokio::time::timeout(Duration::from_secs(1), harness.app.confirm_swap()).await;

    // Assert
    assert!(dropped.is_err());
    assert!(matches!(
        harness.app.status(),
        SwapStatus::Failed(SwapError::Confirmation { ref signature, .. }) if signature == "abc123"
    ));
    assert!(!harness.app.status().is_in_flight());
    assert_eq!(harness.notifier.errors().len(), 1);

    harness.ledger.set_hang_confirm(false);
    let signature = harness.app.confirm_swap().await.unwrap();

    assert_eq!(harness.app.status(), SwapStatus::Confirmed(signature));
    assert_eq!(harness.ledger.submits(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_while_signing_is_cancelled() {
    // Arrange
    let harness = quoted().await;
    harness.wallet.set_hang(true);

    // Act
    let dropped = tokio::time::timeout(Duration::from_secs(1), harness.app.confirm_swap()).await;

    // Assert
    assert!(dropped.is_err());
    assert!(matches!(
        harness.app.status(),
        SwapStatus::Failed(SwapError::Cancelled(ref message)) if message.contains("AwaitingSignature")
    ));
    assert_eq!(harness.ledger.submits(), 0);
    assert!(harness.app.stored_quote().is_some());
}

#[tokio::test]
async fn test_build_failure() {
    let harness = quoted().await;
    harness.provider.fail_build(ProviderError::Empty);

    let err = harness.app.confirm_swap().await.unwrap_err();

    assert!(matches!(err, SwapError::Build(_)));
    assert_eq!(harness.ledger.submits(), 0);
}

#[tokio::test]
async fn test_swap_without_quote_is_a_precondition_failure() {
    let harness = Harness::new();

    let err = harness.app.confirm_swap().await.unwrap_err();

    assert!(matches!(err, SwapError::Precondition(_)));
    assert_eq!(harness.app.status(), SwapStatus::Idle);
    assert_eq!(harness.notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_double_confirm_submits_once() {
    // Arrange
    let harness = quoted().await;
    assert!(harness.wallet.is_connected());

    // Act
    let (first, second) = tokio::join!(harness.app.confirm_swap(), harness.app.confirm_swap());

    // Assert
    assert!(first.is_ok());
    assert!(matches!(second, Err(SwapError::Precondition(_))));
    assert_eq!(harness.provider.swap_calls(), 1);
    assert_eq!(harness.ledger.submits(), 1);
}
