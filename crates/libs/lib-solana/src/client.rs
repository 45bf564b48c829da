//! # Solana RPC Client
//!
//! Wrapper around the nonblocking Solana RPC client that implements
//! [`LedgerConnection`]: raw transaction broadcast plus confirmation polling
//! bounded by the blockhash's last valid block height.
//!
//! ## RPC Endpoints
//!
//! - Mainnet: `https://api.mainnet-beta.solana.com` (~10 req/sec public limit)
//! - Devnet: `https://api.devnet.solana.com`
//! - Any other endpoint via [`SolanaClientBuilder::custom_rpc_url`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::config::Network;
//! use lib_solana::client::SolanaClient;
//! use solana_commitment_config::CommitmentConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SolanaClient::builder()
//!     .network(Network::Devnet)
//!     .build();
//!
//! client.health_check().await?;
//! let height = client.get_block_height(CommitmentConfig::confirmed()).await?;
//! println!("Block height: {}", height);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lib_core::config::Network;
use lib_core::dto::{ConfirmRequest, Confirmation, SendOptions};
use lib_core::error::LedgerError;
use lib_core::service::LedgerConnection;
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::RpcRequest;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use solana_transaction_status_client_types::TransactionStatus;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Consecutive failed polls tolerated before confirmation gives up
const MAX_CONSECUTIVE_POLL_ERRORS: u32 = 10;

/// High-level Solana RPC client wrapper.
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
#[derive(Clone)]
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    network: Network,
    rpc_url: String,
    poll_interval: Duration,
}

/// Builder for configuring SolanaClient.
///
/// Allows fluent configuration of client settings before building.
#[derive(Debug, Clone)]
pub struct SolanaClientBuilder {
    network: Option<Network>,
    custom_rpc_url: Option<String>,
    poll_interval: Option<Duration>,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        Self {
            network: Some(Network::Devnet),
            custom_rpc_url: None,
            poll_interval: Some(DEFAULT_POLL_INTERVAL),
        }
    }
}

impl SolanaClientBuilder {
    /// Set the Solana network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Set a custom RPC URL (overrides network-based URL).
    pub fn custom_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.custom_rpc_url = Some(url.into());
        self
    }

    /// Set the delay between confirmation status polls.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Build the SolanaClient with configured settings.
    pub fn build(self) -> SolanaClient {
        let network = self.network.unwrap_or(Network::Devnet);
        let rpc_url = self
            .custom_rpc_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| network.default_rpc_url().to_string());

        info!(network = network.cluster_name(), rpc_url = %rpc_url, "🔗 Connecting to Solana RPC");

        SolanaClient {
            rpc: Arc::new(RpcClient::new(rpc_url.clone())),
            network,
            rpc_url,
            poll_interval: self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL),
        }
    }
}

impl SolanaClient {
    /// Create a new Solana RPC client using a builder for configuration.
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Create a client for `network`, on its default public endpoint.
    pub fn new(network: Network) -> Self {
        Self::builder().network(network).build()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Verify RPC endpoint connectivity.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        let version = self
            .rpc
            .get_version()
            .await
            .map_err(|e| anyhow::anyhow!("RPC health check failed: {}", e))?;
        debug!(solana_core = %version.solana_core, "RPC healthy");
        Ok(())
    }

    /// Broadcast a base64 encoded transaction via `sendTransaction`.
    #[instrument(skip(self, raw_transaction), fields(bytes = raw_transaction.len()))]
    pub async fn send_raw(&self, raw_transaction: &[u8], options: &SendOptions) -> Result<String, LedgerError> {
        let encoded = BASE64.encode(raw_transaction);

        let mut config = json!({
            "encoding": "base64",
            "skipPreflight": options.skip_preflight,
        });
        if let Some(max_retries) = options.max_retries {
            config["maxRetries"] = json!(max_retries);
        }

        let signature: String = self
            .rpc
            .send(RpcRequest::SendTransaction, json!([encoded, config]))
            .await
            .map_err(|e| LedgerError::Rpc(format!("sendTransaction failed: {}", e)))?;

        info!(signature = %signature, "Transaction broadcast");
        Ok(signature)
    }

    /// Current status of `signature`, `None` if the node has not seen it.
    pub async fn get_signature_status(&self, signature: &Signature) -> Result<Option<TransactionStatus>, LedgerError> {
        let response = self
            .rpc
            .get_signature_statuses(&[*signature])
            .await
            .map_err(|e| LedgerError::Rpc(format!("getSignatureStatuses failed: {}", e)))?;

        Ok(response.value.into_iter().next().flatten())
    }

    /// Current block height at `commitment`.
    pub async fn get_block_height(&self, commitment: CommitmentConfig) -> Result<u64, LedgerError> {
        self.rpc
            .get_block_height_with_commitment(commitment)
            .await
            .map_err(|e| LedgerError::Rpc(format!("getBlockHeight failed: {}", e)))
    }

    /// Poll until `request.signature` reaches `commitment` or the block
    /// height passes `request.last_valid_block_height`.
    ///
    /// On-chain failures are only reported once they reach `commitment`.
    #[instrument(skip(self, request), fields(signature = %request.signature))]
    pub async fn confirm(
        &self,
        request: &ConfirmRequest,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, LedgerError> {
        let signature = Signature::from_str(&request.signature)
            .map_err(|e| LedgerError::Rpc(format!("invalid signature {}: {}", request.signature, e)))?;
        let mut consecutive_errors = 0u32;

        loop {
            match self.get_signature_status(&signature).await {
                Ok(status) => {
                    consecutive_errors = 0;
                    if let Some(confirmation) = evaluate_status(status.as_ref(), commitment) {
                        debug!(slot = ?confirmation.slot, failed = confirmation.err.is_some(), "Confirmation resolved");
                        return Ok(confirmation);
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(error = %e, attempt = consecutive_errors, "Signature status poll failed");
                }
            }

            match self.get_block_height(commitment).await {
                Ok(height) if is_expired(height, request.last_valid_block_height) => {
                    // It may have landed since the status poll above
                    if let Ok(Some(confirmation)) = self
                        .get_signature_status(&signature)
                        .await
                        .map(|status| evaluate_status(status.as_ref(), commitment))
                    {
                        debug!(slot = ?confirmation.slot, "Confirmation resolved at expiry");
                        return Ok(confirmation);
                    }

                    warn!(
                        block_height = height,
                        last_valid_block_height = request.last_valid_block_height,
                        "Blockhash expired before confirmation"
                    );
                    return Err(LedgerError::BlockHeightExceeded {
                        signature: request.signature.clone(),
                        last_valid_block_height: request.last_valid_block_height,
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(error = %e, attempt = consecutive_errors, "Block height poll failed");
                }
            }

            if consecutive_errors >= MAX_CONSECUTIVE_POLL_ERRORS {
                return Err(LedgerError::Rpc(format!(
                    "gave up confirming {} after {} failed polls",
                    request.signature, consecutive_errors
                )));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Decide whether a polled status settles the confirmation.
///
/// Nothing settles before the status reaches `commitment`, including
/// on-chain failures. The error is kept as its raw JSON payload.
pub fn evaluate_status(status: Option<&TransactionStatus>, commitment: CommitmentConfig) -> Option<Confirmation> {
    let status = status?;
    if !status.satisfies_commitment(commitment) {
        return None;
    }

    Some(Confirmation {
        slot: Some(status.slot),
        err: status
            .err
            .as_ref()
            .map(|err| serde_json::to_value(err).unwrap_or_else(|_| Value::String(err.to_string()))),
    })
}

/// Blockhash validity ends once the chain moves past its last valid height.
pub fn is_expired(block_height: u64, last_valid_block_height: u64) -> bool {
    block_height > last_valid_block_height
}

#[async_trait]
impl LedgerConnection for SolanaClient {
    async fn send_raw_transaction(&self, raw_transaction: &[u8], options: &SendOptions) -> Result<String, LedgerError> {
        self.send_raw(raw_transaction, options).await
    }

    async fn confirm_transaction(
        &self,
        request: &ConfirmRequest,
        commitment: CommitmentConfig,
    ) -> Result<Confirmation, LedgerError> {
        self.confirm(request, commitment).await
    }
}
