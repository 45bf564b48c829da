//! # Jupiter Aggregator Client
//!
//! Integration with the Jupiter swap API for quotes and unsigned swap
//! transactions. [`JupiterClient`] implements [`QuoteProvider`].

// region: --- Modules
pub mod types;
pub mod client;
pub mod quote;
pub mod swap;
// endregion: --- Modules

// region: --- Main Client
use async_trait::async_trait;
use client::JupiterHttpClient;
use lib_core::config::DEFAULT_JUPITER_API_BASE_URL;
use lib_core::dto::{Quote, QuoteRequest, SwapRequest, SwapTransaction};
use lib_core::error::ProviderError;
use lib_core::service::QuoteProvider;

const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Builder for configuring JupiterClient.
///
/// Allows fluent configuration of client settings before building.
#[derive(Debug, Clone)]
pub struct JupiterClientBuilder {
    timeout: Option<std::time::Duration>,
    api_base: Option<String>,
}

impl Default for JupiterClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            api_base: Some(DEFAULT_JUPITER_API_BASE_URL.to_string()),
        }
    }
}

impl JupiterClientBuilder {
    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the swap API base URL (quote and swap endpoints live under it).
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Build the JupiterClient with configured settings.
    pub fn build(self) -> anyhow::Result<JupiterClient> {
        let inner = JupiterHttpClient::new(
            self.api_base.unwrap_or_else(|| DEFAULT_JUPITER_API_BASE_URL.to_string()),
            self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        )?;

        Ok(JupiterClient { inner })
    }
}

/// Client for the Jupiter swap API
pub struct JupiterClient {
    inner: JupiterHttpClient,
}

impl JupiterClient {
    /// Create a new Jupiter API client with default settings.
    pub fn new() -> anyhow::Result<Self> {
        Self::builder().build()
    }

    /// Create a new Jupiter client using a builder for configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lib_solana::jupiter::JupiterClient;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let client = JupiterClient::builder()
    ///     .timeout(std::time::Duration::from_secs(30))
    ///     .api_base("https://quote-api.jup.ag/v6")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> JupiterClientBuilder {
        JupiterClientBuilder::default()
    }

    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }
}

#[async_trait]
impl QuoteProvider for JupiterClient {
    async fn get_quote(&self, request: &QuoteRequest) -> Result<Quote, ProviderError> {
        self.inner.get_swap_quote(request).await
    }

    async fn build_swap_transaction(&self, request: &SwapRequest) -> Result<SwapTransaction, ProviderError> {
        self.inner.get_swap_transaction(request).await
    }
}
// endregion: --- Main Client
