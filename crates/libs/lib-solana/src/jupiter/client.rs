//! # Jupiter HTTP Client
//!
//! HTTP client wrapper shared by the quote and swap endpoints.

use super::types::error_message_from_body;
use lib_core::error::ProviderError;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

/// HTTP client wrapper for the Jupiter swap API
pub struct JupiterHttpClient {
    pub http: Client,
    /// Base URL, e.g. `https://quote-api.jup.ag/v6`
    pub api_base: String,
}

impl JupiterHttpClient {
    /// Create a new HTTP client with timeout configuration
    pub fn new(api_base: impl Into<String>, timeout: std::time::Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Read a response body, classifying HTTP errors and empty payloads.
    pub(crate) async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ProviderError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = error_message_from_body(&body)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "Jupiter request rejected");
            return Err(ProviderError::Rejected { message });
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(ProviderError::Empty);
        }

        // Some gateways answer 200 with an error envelope
        if let Some(message) = error_message_from_body(trimmed) {
            return Err(ProviderError::Rejected { message });
        }

        serde_json::from_str(trimmed).map_err(ProviderError::from)
    }
}

pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Transport(format!("{}: request timed out", context))
    } else {
        ProviderError::Transport(format!("{}: {}", context, err))
    }
}
